//! Clap derive structures for the `tidings` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tidings -- drive the feed reader state layer without a GUI
#[derive(Debug, Parser)]
#[command(
    name = "tidings",
    version,
    about = "Drive the tidings feed reader state layer from the command line",
    long_about = "Encode backend commands and replay recorded backend events into\n\
        the reactive store, without a GUI shell.\n\n\
        Commands are written to stdout one per line. Events are read as\n\
        JSON lines of the form {\"type\": ..., \"payload\": ...}.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format (defaults to the config file's `defaults.output`)
    #[arg(long, short = 'o', env = "TIDINGS_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode a backend command and write it to stdout
    #[command(subcommand)]
    Emit(EmitCommand),

    /// Replay recorded backend events into the store and show the result
    Replay(ReplayArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Emit ─────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum EmitCommand {
    /// Subscribe to a feed
    Subscribe {
        /// Feed URL, passed to the backend unchanged
        url: String,
    },
    /// Unsubscribe from a channel
    Unsubscribe {
        /// Channel id
        id: i64,
    },
    /// Resubscribe to a previously unsubscribed channel
    Resubscribe {
        /// Channel id
        id: i64,
    },
    /// Ask the backend to open a link in the system browser
    #[command(alias = "external-link")]
    Open {
        /// Link URL
        url: String,
    },
    /// Request the full channel list
    Channels,
    /// Request the items of one channel
    Items {
        /// Channel id
        id: i64,
    },
}

// ── Replay ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSON-lines file of backend events (`-` or omitted for stdin)
    pub file: Option<PathBuf>,

    /// Abort on the first undecodable line instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Select this item after replaying
    #[arg(long, value_name = "ID")]
    pub open: Option<i64>,

    /// List items instead of channels (table and plain output)
    #[arg(long)]
    pub items: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,
    /// Print the effective configuration (file + environment)
    Show,
    /// Write a default config file if none exists
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

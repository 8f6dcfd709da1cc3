//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with help text
//! and sysexits-style exit codes.

use miette::Diagnostic;
use thiserror::Error;

use tidings_config::ConfigError;
use tidings_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const DATA: i32 = 65;
    pub const IO: i32 = 74;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Input ────────────────────────────────────────────────────────
    #[error("Cannot read {path}")]
    #[diagnostic(code(tidings::io), help("Check that the file exists and is readable."))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line} is not a valid backend event")]
    #[diagnostic(
        code(tidings::decode),
        help(
            "Each line must be a JSON object like {{\"type\": \"newItems\", \"payload\": [...]}}.\n\
             Run without --strict to skip unreadable lines."
        )
    )]
    Decode {
        line: usize,
        #[source]
        source: CoreError,
    },

    // ── Transport ────────────────────────────────────────────────────
    #[error("Could not send command to the backend")]
    #[diagnostic(code(tidings::transport))]
    Transport {
        #[source]
        source: CoreError,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(tidings::config),
        help("Inspect the effective settings with: tidings config show")
    )]
    Config(#[from] ConfigError),

    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(tidings::validation))]
    Validation { field: String, reason: String },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { .. } => exit_code::IO,
            Self::Decode { .. } => exit_code::DATA,
            Self::Transport { source } => match source {
                CoreError::Encode { .. } => exit_code::DATA,
                _ => exit_code::IO,
            },
            Self::Config(_) => exit_code::GENERAL,
            Self::Validation { .. } => exit_code::USAGE,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::Transport { source: err }
    }
}

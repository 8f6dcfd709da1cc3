mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::commands::Settings;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins, then `-v`, then the
/// config file's `log.filter`.
fn init_tracing(verbosity: u8, configured: &str) {
    let filter = match verbosity {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Completions never depend on the config file
    if let Command::Completions(args) = &cli.command {
        use clap::CommandFactory;
        use clap_complete::generate;

        let mut cmd = Cli::command();
        generate(args.shell, &mut cmd, "tidings", &mut std::io::stdout());
        return Ok(());
    }

    let config = tidings_config::load_config()?;
    init_tracing(cli.global.verbose, &config.log.filter);
    let settings = Settings::resolve(&cli.global, &config)?;

    tracing::debug!(command = ?cli.command, "dispatching command");
    match cli.command {
        Command::Config(cmd) => commands::config_cmd::handle(&cmd, &config, settings),
        Command::Emit(cmd) => commands::emit::handle(cmd, &config.store_config()?),
        Command::Replay(args) => {
            commands::replay::handle(args, &config.store_config()?, settings).await
        }
        Command::Completions(_) => Ok(()),
    }
}

//! `tidings config`: locate, show, and initialize the config file.

use tidings_config::Config;

use crate::cli::ConfigCommand;
use crate::commands::Settings;
use crate::error::CliError;
use crate::output;

pub fn handle(cmd: &ConfigCommand, config: &Config, settings: Settings) -> Result<(), CliError> {
    match cmd {
        ConfigCommand::Path => {
            output::print_output(&tidings_config::config_path().display().to_string(), settings.quiet);
            Ok(())
        }
        ConfigCommand::Show => {
            let rendered = match output::render_structured(settings.output, config) {
                Some(rendered) => rendered,
                None => toml::to_string_pretty(config).map_err(|e| CliError::Config(e.into()))?,
            };
            output::print_output(rendered.trim_end(), settings.quiet);
            Ok(())
        }
        ConfigCommand::Init { force } => {
            let path = tidings_config::config_path();
            if path.exists() && !force {
                return Err(CliError::Validation {
                    field: "config".into(),
                    reason: format!("{} already exists (use --force to overwrite)", path.display()),
                });
            }
            tidings_config::save_config_to(&Config::default(), &path)?;
            tracing::info!(path = %path.display(), "wrote default config");
            output::print_output(&path.display().to_string(), settings.quiet);
            Ok(())
        }
    }
}

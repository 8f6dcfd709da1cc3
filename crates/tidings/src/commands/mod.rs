//! Command handlers, one module per top-level subcommand.

pub mod config_cmd;
pub mod emit;
pub mod replay;

use clap::ValueEnum;
use tidings_config::Config;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Global flags resolved against the config file defaults.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

impl Settings {
    pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<Self, CliError> {
        let output = match global.output {
            Some(format) => format,
            None => parse_value("defaults.output", &config.defaults.output)?,
        };
        let color = match global.color {
            Some(mode) => mode,
            None => parse_value::<ColorMode>("defaults.color", &config.defaults.color)?,
        };
        Ok(Self {
            output,
            color: crate::output::should_color(color),
            quiet: global.quiet,
        })
    }
}

fn parse_value<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

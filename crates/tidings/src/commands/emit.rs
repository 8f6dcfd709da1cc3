//! `tidings emit`: encode one command onto the stdout line transport.

use std::io;

use tidings_core::{Emission, EmissionGateway, StoreConfig, WriterEmitter};

use crate::cli::EmitCommand;
use crate::error::CliError;

impl From<EmitCommand> for Emission {
    fn from(cmd: EmitCommand) -> Self {
        match cmd {
            EmitCommand::Subscribe { url } => Emission::subscribe(url),
            EmitCommand::Unsubscribe { id } => Emission::unsubscribe(id),
            EmitCommand::Resubscribe { id } => Emission::resubscribe(id),
            EmitCommand::Open { url } => Emission::external_link(url),
            EmitCommand::Channels => Emission::get_channels(),
            EmitCommand::Items { id } => Emission::get_items_by_feed(id),
        }
    }
}

pub fn handle(cmd: EmitCommand, store_config: &StoreConfig) -> Result<(), CliError> {
    let emission = Emission::from(cmd);
    let gateway = EmissionGateway::from_config(WriterEmitter::new(io::stdout()), store_config);
    gateway.emit_to_backend(&emission)?;
    tracing::info!(cmd = emission.kind(), "command emitted");
    Ok(())
}

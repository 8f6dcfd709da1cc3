use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::CoreError;
use crate::model::{Channel, Id, Input, Item};

/// An event pushed by the backend.
///
/// Wire shape is `{"type": "<kind>", "payload": ...}`. Decoding rejects
/// unknown kinds and payloads of the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Reception {
    /// Full channel list; replaces everything held.
    AllChannels(Vec<Input<Channel>>),
    /// Full item list; replaces everything held.
    AllItems(Vec<Input<Item>>),
    /// A subscription succeeded.
    NewChannel(Input<Channel>),
    /// A channel refresh produced items.
    NewItems(Vec<Input<Item>>),
    /// The channel with this id was unsubscribed.
    Unsubscribe(Id),
    /// The backend failed to process a command.
    Error(String),
}

/// The bare `type` tag of a [`Reception`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum EventKind {
    AllChannels,
    AllItems,
    NewChannel,
    NewItems,
    Unsubscribe,
    Error,
}

impl Reception {
    /// Decode one inbound message from its wire text.
    pub fn from_wire(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw).map_err(|source| CoreError::decode(raw, source))
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::AllChannels(_) => EventKind::AllChannels,
            Self::AllItems(_) => EventKind::AllItems,
            Self::NewChannel(_) => EventKind::NewChannel,
            Self::NewItems(_) => EventKind::NewItems,
            Self::Unsubscribe(_) => EventKind::Unsubscribe,
            Self::Error(_) => EventKind::Error,
        }
    }

    /// Number of entity records carried, for logging.
    pub fn record_count(&self) -> usize {
        match self {
            Self::AllChannels(channels) => channels.len(),
            Self::AllItems(items) | Self::NewItems(items) => items.len(),
            Self::NewChannel(_) => 1,
            Self::Unsubscribe(_) | Self::Error(_) => 0,
        }
    }
}

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::error::CoreError;
use crate::model::Id;

/// A command sent from the client to the backend.
///
/// Serialized with the command kind in a `cmd` field next to the
/// command's own fields, e.g. `{"cmd":"subscribe","url":"https://x"}`.
/// Constructors copy their argument as-is: URLs are not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "cmd", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Emission {
    Subscribe { url: String },
    Unsubscribe { id: Id },
    Resubscribe { id: Id },
    ExternalLink { url: String },
    GetChannels,
    GetItemsByFeed { id: Id },
}

impl Emission {
    pub fn subscribe(url: impl Into<String>) -> Self {
        Self::Subscribe { url: url.into() }
    }

    pub fn unsubscribe(id: Id) -> Self {
        Self::Unsubscribe { id }
    }

    pub fn resubscribe(id: Id) -> Self {
        Self::Resubscribe { id }
    }

    pub fn external_link(url: impl Into<String>) -> Self {
        Self::ExternalLink { url: url.into() }
    }

    pub fn get_channels() -> Self {
        Self::GetChannels
    }

    pub fn get_items_by_feed(id: Id) -> Self {
        Self::GetItemsByFeed { id }
    }

    /// The wire tag, e.g. `"externalLink"`.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Encode as the text the shell transport carries.
    pub fn to_wire(&self) -> Result<String, CoreError> {
        serde_json::to_string(self).map_err(|source| CoreError::Encode {
            command: self.kind().to_owned(),
            source,
        })
    }
}

use serde::{Deserialize, Serialize};

use super::Id;

/// A single entry belonging to a [`Channel`](super::Channel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Id of the owning channel.
    pub feed_id: Id,
    pub read: bool,
    pub date: String,
    pub content: String,
    pub title: String,
}

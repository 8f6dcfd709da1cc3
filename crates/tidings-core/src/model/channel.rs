use serde::{Deserialize, Serialize};

/// A feed source the user has subscribed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub url: String,
    pub title: String,
    /// Last update timestamp, as the backend formats it.
    pub date: String,
    #[serde(default = "default_subscribed")]
    pub subscribed: bool,
}

fn default_subscribed() -> bool {
    true
}

// ── Store configuration ──

use std::time::Duration;

/// How long a toast stays visible before hiding itself.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3500);

/// Event name the gateway addresses emissions to. The shell's default
/// channel is the empty name.
pub const DEFAULT_EVENT_CHANNEL: &str = "";

/// Settings for the stores and the emission gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub toast_duration: Duration,
    pub event_channel: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            toast_duration: DEFAULT_TOAST_DURATION,
            event_channel: DEFAULT_EVENT_CHANNEL.to_owned(),
        }
    }
}

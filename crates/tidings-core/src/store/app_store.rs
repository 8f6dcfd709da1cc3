// ── Application store ──
//
// Channels, items, and the open-item selection. One named update per
// inbound event kind; each publishes a fresh snapshot to all subscribers.

use std::sync::Arc;

use tracing::debug;

use super::Observable;
use crate::message::Reception;
use crate::model::{Channel, Id, Input, Item, Model};
use crate::stream::{SnapshotStream, Subscription};

/// Reactive store for channels and items.
///
/// Cheap to clone: clones share the same underlying state. Pass it to
/// whatever owns the view tree instead of reaching for a global.
#[derive(Clone)]
pub struct AppStore {
    state: Arc<Observable<Model>>,
}

impl AppStore {
    /// A store holding empty maps and no open item.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Observable::new(Model::default())),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<Model> {
        self.state.get()
    }

    /// Subscribe to snapshots. The stream starts at the current one.
    pub fn subscribe(&self) -> SnapshotStream<Model> {
        self.state.subscribe()
    }

    /// Register a callback, invoked now with the current snapshot and
    /// again, synchronously, after every change. The callback must not
    /// call back into this store.
    pub fn observe<F>(&self, observer: F) -> Subscription
    where
        F: FnMut(&Model) + Send + 'static,
    {
        self.state.observe(observer)
    }

    /// Number of snapshots published since creation.
    pub fn version(&self) -> u64 {
        self.state.version()
    }

    // ── Updates ──────────────────────────────────────────────────────

    /// Replace the whole channel map (`allChannels`).
    pub fn channels_to_state(&self, channels: Vec<Input<Channel>>) {
        debug!(count = channels.len(), "replacing channels");
        self.state.update(|model| model.with_channels(channels));
    }

    /// Replace the whole item map (`allItems`).
    pub fn items_to_state(&self, items: Vec<Input<Item>>) {
        debug!(count = items.len(), "replacing items");
        self.state.update(|model| model.with_items(items));
    }

    /// Insert or overwrite one channel (`newChannel`).
    pub fn new_channel_to_state(&self, channel: Input<Channel>) {
        debug!(id = channel.id, url = %channel.entity.url, "adding channel");
        self.state.update(|model| model.with_new_channel(channel));
    }

    /// Merge items into the map (`newItems`).
    pub fn new_items_to_state(&self, items: Vec<Input<Item>>) {
        debug!(count = items.len(), "merging items");
        self.state.update(|model| model.with_new_items(items));
    }

    /// Select the item shown in the reading pane.
    pub fn open_item(&self, id: Id) {
        debug!(id, "opening item");
        self.state.update(|model| model.with_open_item(id));
    }

    /// Remove a channel and prune its items (`unsubscribe`).
    /// Returns `false`, publishing nothing, if neither was held.
    pub fn remove_channel(&self, id: Id) -> bool {
        let removed = self.state.update_if(|model| model.without_channel(id));
        debug!(id, removed, "removing channel");
        removed
    }

    /// Route one reception to its update. Returns `false` for receptions
    /// that do not touch the model (backend errors, unknown removals).
    pub fn apply(&self, reception: Reception) -> bool {
        match reception {
            Reception::AllChannels(channels) => self.channels_to_state(channels),
            Reception::AllItems(items) => self.items_to_state(items),
            Reception::NewChannel(channel) => self.new_channel_to_state(channel),
            Reception::NewItems(items) => self.new_items_to_state(items),
            Reception::Unsubscribe(id) => return self.remove_channel(id),
            Reception::Error(_) => return false,
        }
        true
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

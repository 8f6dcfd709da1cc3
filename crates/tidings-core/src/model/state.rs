// ── Application state snapshot ──
//
// Immutable once published. The store derives each new snapshot from the
// previous one; entities are shared between snapshots behind `Arc`.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use super::{Channel, Id, Item};

/// Complete application state at one instant.
///
/// Map iteration order is unspecified. Use [`Model::channels_by_date`] or
/// [`Model::items_by_date`] when display order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    pub(crate) channels: HashMap<Id, Arc<Channel>>,
    pub(crate) items: HashMap<Id, Arc<Item>>,
    pub(crate) open_item: Option<Id>,
}

impl Model {
    pub fn channels(&self) -> &HashMap<Id, Arc<Channel>> {
        &self.channels
    }

    pub fn items(&self) -> &HashMap<Id, Arc<Item>> {
        &self.items
    }

    pub fn channel(&self, id: Id) -> Option<&Arc<Channel>> {
        self.channels.get(&id)
    }

    pub fn item(&self, id: Id) -> Option<&Arc<Item>> {
        self.items.get(&id)
    }

    /// The selected item id. May refer to an item that is not loaded.
    pub fn open_item_id(&self) -> Option<Id> {
        self.open_item
    }

    /// The selected item, if it is currently loaded.
    pub fn open_item(&self) -> Option<&Arc<Item>> {
        self.open_item.and_then(|id| self.items.get(&id))
    }

    /// Items owned by `channel`, in unspecified order.
    pub fn items_for_channel(&self, channel: Id) -> impl Iterator<Item = (Id, &Arc<Item>)> {
        self.items
            .iter()
            .filter(move |(_, item)| item.feed_id == channel)
            .map(|(id, item)| (*id, item))
    }

    pub fn unread_count(&self, channel: Id) -> usize {
        self.items_for_channel(channel)
            .filter(|(_, item)| !item.read)
            .count()
    }

    /// Channels, newest `date` first. Ties break on ascending id.
    pub fn channels_by_date(&self) -> Vec<(Id, &Arc<Channel>)> {
        let mut sorted: Vec<_> = self.channels.iter().map(|(id, c)| (*id, c)).collect();
        sorted.sort_by(|(a_id, a), (b_id, b)| b.date.cmp(&a.date).then(a_id.cmp(b_id)));
        sorted
    }

    /// Items, newest `date` first. Ties break on ascending id.
    pub fn items_by_date(&self) -> Vec<(Id, &Arc<Item>)> {
        let mut sorted: Vec<_> = self.items.iter().map(|(id, i)| (*id, i)).collect();
        sorted.sort_by(|(a_id, a), (b_id, b)| b.date.cmp(&a.date).then(a_id.cmp(b_id)));
        sorted
    }
}

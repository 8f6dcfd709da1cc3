// ── Snapshot transitions ──
//
// Pure functions from (previous model, event payload) to the next model.
// Entities not touched by an update are shared with the previous snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{Channel, Id, Input, Item, Model};

/// Key a batch of wire records by id. Later duplicates win.
pub(super) fn index_by_id<T>(inputs: Vec<Input<T>>) -> HashMap<Id, Arc<T>> {
    inputs
        .into_iter()
        .map(|input| {
            let (id, entity) = input.into_pair();
            (id, Arc::new(entity))
        })
        .collect()
}

impl Model {
    /// Full replacement of the channel map.
    pub(super) fn with_channels(&self, channels: Vec<Input<Channel>>) -> Self {
        Self {
            channels: index_by_id(channels),
            items: self.items.clone(),
            open_item: self.open_item,
        }
    }

    /// Full replacement of the item map.
    pub(super) fn with_items(&self, items: Vec<Input<Item>>) -> Self {
        Self {
            channels: self.channels.clone(),
            items: index_by_id(items),
            open_item: self.open_item,
        }
    }

    /// Insert or overwrite exactly one channel.
    pub(super) fn with_new_channel(&self, channel: Input<Channel>) -> Self {
        let mut next = self.clone();
        let (id, channel) = channel.into_pair();
        next.channels.insert(id, Arc::new(channel));
        next
    }

    /// Merge items into the map: same-id records overwrite, none removed.
    pub(super) fn with_new_items(&self, items: Vec<Input<Item>>) -> Self {
        let mut next = self.clone();
        next.items.extend(index_by_id(items));
        next
    }

    pub(super) fn with_open_item(&self, id: Id) -> Self {
        Self {
            channels: self.channels.clone(),
            items: self.items.clone(),
            open_item: Some(id),
        }
    }

    /// Drop a channel together with the items it owns.
    ///
    /// Returns `None` when nothing would change. The open item is cleared
    /// only if it was one of the pruned items.
    pub(super) fn without_channel(&self, id: Id) -> Option<Self> {
        let owns_items = self.items.values().any(|item| item.feed_id == id);
        if !self.channels.contains_key(&id) && !owns_items {
            return None;
        }

        let mut next = self.clone();
        next.channels.remove(&id);
        next.items.retain(|_, item| item.feed_id != id);
        if next
            .open_item
            .is_some_and(|open| self.items.contains_key(&open) && !next.items.contains_key(&open))
        {
            next.open_item = None;
        }
        Some(next)
    }
}

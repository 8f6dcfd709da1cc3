// ── Reactive snapshot streams ──
//
// Subscription types for consuming state changes from the stores.

mod subscription;

use std::sync::Arc;

use tokio::sync::watch;

pub use subscription::Subscription;

/// A subscription to a store's snapshots.
///
/// Provides point-in-time access via [`current`](Self::current) and
/// [`latest`](Self::latest), and change notification via
/// [`changed`](Self::changed). A reader that falls behind wakes on the
/// latest snapshot; use a store's `observe` to see every one.
/// Dropping the stream unregisters it.
pub struct SnapshotStream<S: Send + Sync + 'static> {
    current: Arc<S>,
    receiver: watch::Receiver<Arc<S>>,
}

impl<S: Send + Sync + 'static> SnapshotStream<S> {
    pub(crate) fn new(mut receiver: watch::Receiver<Arc<S>>) -> Self {
        let current = receiver.borrow_and_update().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation or at the last `changed()`.
    pub fn current(&self) -> &Arc<S> {
        &self.current
    }

    /// The latest published snapshot (may be newer than `current`).
    pub fn latest(&self) -> Arc<S> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<S>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }
}

// ── Generic reactive container ──
//
// Single-value storage with push-based change notification. Snapshots are
// `Arc`ed so readers never observe a partial update. Streams read the
// latest value from a `watch` channel; callbacks registered with `observe`
// run synchronously on every publish and see each snapshot in order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::watch;

use crate::stream::{SnapshotStream, Subscription};

type Observer<S> = Box<dyn FnMut(&S) + Send>;

/// Registered callbacks, keyed so a [`Subscription`] can remove its own.
struct Observers<S> {
    next_key: u64,
    entries: Vec<(u64, Observer<S>)>,
}

impl<S> Observers<S> {
    fn remove(&mut self, key: u64) {
        self.entries.retain(|(k, _)| *k != key);
    }
}

/// A reactive cell holding the latest snapshot of some state `S`.
///
/// Every published update bumps a version counter, which tests and
/// diagnostics use to tell a no-op from a real change.
pub(crate) struct Observable<S: Send + Sync + 'static> {
    /// Latest snapshot.
    snapshot: watch::Sender<Arc<S>>,

    /// Version counter, bumped on every publish.
    version: watch::Sender<u64>,

    /// Held across publish and notify so callbacks see updates in order.
    observers: Arc<Mutex<Observers<S>>>,
}

impl<S: Send + Sync + 'static> Observable<S> {
    pub(crate) fn new(initial: S) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(initial));
        let (version, _) = watch::channel(0u64);
        Self {
            snapshot,
            version,
            observers: Arc::new(Mutex::new(Observers {
                next_key: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Current snapshot (cheap `Arc` clone).
    pub(crate) fn get(&self) -> Arc<S> {
        self.snapshot.borrow().clone()
    }

    /// Replace the snapshot with `next(&current)`.
    pub(crate) fn update(&self, next: impl FnOnce(&S) -> S) {
        self.update_if(|current| Some(next(current)));
    }

    /// Replace the snapshot only when `next` returns `Some`.
    /// Returns `true` if a new snapshot was published.
    ///
    /// Concurrent updates are applied one after another and none is lost.
    /// Observers run before this returns, on the updating thread.
    pub(crate) fn update_if(&self, next: impl FnOnce(&S) -> Option<S>) -> bool {
        let mut observers = lock(&self.observers);
        // `send_if_modified` updates even with zero receivers.
        let published = self.snapshot.send_if_modified(|snap| match next(snap.as_ref()) {
            Some(state) => {
                *snap = Arc::new(state);
                true
            }
            None => false,
        });
        if published {
            self.version.send_modify(|v| *v += 1);
            let snap = self.get();
            for (_, observer) in &mut observers.entries {
                observer(&snap);
            }
        }
        published
    }

    pub(crate) fn subscribe(&self) -> SnapshotStream<S> {
        SnapshotStream::new(self.snapshot.subscribe())
    }

    /// Call `observer` with the current snapshot, then after every publish.
    ///
    /// The callback must not update, observe, or unsubscribe from this
    /// same cell; doing so deadlocks.
    pub(crate) fn observe<F>(&self, mut observer: F) -> Subscription
    where
        F: FnMut(&S) + Send + 'static,
    {
        let mut observers = lock(&self.observers);
        observer(&self.get());

        let key = observers.next_key;
        observers.next_key += 1;
        observers.entries.push((key, Box::new(observer)));

        let registry: Weak<Mutex<Observers<S>>> = Arc::downgrade(&self.observers);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                lock(&registry).remove(key);
            }
        })
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }
}

fn lock<S>(observers: &Mutex<Observers<S>>) -> MutexGuard<'_, Observers<S>> {
    observers.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Toast store ──
//
// One transient notification at a time. A trigger shows it and schedules
// an expiry; a newer trigger cancels the pending expiry before scheduling
// its own, so a stale timer never hides a newer toast.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::{DEFAULT_TOAST_DURATION, StoreConfig};
use crate::store::Observable;
use crate::stream::{SnapshotStream, Subscription};

/// The notification currently held by the [`ToastStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToastData {
    pub message: String,
    pub error: bool,
    pub visible: bool,
}

/// Reactive store for the transient notification.
///
/// Cheap to clone; clones share state. Triggering requires a tokio runtime
/// for the expiry timer.
#[derive(Clone)]
pub struct ToastStore {
    inner: Arc<Inner>,
}

struct Inner {
    state: Observable<ToastData>,
    duration: Duration,
    /// Bumped on every trigger and close; an expiry only applies to the
    /// generation that scheduled it.
    generation: AtomicU64,
    pending: Mutex<Option<CancellationToken>>,
}

impl ToastStore {
    pub fn new() -> Self {
        Self::with_duration(DEFAULT_TOAST_DURATION)
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Observable::new(ToastData::default()),
                duration,
                generation: AtomicU64::new(0),
                pending: Mutex::new(None),
            }),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_duration(config.toast_duration)
    }

    pub fn duration(&self) -> Duration {
        self.inner.duration
    }

    pub fn current(&self) -> Arc<ToastData> {
        self.inner.state.get()
    }

    pub fn subscribe(&self) -> SnapshotStream<ToastData> {
        self.inner.state.subscribe()
    }

    pub fn observe<F>(&self, observer: F) -> Subscription
    where
        F: FnMut(&ToastData) + Send + 'static,
    {
        self.inner.state.observe(observer)
    }

    /// Show `message` now and hide it after the configured duration.
    pub fn trigger(&self, message: impl Into<String>, error: bool) {
        let message = message.into();
        debug!(%message, error, "showing toast");

        let token = CancellationToken::new();
        let generation = self.inner.advance(Some(token.clone()));
        self.inner.state.update(|_| ToastData {
            message,
            error,
            visible: true,
        });

        let Ok(runtime) = Handle::try_current() else {
            warn!("no tokio runtime; toast will stay until closed");
            return;
        };
        let inner = Arc::clone(&self.inner);
        runtime.spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {}
                () = tokio::time::sleep(inner.duration) => inner.expire(generation),
            }
        });
    }

    /// Hide the toast now, keeping its message and error flag.
    pub fn close(&self) {
        self.inner.advance(None);
        self.inner.state.update(|toast| ToastData {
            visible: false,
            ..toast.clone()
        });
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    /// Cancel any pending expiry, install `next`, and start a new generation.
    fn advance(&self, next: Option<CancellationToken>) -> u64 {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = std::mem::replace(&mut *pending, next) {
            previous.cancel();
        }
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn expire(&self, generation: u64) {
        let hidden = self.state.update_if(|toast| {
            let current = self.generation.load(Ordering::SeqCst) == generation;
            (current && toast.visible).then(|| ToastData {
                visible: false,
                ..toast.clone()
            })
        });
        debug!(generation, hidden, "toast expired");
    }
}

//! Reception bridge: the event-in half of the backend link.
//!
//! Decodes inbound wire text into typed [`Reception`]s and routes each one
//! to the matching [`AppStore`] update. Backend error events and
//! undecodable messages are surfaced to the user through the
//! [`ToastStore`]; nothing here retries.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::message::{EventKind, Reception};
use crate::store::AppStore;
use crate::toast::ToastStore;

/// Toast text shown when an inbound message cannot be decoded.
pub const UNREADABLE_MESSAGE: &str = "Received an unreadable message from the backend";

/// Routes inbound events into the stores.
#[derive(Clone)]
pub struct ReceptionBridge {
    store: AppStore,
    toast: ToastStore,
}

impl ReceptionBridge {
    pub fn new(store: AppStore, toast: ToastStore) -> Self {
        Self { store, toast }
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    pub fn toast(&self) -> &ToastStore {
        &self.toast
    }

    /// Apply an already-decoded reception.
    pub fn dispatch(&self, reception: Reception) {
        let kind = reception.kind();
        debug!(%kind, records = reception.record_count(), "dispatching reception");
        match reception {
            Reception::Error(message) => {
                warn!(%message, "backend reported an error");
                self.toast.trigger(message, true);
            }
            other => {
                self.store.apply(other);
            }
        }
    }

    /// Decode one wire message and apply it.
    ///
    /// A decode failure leaves the model untouched, shows an error toast,
    /// and is returned to the caller.
    pub fn handle_wire(&self, raw: &str) -> Result<EventKind, CoreError> {
        match Reception::from_wire(raw) {
            Ok(reception) => {
                let kind = reception.kind();
                self.dispatch(reception);
                Ok(kind)
            }
            Err(e) => {
                warn!(error = %e, "dropping undecodable reception");
                self.toast.trigger(UNREADABLE_MESSAGE, true);
                Err(e)
            }
        }
    }

    /// Consume wire messages until the channel closes or `cancel` fires.
    /// Returns the number of messages applied.
    pub async fn run(
        self,
        mut inbound: mpsc::UnboundedReceiver<String>,
        cancel: CancellationToken,
    ) -> usize {
        let mut applied = 0usize;
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                msg = inbound.recv() => {
                    let Some(raw) = msg else { break };
                    if self.handle_wire(&raw).is_ok() {
                        applied += 1;
                    }
                }
            }
        }
        info!(applied, "reception bridge stopped");
        applied
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bridge() -> ReceptionBridge {
        ReceptionBridge::new(AppStore::new(), ToastStore::new())
    }

    #[test]
    fn wire_message_reaches_the_store() {
        let bridge = bridge();
        let kind = bridge
            .handle_wire(r#"{"type":"newChannel","payload":{"id":4,"url":"https://d","title":"D","date":"2024-02-01","subscribed":true}}"#)
            .unwrap();

        assert_eq!(kind, EventKind::NewChannel);
        assert_eq!(bridge.store().snapshot().channel(4).unwrap().title, "D");
        assert!(!bridge.toast().current().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn backend_error_becomes_error_toast() {
        let bridge = bridge();
        let version = bridge.store().version();

        bridge.handle_wire(r#"{"type":"error","payload":"feed not found"}"#).unwrap();

        let toast = bridge.toast().current();
        assert!(toast.visible && toast.error);
        assert_eq!(toast.message, "feed not found");
        assert_eq!(bridge.store().version(), version);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_kind_is_rejected_and_toasted() {
        let bridge = bridge();
        let err = bridge.handle_wire(r#"{"type":"mystery","payload":1}"#).unwrap_err();

        assert!(err.is_decode());
        assert_eq!(bridge.toast().current().message, UNREADABLE_MESSAGE);
        assert_eq!(bridge.store().version(), 0);
    }

    #[tokio::test]
    async fn run_drains_until_channel_closes() {
        let bridge = bridge();
        let store = bridge.store().clone();
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send(r#"{"type":"allItems","payload":[{"id":1,"feed_id":1,"read":false,"date":"d","content":"","title":"a"}]}"#.to_owned()).unwrap();
        tx.send("not json".to_owned()).unwrap();
        tx.send(r#"{"type":"newItems","payload":[{"id":2,"feed_id":1,"read":false,"date":"d","content":"","title":"b"}]}"#.to_owned()).unwrap();
        drop(tx);

        let applied = bridge.run(rx, CancellationToken::new()).await;
        assert_eq!(applied, 2);
        assert_eq!(store.snapshot().items().len(), 2);
    }

    #[tokio::test]
    async fn run_stops_on_cancel() {
        let (_tx, rx) = mpsc::unbounded_channel::<String>();
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert_eq!(bridge().run(rx, cancel).await, 0);
    }
}

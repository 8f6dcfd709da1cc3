//! Emission gateway: the command-out half of the backend link.
//!
//! Serializes an [`Emission`] and hands it to the shell's one-way event
//! primitive, modelled here as the [`Emitter`] trait. Sends are
//! fire-and-forget and at-most-once: no acknowledgment, no retry. Whatever
//! the backend does in response arrives later, uncorrelated, as a
//! [`Reception`](crate::Reception).

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::config::{DEFAULT_EVENT_CHANNEL, StoreConfig};
use crate::error::CoreError;
use crate::message::Emission;

/// The shell's one-way event emission primitive.
pub trait Emitter: Send + Sync {
    /// Send `payload` on the event named `event`.
    fn emit(&self, event: &str, payload: String) -> Result<(), CoreError>;
}

impl<E: Emitter + ?Sized> Emitter for Arc<E> {
    fn emit(&self, event: &str, payload: String) -> Result<(), CoreError> {
        (**self).emit(event, payload)
    }
}

impl<E: Emitter + ?Sized> Emitter for Box<E> {
    fn emit(&self, event: &str, payload: String) -> Result<(), CoreError> {
        (**self).emit(event, payload)
    }
}

/// Encodes emissions and forwards them to an [`Emitter`].
pub struct EmissionGateway<E> {
    emitter: E,
    event_channel: String,
}

impl<E: Emitter> EmissionGateway<E> {
    /// A gateway addressing the default (empty-named) channel.
    pub fn new(emitter: E) -> Self {
        Self {
            emitter,
            event_channel: DEFAULT_EVENT_CHANNEL.to_owned(),
        }
    }

    pub fn from_config(emitter: E, config: &StoreConfig) -> Self {
        Self::new(emitter).with_event_channel(config.event_channel.clone())
    }

    pub fn with_event_channel(mut self, name: impl Into<String>) -> Self {
        self.event_channel = name.into();
        self
    }

    pub fn event_channel(&self) -> &str {
        &self.event_channel
    }

    /// Encode `emission` and send it. Encoding and transport failures are
    /// returned to the caller unrecovered.
    pub fn emit_to_backend(&self, emission: &Emission) -> Result<(), CoreError> {
        let payload = emission.to_wire()?;
        debug!(cmd = emission.kind(), channel = %self.event_channel, "emitting to backend");
        self.emitter.emit(&self.event_channel, payload)
    }
}

// ── In-process channel emitter ───────────────────────────────────────

/// One outbound message as it left the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub event: String,
    pub payload: String,
}

/// Emitter backed by an unbounded `mpsc` channel.
///
/// The receiving half stands in for the backend. Once it is dropped every
/// emit fails with [`CoreError::TransportClosed`].
#[derive(Debug, Clone)]
pub struct ChannelEmitter {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ChannelEmitter {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Emitter for ChannelEmitter {
    fn emit(&self, event: &str, payload: String) -> Result<(), CoreError> {
        self.tx
            .send(Outbound {
                event: event.to_owned(),
                payload,
            })
            .map_err(|_| CoreError::TransportClosed)
    }
}

// ── Line-oriented writer emitter ─────────────────────────────────────

/// Emitter writing one payload per line to any [`Write`].
///
/// A line transport has a single channel, so the event name is not
/// written.
pub struct WriterEmitter<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Emitter for WriterEmitter<W> {
    fn emit(&self, event: &str, payload: String) -> Result<(), CoreError> {
        trace!(event, bytes = payload.len(), "writing emission line");
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{payload}")
            .and_then(|()| writer.flush())
            .map_err(|e| CoreError::Transport {
                reason: e.to_string(),
            })
    }
}

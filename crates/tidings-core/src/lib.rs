//! Reactive client-side state layer for the tidings feed reader.
//!
//! The backend (feed fetching, persistence, refresh scheduling) runs out of
//! process and talks to the client over two independent one-way links.
//! This crate owns everything on the client side of those links:
//!
//! - **[`Emission`] / [`Reception`]**: The closed command and event
//!   vocabularies, with serde tagging matching the wire format.
//!
//! - **[`EmissionGateway`]**: Encodes commands and hands them to an
//!   [`Emitter`] (the shell's fire-and-forget send primitive).
//!
//! - **[`AppStore`]**: Channels, items, and the open-item selection,
//!   published as immutable [`Model`] snapshots through a `watch` channel.
//!
//! - **[`ToastStore`]**: One transient notification with a cancellable
//!   expiry timer.
//!
//! - **[`ReceptionBridge`]**: Decodes inbound wire text and routes each
//!   event to the stores.

pub mod bridge;
pub mod config;
pub mod error;
pub mod gateway;
pub mod message;
pub mod model;
pub mod store;
pub mod stream;
pub mod toast;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bridge::ReceptionBridge;
pub use config::StoreConfig;
pub use error::CoreError;
pub use gateway::{ChannelEmitter, EmissionGateway, Emitter, Outbound, WriterEmitter};
pub use message::{Emission, EventKind, Reception};
pub use model::{Channel, Id, Input, Item, Model};
pub use store::AppStore;
pub use stream::{SnapshotStream, Subscription};
pub use toast::{ToastData, ToastStore};

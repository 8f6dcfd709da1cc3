// ── Domain model ──
//
// Canonical types shared by the message vocabulary and the stores.
// Identifiers are minted by the backend; this crate never creates them.

mod channel;
mod input;
mod item;
mod state;

pub use channel::Channel;
pub use input::Input;
pub use item::Item;
pub use state::Model;

/// Backend-assigned entity identifier.
pub type Id = i64;

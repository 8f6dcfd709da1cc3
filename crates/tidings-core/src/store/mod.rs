// ── Reactive stores ──
//
// Snapshot-publishing containers. Each update computes a new immutable
// snapshot from the previous one and swaps it in atomically.

mod app_store;
mod observable;
mod updates;

pub use app_store::AppStore;
pub(crate) use observable::Observable;

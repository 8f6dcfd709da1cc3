// ── Message vocabulary ──
//
// Two closed sets of tagged variants: commands the client sends to the
// backend (`Emission`) and events the backend pushes back (`Reception`).
// The two directions are independent; nothing correlates a command with
// the events it eventually produces.

mod emission;
mod reception;

pub use emission::Emission;
pub use reception::{EventKind, Reception};

//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the `Session` aggregate
//! - `message`: transcript turns (`Turn`, `Speaker`, `RoutineKind`)
//! - `roleplay`: rehearsal sub-state (`RoleplayState`, `RoleplayLogEntry`)
//! - `intervention`: intervention log (`InterventionKind`, `InterventionEntry`)

mod intervention;
mod message;
mod model;
mod roleplay;

pub use intervention::{InterventionEntry, InterventionKind};
pub use message::{RoutineKind, Speaker, Turn, render_transcript};
pub use model::Session;
pub use roleplay::{RoleplayLogEntry, RoleplayState};

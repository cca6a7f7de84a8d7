//! Scenario slots gathered incrementally across a session.

mod slots;

pub use slots::{ScenarioSlots, SlotCandidates, SlotKey};

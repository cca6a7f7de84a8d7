use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum InterventionKind {
    /// Unsafe verdict routed to the safety routine.
    SafetyEscalation,
    /// Rehearsal started.
    RehearsalTrigger,
    /// Intensity above threshold routed to the safety routine.
    HighIntensityNotice,
}

/// Append-only intervention log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionEntry {
    pub kind: InterventionKind,
    pub description: String,
    /// Index of the user turn that caused it.
    pub turn_index: usize,
    pub timestamp: DateTime<Utc>,
}

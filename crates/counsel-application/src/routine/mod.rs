//! Routines that produce the system side of a turn.
//!
//! Each routine appends its output to the session transcript. Routing is
//! decided beforehand by `counsel_core::routing::DialogueRouter`; routines
//! never pick each other.
//!
//! # Module Structure
//!
//! - `safety`: fixed grounding script, no external calls
//! - `counselor`: default empathetic reply
//! - `rehearsal`: role-play entry, continuation and exit

mod counselor;
mod rehearsal;
mod safety;

pub use counselor::{COUNSELOR_FALLBACK, CounselorRoutine};
pub use rehearsal::{
    REHEARSAL_CLOSING, REHEARSAL_FALLBACK, REHEARSAL_LOG_WINDOW, RehearsalRoutine, RehearsalStep,
};
pub use safety::{GROUNDING_SCRIPT, HIGH_INTENSITY_NOTICE, SafetyRoutine};

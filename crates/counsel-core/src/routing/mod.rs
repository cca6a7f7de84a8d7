//! Turn-level routine selection.
//!
//! The decision is pure: it reads the session and the turn's verdict and
//! returns a [`Route`]. Executing the routine (and mutating the session) is
//! the caller's job.

mod route;
mod router;

pub use route::{Route, SafetyCause, TriggerReason};
pub use router::{
    DialogueRouter, EXIT_KEYWORDS, REHEARSAL_KEYWORDS, RoutingPolicy, is_exit_request,
    rehearsal_keyword,
};

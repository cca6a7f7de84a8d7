//! Risk cascade and safety verdicts.
//!
//! The [`RiskDetector`] is the final authority on whether a turn is unsafe.
//! An external classifier may supply the emotion label and intensity, but its
//! own risk flag is only recorded: `is_unsafe` is set exclusively by local
//! matches in the suicide or direct categories.

mod detector;
mod patterns;
mod verdict;

pub use detector::RiskDetector;
pub use patterns::{PatternSupplement, RiskCategory, builtin_patterns};
pub use verdict::{EmotionSignal, NEUTRAL_EMOTION, RiskSnippet, RiskVerdict};

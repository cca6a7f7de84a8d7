//! Session report model and quantitative aggregation.

mod aggregate;
mod model;

pub use aggregate::{HIGH_EMOTION_SCORE, TOP_KEYWORD_COUNT, emotion_summary, top_keywords};
pub use model::{
    CounselingSummary, EmotionSummary, HighEmotionMoment, Report, RoleplayDetails, SessionOverview,
};

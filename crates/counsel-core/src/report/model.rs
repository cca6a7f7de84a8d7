//! End-of-session report model.

use crate::scenario::ScenarioSlots;
use crate::session::{InterventionEntry, RoleplayLogEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOverview {
    pub session_id: String,
    /// Local compile time, `YYYY-MM-DD HH:MM`.
    pub datetime: String,
    /// Number of transcript turns.
    pub dialogue_length: usize,
    pub top_keywords: Vec<String>,
    pub safety_count: u32,
    pub rehearsal_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighEmotionMoment {
    /// Transcript index of the user turn.
    pub turn: usize,
    pub score: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionSummary {
    /// Sorted, unique emotion labels.
    pub tags: Vec<String>,
    /// Intensity per user turn, in turn order.
    pub score_trend: Vec<f32>,
    pub high_emotion_moments: Vec<HighEmotionMoment>,
}

/// Narrative part of the report, produced by the summarization service.
/// Empty when that call fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounselingSummary {
    #[serde(default)]
    pub topic_summary: String,
    #[serde(default)]
    pub emotional_flow: String,
    #[serde(default)]
    pub intervention_points: Vec<String>,
    #[serde(default)]
    pub repeated_patterns: String,
    #[serde(default)]
    pub session_end_reason: String,
}

fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| text_of(Some(v)))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

impl CounselingSummary {
    /// Reads a summarization response, tolerating wrong shapes.
    pub fn from_value(value: &Value) -> Self {
        let intervention_points = match value.get("intervention_points") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| text_of(Some(v)))
                .filter(|s| !s.is_empty())
                .collect(),
            other => Some(text_of(other)).filter(|s| !s.is_empty()).into_iter().collect(),
        };
        Self {
            topic_summary: text_of(value.get("topic_summary")),
            emotional_flow: text_of(value.get("emotional_flow")),
            intervention_points,
            repeated_patterns: text_of(value.get("repeated_patterns")),
            session_end_reason: text_of(value.get("session_end_reason")),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleplayDetails {
    pub scenario: ScenarioSlots,
    pub logs: Vec<RoleplayLogEntry>,
}

/// Structured end-of-session report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub session_overview: SessionOverview,
    pub emotion_summary: EmotionSummary,
    pub counseling_summary: CounselingSummary,
    pub interventions: Vec<InterventionEntry>,
    /// Present only when at least one rehearsal completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roleplay_details: Option<RoleplayDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_from_well_formed_value() {
        let summary = CounselingSummary::from_value(&json!({
            "topic_summary": "직장 스트레스",
            "emotional_flow": "불안에서 안정으로",
            "intervention_points": ["3번째 턴 역할극", "5번째 턴 호흡"],
            "repeated_patterns": "자기 비난",
            "session_end_reason": "사용자 종료"
        }));
        assert_eq!(summary.topic_summary, "직장 스트레스");
        assert_eq!(summary.intervention_points.len(), 2);
        assert!(!summary.is_empty());
    }

    #[test]
    fn test_summary_tolerates_wrong_shapes() {
        let summary = CounselingSummary::from_value(&json!({
            "topic_summary": null,
            "intervention_points": "한 번 있었음",
            "repeated_patterns": ["a", "b"],
            "session_end_reason": 3
        }));
        assert_eq!(summary.topic_summary, "");
        assert_eq!(summary.intervention_points, vec!["한 번 있었음".to_string()]);
        assert_eq!(summary.repeated_patterns, "a, b");
        assert_eq!(summary.session_end_reason, "3");
        assert!(CounselingSummary::from_value(&json!({})).is_empty());
    }
}

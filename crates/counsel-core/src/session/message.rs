//! Transcript turn types.

use crate::risk::RiskVerdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Speaker {
    User,
    /// Fixed text emitted by a routine (scripts, notices, closings).
    System,
    /// Text produced by the external generation service.
    Assistant,
}

/// Which routine produced a non-user turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoutineKind {
    Counselor,
    Safety,
    /// High-intensity notice preceding the safety script.
    Notice,
    RehearsalIntro,
    Rehearsal,
    RehearsalClosing,
}

/// One transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine: Option<RoutineKind>,
    pub content: String,
    /// Attached to user turns once evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<RiskVerdict>,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn user(content: impl Into<String>, verdict: RiskVerdict) -> Self {
        Self {
            speaker: Speaker::User,
            routine: None,
            content: content.into(),
            verdict: Some(verdict),
            timestamp: Utc::now(),
        }
    }

    pub fn system(routine: RoutineKind, content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::System,
            routine: Some(routine),
            content: content.into(),
            verdict: None,
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(routine: RoutineKind, content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            routine: Some(routine),
            content: content.into(),
            verdict: None,
            timestamp: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }
}

/// Renders turns as `speaker: content` lines for prompts.
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.speaker, t.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_transcript() {
        let turns = vec![
            Turn::user("안녕하세요", RiskVerdict::neutral()),
            Turn::assistant(RoutineKind::Counselor, "반가워요"),
        ];
        assert_eq!(render_transcript(&turns), "user: 안녕하세요\nassistant: 반가워요");
        assert!(turns[0].is_user());
        assert!(turns[0].verdict.is_some());
        assert_eq!(turns[1].routine, Some(RoutineKind::Counselor));
    }
}

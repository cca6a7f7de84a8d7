use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the safety routine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyCause {
    /// Local suicide/direct match.
    UnsafeVerdict,
    /// Only the intensity threshold fired.
    HighIntensity,
}

/// Why a rehearsal starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerReason {
    Keyword { keyword: String },
    Requested,
    Completeness { completeness: f32 },
}

impl fmt::Display for TriggerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword { keyword } => write!(f, "사용자 요청 기반 롤플레잉 (키워드: {keyword})"),
            Self::Requested => write!(f, "플래그 기반 롤플레잉"),
            Self::Completeness { completeness } => write!(
                f,
                "시나리오 완성도({}%) 기반 자동 롤플레잉",
                (completeness * 100.0).round() as u32
            ),
        }
    }
}

/// Routine chosen for one user turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    Safety { cause: SafetyCause },
    /// A rehearsal already in progress.
    RehearsalContinue,
    /// A fresh rehearsal.
    RehearsalStart { reason: TriggerReason },
    Default,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Safety { .. } => "safety",
            Self::RehearsalContinue | Self::RehearsalStart { .. } => "rehearsal",
            Self::Default => "default",
        }
    }

    pub fn is_rehearsal(&self) -> bool {
        matches!(self, Self::RehearsalContinue | Self::RehearsalStart { .. })
    }

    pub fn trigger_reason(&self) -> Option<&TriggerReason> {
        match self {
            Self::RehearsalStart { reason } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_display() {
        assert_eq!(
            TriggerReason::Completeness { completeness: 0.8333 }.to_string(),
            "시나리오 완성도(83%) 기반 자동 롤플레잉"
        );
        assert!(
            TriggerReason::Keyword {
                keyword: "역할극".into()
            }
            .to_string()
            .contains("역할극")
        );
    }

    #[test]
    fn test_route_names() {
        assert_eq!(Route::RehearsalContinue.name(), "rehearsal");
        assert!(Route::RehearsalStart {
            reason: TriggerReason::Requested
        }
        .is_rehearsal());
        assert_eq!(
            Route::Safety {
                cause: SafetyCause::HighIntensity
            }
            .name(),
            "safety"
        );
        assert_eq!(Route::Default.trigger_reason(), None);
    }
}

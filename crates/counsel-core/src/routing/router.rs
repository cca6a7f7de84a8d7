use super::route::{Route, SafetyCause, TriggerReason};
use crate::config::CounselConfig;
use crate::risk::RiskVerdict;
use crate::session::Session;

/// Words that request a rehearsal explicitly.
pub const REHEARSAL_KEYWORDS: &[&str] = &[
    "롤플",
    "롤플레",
    "상황극",
    "역할극",
    "대화연습",
    "면접 연습",
    "면접",
    "시뮬레이션",
    "시나리오",
];

/// Words that end an active rehearsal.
pub const EXIT_KEYWORDS: &[&str] = &["종료", "끝", "그만", "나가기"];

/// The first rehearsal keyword contained in `text`.
pub fn rehearsal_keyword(text: &str) -> Option<&'static str> {
    let text = text.trim().to_lowercase();
    REHEARSAL_KEYWORDS.iter().copied().find(|k| text.contains(k))
}

pub fn is_exit_request(text: &str) -> bool {
    let text = text.to_lowercase();
    EXIT_KEYWORDS.iter().any(|k| text.contains(k))
}

/// Tunables of the routing decision.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingPolicy {
    pub safety_threshold: f32,
    pub completeness_threshold: f32,
    pub auto_rehearsal: bool,
    pub min_user_turns: usize,
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self::from(&CounselConfig::default())
    }
}

impl From<&CounselConfig> for RoutingPolicy {
    fn from(config: &CounselConfig) -> Self {
        Self {
            safety_threshold: config.safety_threshold,
            completeness_threshold: config.completeness_threshold,
            auto_rehearsal: config.auto_rehearsal,
            min_user_turns: config.min_user_turns,
        }
    }
}

/// Per-turn routine selection.
///
/// Priority: safety, active rehearsal, rehearsal trigger, default.
#[derive(Debug, Clone, Default)]
pub struct DialogueRouter {
    policy: RoutingPolicy,
}

impl DialogueRouter {
    pub fn new(policy: RoutingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RoutingPolicy {
        &self.policy
    }

    /// Decides the route for the latest user turn.
    ///
    /// `session` must already contain that turn; it counts toward the
    /// minimum-turn gate.
    pub fn decide(&self, session: &Session, verdict: &RiskVerdict, text: &str) -> Route {
        if verdict.is_unsafe {
            return Route::Safety {
                cause: SafetyCause::UnsafeVerdict,
            };
        }
        if verdict.emotion_intensity > self.policy.safety_threshold {
            return Route::Safety {
                cause: SafetyCause::HighIntensity,
            };
        }

        if session.is_rehearsal_active() {
            return Route::RehearsalContinue;
        }

        match self.trigger(session, text) {
            Some(reason) => Route::RehearsalStart { reason },
            None => Route::Default,
        }
    }

    fn trigger(&self, session: &Session, text: &str) -> Option<TriggerReason> {
        if let Some(keyword) = rehearsal_keyword(text) {
            return Some(TriggerReason::Keyword {
                keyword: keyword.to_string(),
            });
        }
        if session.rehearsal_requested() {
            return Some(TriggerReason::Requested);
        }

        let completeness = session.completeness();
        let auto = self.policy.auto_rehearsal
            && completeness >= self.policy.completeness_threshold
            && session.rehearsal_count() == 0
            && !session.is_rehearsal_active()
            && session.user_turn_count() >= self.policy.min_user_turns;
        auto.then_some(TriggerReason::Completeness { completeness })
    }
}

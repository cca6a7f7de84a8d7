use super::model::{
    CounselingSummary, EmotionSummary, HighEmotionMoment, Report, RoleplayDetails, SessionOverview,
};
use crate::session::{Session, Turn};
use chrono::Local;
use std::collections::{BTreeSet, HashMap};

pub const TOP_KEYWORD_COUNT: usize = 10;
/// Intensity above which a user turn is a high-emotion moment.
pub const HIGH_EMOTION_SCORE: f32 = 0.7;

fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

/// Most frequent user tokens after punctuation stripping, most frequent
/// first; equal counts keep first-seen order.
pub fn top_keywords(turns: &[Turn], limit: usize) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for turn in turns.iter().filter(|t| t.is_user()) {
        let stripped = strip_punctuation(&turn.content);
        for token in stripped.to_lowercase().split_whitespace() {
            let count = counts.entry(token.to_string()).or_insert(0);
            if *count == 0 {
                order.push(token.to_string());
            }
            *count += 1;
        }
    }
    // stable sort keeps first-seen order among equal counts
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(limit);
    order
}

/// Emotion tags, score trend and high-emotion moments from user turns.
pub fn emotion_summary(turns: &[Turn]) -> EmotionSummary {
    let mut tags = BTreeSet::new();
    let mut score_trend = Vec::new();
    let mut high_emotion_moments = Vec::new();

    for (index, turn) in turns.iter().enumerate() {
        let Some(verdict) = turn.verdict.as_ref().filter(|_| turn.is_user()) else {
            continue;
        };
        tags.insert(verdict.emotion_label.clone());
        score_trend.push(verdict.emotion_intensity);
        if verdict.emotion_intensity > HIGH_EMOTION_SCORE {
            high_emotion_moments.push(HighEmotionMoment {
                turn: index,
                score: verdict.emotion_intensity,
                text: turn.content.clone(),
            });
        }
    }

    EmotionSummary {
        tags: tags.into_iter().collect(),
        score_trend,
        high_emotion_moments,
    }
}

impl Report {
    /// Aggregates the quantitative part of the report and combines it with
    /// the narrative `summary`.
    pub fn from_session(session: &Session, summary: CounselingSummary) -> Self {
        let turns = session.turns();
        let roleplay_details = (session.rehearsal_count() > 0).then(|| RoleplayDetails {
            scenario: session.slots().clone(),
            logs: session.roleplay().log().to_vec(),
        });

        Self {
            session_overview: SessionOverview {
                session_id: session.id.clone(),
                datetime: Local::now().format("%Y-%m-%d %H:%M").to_string(),
                dialogue_length: turns.len(),
                top_keywords: top_keywords(turns, TOP_KEYWORD_COUNT),
                safety_count: session.safety_count(),
                rehearsal_count: session.rehearsal_count(),
            },
            emotion_summary: emotion_summary(turns),
            counseling_summary: summary,
            interventions: session.interventions().to_vec(),
            roleplay_details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::{EmotionSignal, RiskDetector};
    use crate::session::RoutineKind;

    fn user_turn(text: &str, label: &str, score: f32) -> Turn {
        let signal = EmotionSignal::new(label, score, false);
        Turn::user(text, RiskDetector::new().evaluate(text, Some(&signal)))
    }

    #[test]
    fn test_top_keywords_strip_punctuation_and_rank() {
        let turns = vec![
            user_turn("회사가 힘들어요.", "불안", 0.3),
            Turn::assistant(RoutineKind::Counselor, "회사 회사 회사"),
            user_turn("회사가 싫어요! 정말 힘들어요", "분노", 0.5),
        ];
        let keywords = top_keywords(&turns, 10);
        assert_eq!(keywords[0], "회사가");
        assert_eq!(keywords[1], "힘들어요");
        assert_eq!(keywords.len(), 4);
        assert_eq!(top_keywords(&turns, 1), vec!["회사가".to_string()]);
    }

    #[test]
    fn test_emotion_summary() {
        let turns = vec![
            user_turn("괜찮아요", "중립", 0.2),
            Turn::system(RoutineKind::Safety, "호흡"),
            user_turn("너무 화나요", "분노", 0.9),
            user_turn("조금 나아요", "분노", 0.7),
        ];
        let summary = emotion_summary(&turns);
        assert_eq!(summary.tags, vec!["분노".to_string(), "중립".to_string()]);
        assert_eq!(summary.score_trend.len(), 3);
        assert_eq!(summary.high_emotion_moments.len(), 1);
        assert_eq!(summary.high_emotion_moments[0].turn, 2);
    }

    #[test]
    fn test_roleplay_details_only_after_rehearsal() {
        let mut session = Session::new();
        session.push_turn(user_turn("안녕", "중립", 0.1));
        let report = Report::from_session(&session, CounselingSummary::default());
        assert!(report.roleplay_details.is_none());
        assert_eq!(report.session_overview.dialogue_length, 1);

        session.complete_rehearsal();
        let report = Report::from_session(&session, CounselingSummary::default());
        assert!(report.roleplay_details.is_some());
        assert_eq!(report.session_overview.rehearsal_count, 1);
    }
}

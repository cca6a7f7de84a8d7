//! Retrieval scoring policy.
//!
//! Type classification: each type owns a disjoint keyword set; any hit adds
//! [`TYPE_KEYWORD_WEIGHT`] to that type. Future rehearsal gets a constant
//! [`FUTURE_BIAS`]. Template matching counts slot tokens that occur as
//! substrings of the template's match text.

use super::model::{Template, TemplateType};
use serde::Serialize;

pub const TYPE_KEYWORD_WEIGHT: u32 = 3;
pub const FUTURE_BIAS: u32 = 1;
/// Best template score below this means a synthesized template is used.
pub const MIN_TEMPLATE_SCORE: usize = 2;

/// Evaluation order; also the tie-break order.
pub const TYPE_PRIORITY: [TemplateType; 4] = [
    TemplateType::FutureRehearsal,
    TemplateType::PastReenactment,
    TemplateType::PerspectiveSwap,
    TemplateType::IdealSelf,
];

/// Keyword set of a rehearsal type.
pub fn type_keywords(kind: TemplateType) -> &'static [&'static str] {
    match kind {
        TemplateType::PastReenactment => &[
            "재현", "다시", "그때", "과거", "이미", "벌써", "상처", "트라우마",
        ],
        TemplateType::FutureRehearsal => &[
            "연습", "준비", "대비", "미래", "앞으로", "다음에", "확인하고", "말하고", "대화하고",
        ],
        TemplateType::PerspectiveSwap => &["이해", "생각", "입장", "관점", "바꿔", "상대방"],
        TemplateType::IdealSelf => &["되고", "바라는", "이상", "자신감", "효능감", "새로운"],
    }
}

/// Score per type for one situation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeScores {
    pub past: u32,
    pub future: u32,
    pub perspective: u32,
    pub ideal: u32,
}

impl TypeScores {
    pub fn get(&self, kind: TemplateType) -> u32 {
        match kind {
            TemplateType::PastReenactment => self.past,
            TemplateType::FutureRehearsal => self.future,
            TemplateType::PerspectiveSwap => self.perspective,
            TemplateType::IdealSelf => self.ideal,
        }
    }

    fn get_mut(&mut self, kind: TemplateType) -> &mut u32 {
        match kind {
            TemplateType::PastReenactment => &mut self.past,
            TemplateType::FutureRehearsal => &mut self.future,
            TemplateType::PerspectiveSwap => &mut self.perspective,
            TemplateType::IdealSelf => &mut self.ideal,
        }
    }

    /// Highest-scoring type; ties resolve by [`TYPE_PRIORITY`].
    pub fn winner(&self) -> TemplateType {
        let mut best = TYPE_PRIORITY[0];
        for kind in TYPE_PRIORITY.into_iter().skip(1) {
            if self.get(kind) > self.get(best) {
                best = kind;
            }
        }
        best
    }
}

/// Scores the four types against `text` (case-insensitive).
pub fn type_scores(text: &str) -> TypeScores {
    let text = text.to_lowercase();
    let mut scores = TypeScores {
        past: 0,
        future: FUTURE_BIAS,
        perspective: 0,
        ideal: 0,
    };
    for kind in TYPE_PRIORITY {
        if type_keywords(kind).iter().any(|k| text.contains(k)) {
            *scores.get_mut(kind) += TYPE_KEYWORD_WEIGHT;
        }
    }
    scores
}

/// Lowercased whitespace tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Number of `tokens` found inside the template's match text.
pub fn template_match_score(tokens: &[String], template: &Template) -> usize {
    let haystack = template.match_text();
    tokens.iter().filter(|t| haystack.contains(t.as_str())).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_keyword_sets_are_disjoint() {
        let mut seen = HashSet::new();
        for kind in TemplateType::iter() {
            for keyword in type_keywords(kind) {
                assert!(seen.insert(*keyword), "duplicate keyword {keyword}");
            }
        }
    }

    #[test]
    fn test_future_wins_without_keywords() {
        let scores = type_scores("친구 카페 속상함");
        assert_eq!(scores.future, 1);
        assert_eq!(scores.winner(), TemplateType::FutureRehearsal);
    }

    #[test]
    fn test_future_wins_tie_through_bias() {
        let scores = type_scores("그때 일을 앞으로 어떻게 말할지");
        assert_eq!(scores.past, 3);
        assert_eq!(scores.future, 4);
        assert_eq!(scores.winner(), TemplateType::FutureRehearsal);
    }

    #[test]
    fn test_non_future_tie_uses_priority_order() {
        let scores = type_scores("상처받은 기억, 그의 입장");
        assert_eq!(scores.past, 3);
        assert_eq!(scores.perspective, 3);
        assert_eq!(scores.winner(), TemplateType::PastReenactment);
    }

    #[test]
    fn test_each_set_counts_once() {
        let scores = type_scores("자신감 새로운 이상");
        assert_eq!(scores.ideal, TYPE_KEYWORD_WEIGHT);
        assert_eq!(scores.winner(), TemplateType::IdealSelf);
    }

    #[test]
    fn test_template_match_score_counts_tokens() {
        let template: Template = serde_json::from_value(serde_json::json!({
            "id": "TRIG-B-1",
            "title": "팀장님께 보고하기",
            "scene_setup": "회의실에서 팀장에게 실수를 말하는 장면",
            "preconditions": {"topic_tags": ["직장"]}
        }))
        .unwrap();
        let tokens = tokenize("팀장 회의실 직장 가족");
        assert_eq!(template_match_score(&tokens, &template), 3);
        assert_eq!(template_match_score(&[], &template), 0);
    }
}

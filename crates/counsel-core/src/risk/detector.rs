use super::patterns::{PatternSupplement, RiskCategory, builtin_patterns};
use super::verdict::{EmotionSignal, RiskSnippet, RiskVerdict};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;
use strum::IntoEnumIterator;

#[derive(Debug, Clone)]
struct CompiledCategory {
    category: RiskCategory,
    patterns: Vec<Regex>,
}

static BUILTIN_CASCADE: Lazy<Vec<CompiledCategory>> = Lazy::new(|| {
    RiskCategory::iter()
        .map(|category| CompiledCategory {
            category,
            patterns: compile_all(category, builtin_patterns(category).iter().copied()),
        })
        .collect()
});

fn compile(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source).case_insensitive(true).build()
}

fn compile_all<'a>(category: RiskCategory, sources: impl Iterator<Item = &'a str>) -> Vec<Regex> {
    sources
        .filter_map(|source| match compile(source) {
            Ok(regex) => Some(regex),
            Err(err) => {
                tracing::warn!(%category, pattern = source, "Skipping invalid risk pattern: {}", err);
                None
            }
        })
        .collect()
}

fn normalize_snippet(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Deterministic risk-phrase detector.
///
/// Holds the compiled cascade (built-in patterns plus any supplement) and
/// turns text plus an optional classifier signal into a [`RiskVerdict`].
/// Cloning is cheap; compiled regexes are shared.
#[derive(Debug, Clone)]
pub struct RiskDetector {
    cascade: Vec<CompiledCategory>,
}

impl Default for RiskDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskDetector {
    /// Detector with the built-in cascade only.
    pub fn new() -> Self {
        Self {
            cascade: BUILTIN_CASCADE.clone(),
        }
    }

    /// Detector with the built-in cascade extended by `supplement`.
    ///
    /// Invalid patterns are skipped with a warning.
    pub fn with_supplement(supplement: &PatternSupplement) -> Self {
        let mut detector = Self::new();
        if supplement.is_empty() {
            return detector;
        }
        for compiled in &mut detector.cascade {
            let extra = supplement.patterns_for(compiled.category);
            if extra.is_empty() {
                continue;
            }
            let added = compile_all(compiled.category, extra.into_iter());
            tracing::debug!(category = %compiled.category, count = added.len(), "Added supplementary risk patterns");
            compiled.patterns.extend(added);
        }
        detector
    }

    /// Total number of compiled patterns.
    pub fn pattern_count(&self) -> usize {
        self.cascade.iter().map(|c| c.patterns.len()).sum()
    }

    /// Runs the local cascade only.
    ///
    /// When a pattern carries a capture group, the first group is the snippet;
    /// otherwise the whole match is.
    pub fn scan(&self, text: &str) -> Vec<RiskSnippet> {
        let mut snippets = Vec::new();
        for compiled in &self.cascade {
            let mut seen: BTreeSet<String> = BTreeSet::new();
            for regex in &compiled.patterns {
                for caps in regex.captures_iter(text) {
                    let Some(found) = caps.get(1).or_else(|| caps.get(0)) else {
                        continue;
                    };
                    let snippet = normalize_snippet(found.as_str());
                    if snippet.is_empty() || !seen.insert(snippet.clone()) {
                        continue;
                    }
                    snippets.push(RiskSnippet {
                        category: compiled.category,
                        text: snippet,
                    });
                }
            }
        }
        snippets
    }

    /// Produces the verdict for one utterance.
    ///
    /// `signal` is the external classification, or `None` when the call
    /// failed. Only local suicide/direct matches make the verdict unsafe;
    /// the classifier contributes the emotion label and intensity.
    pub fn evaluate(&self, text: &str, signal: Option<&EmotionSignal>) -> RiskVerdict {
        let signal = signal.cloned().unwrap_or_else(EmotionSignal::neutral);
        let matched_snippets = self.scan(text);
        let matched_categories: BTreeSet<RiskCategory> =
            matched_snippets.iter().map(|s| s.category).collect();
        let is_unsafe = matched_categories.iter().any(|c| c.is_critical());

        if signal.flagged_unsafe && !is_unsafe {
            tracing::debug!("Classifier risk flag not corroborated by local cascade");
        }

        RiskVerdict {
            emotion_label: signal.label,
            emotion_intensity: signal.intensity,
            is_unsafe,
            matched_categories,
            matched_snippets,
            classifier_flagged_unsafe: signal.flagged_unsafe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calm() -> EmotionSignal {
        EmotionSignal::new("중립", 0.1, false)
    }

    #[test]
    fn test_direct_death_wish_is_unsafe() {
        let detector = RiskDetector::new();
        let verdict = detector.evaluate("요즘 너무 힘들어서 죽고 싶다", Some(&calm()));

        assert!(verdict.is_unsafe);
        assert!(verdict.has_category(RiskCategory::Direct));
        assert!(verdict.has_category(RiskCategory::Seed));
        assert_eq!(verdict.snippets_for(RiskCategory::Direct), vec!["죽고 싶다"]);
    }

    #[test]
    fn test_polite_ending_matches() {
        let verdict = RiskDetector::new().evaluate("정말 죽고 싶어요", None);
        assert!(verdict.is_unsafe);
        assert!(verdict.has_category(RiskCategory::Direct));
    }

    #[test]
    fn test_connective_ending_does_not_match_direct() {
        let verdict = RiskDetector::new().evaluate("죽고 싶어서 그런 건 아니고", None);
        assert!(!verdict.has_category(RiskCategory::Direct));
    }

    #[test]
    fn test_unsafe_regardless_of_classifier() {
        let detector = RiskDetector::new();
        let dismissive = EmotionSignal::new("기쁨", 0.0, false);
        assert!(detector.evaluate("자살 생각이 나요", Some(&dismissive)).is_unsafe);
        assert!(detector.evaluate("자살 생각이 나요", None).is_unsafe);
    }

    #[test]
    fn test_bare_suicide_word_uses_guarded_snippet() {
        let verdict = RiskDetector::new().evaluate("자살.", None);
        assert!(verdict.is_unsafe);
        assert_eq!(verdict.snippets_for(RiskCategory::Suicide), vec!["자살"]);
    }

    #[test]
    fn test_compound_word_is_not_suicide() {
        let verdict = RiskDetector::new().evaluate("어제 경기에서 자살골을 넣었어", None);
        assert!(!verdict.has_category(RiskCategory::Suicide));
        assert!(!verdict.is_unsafe);
    }

    #[test]
    fn test_self_denigration_is_recorded_but_safe() {
        let verdict = RiskDetector::new().evaluate("나는 쓸모없어", Some(&calm()));
        assert!(!verdict.is_unsafe);
        assert!(verdict.has_category(RiskCategory::SelfDenigrate));
        assert_eq!(verdict.primary_category(), Some(RiskCategory::SelfDenigrate));
    }

    #[test]
    fn test_hopelessness_is_safe() {
        let verdict = RiskDetector::new().evaluate("이제 희망이 없어요", None);
        assert!(verdict.has_category(RiskCategory::Indirect));
        assert!(!verdict.is_unsafe);
    }

    #[test]
    fn test_classifier_flag_alone_is_advisory() {
        let alarmed = EmotionSignal::new("슬픔", 0.9, true);
        let verdict = RiskDetector::new().evaluate("오늘 하루가 길었어요", Some(&alarmed));

        assert!(!verdict.is_unsafe);
        assert!(verdict.classifier_flagged_unsafe);
        assert!(verdict.is_uncorroborated_flag());
        assert_eq!(verdict.emotion_label, "슬픔");
        assert!((verdict.emotion_intensity - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_no_match_low_intensity_is_safe() {
        let verdict = RiskDetector::new().evaluate("오늘은 날씨가 좋네요", Some(&calm()));
        assert!(!verdict.is_unsafe);
        assert!(verdict.matched_categories.is_empty());
        assert!(verdict.matched_snippets.is_empty());
    }

    #[test]
    fn test_failed_classifier_defaults_to_neutral() {
        let verdict = RiskDetector::new().evaluate("그냥 그래요", None);
        assert_eq!(verdict.emotion_label, "중립");
        assert_eq!(verdict.emotion_intensity, 0.0);
    }

    #[test]
    fn test_snippets_are_normalized_and_deduplicated() {
        let verdict = RiskDetector::new().evaluate("죽고   싶다. 죽고 싶다", None);
        assert_eq!(verdict.snippets_for(RiskCategory::Direct), vec!["죽고 싶다"]);
    }

    #[test]
    fn test_supplement_categories() {
        let supplement = PatternSupplement {
            by_category: vec![(RiskCategory::Suicide, vec![r"극단적\s*선택".into()])],
            uncategorized: vec![r"힘들어\s*죽겠".into(), "(".into()],
        };
        let detector = RiskDetector::with_supplement(&supplement);
        assert_eq!(detector.pattern_count(), RiskDetector::new().pattern_count() + 2);

        let verdict = detector.evaluate("요즘 힘들어 죽겠어", None);
        assert!(verdict.has_category(RiskCategory::Supplementary));
        assert!(!verdict.is_unsafe);

        let verdict = detector.evaluate("극단적 선택을 고민했어", None);
        assert!(verdict.has_category(RiskCategory::Suicide));
        assert!(verdict.is_unsafe);
    }
}

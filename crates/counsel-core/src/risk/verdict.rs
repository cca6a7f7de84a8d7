use super::RiskCategory;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Label used when the classifier is unavailable or silent.
pub const NEUTRAL_EMOTION: &str = "중립";

/// Advisory classification of one utterance from the external service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionSignal {
    pub label: String,
    /// Clamped to [0, 1].
    pub intensity: f32,
    /// The classifier's own risk flag. Recorded, never decisive.
    pub flagged_unsafe: bool,
}

impl Default for EmotionSignal {
    fn default() -> Self {
        Self::neutral()
    }
}

impl EmotionSignal {
    pub fn neutral() -> Self {
        Self {
            label: NEUTRAL_EMOTION.to_string(),
            intensity: 0.0,
            flagged_unsafe: false,
        }
    }

    pub fn new(label: impl Into<String>, intensity: f32, flagged_unsafe: bool) -> Self {
        let label = label.into();
        Self {
            label: if label.trim().is_empty() {
                NEUTRAL_EMOTION.to_string()
            } else {
                label.trim().to_string()
            },
            intensity: clamp_intensity(intensity),
            flagged_unsafe,
        }
    }

    /// Reads a classifier response object.
    ///
    /// Accepts `emotion_class`/`emotion_label`, `emotion_score`/
    /// `emotion_intensity` and `extreme`/`is_unsafe`. Scores given as
    /// strings are parsed; anything unusable falls back to neutral values.
    pub fn from_value(value: &Value) -> Self {
        let label = value
            .get("emotion_class")
            .or_else(|| value.get("emotion_label"))
            .and_then(Value::as_str)
            .unwrap_or(NEUTRAL_EMOTION);

        let intensity = value
            .get("emotion_score")
            .or_else(|| value.get("emotion_intensity"))
            .and_then(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            })
            .unwrap_or(0.0) as f32;

        let flagged_unsafe = value
            .get("extreme")
            .or_else(|| value.get("is_unsafe"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Self::new(label, intensity, flagged_unsafe)
    }
}

fn clamp_intensity(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// One matched substring of the risk cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSnippet {
    pub category: RiskCategory,
    /// Whitespace runs collapsed to one space, trimmed.
    pub text: String,
}

/// Per-turn safety verdict. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskVerdict {
    pub emotion_label: String,
    pub emotion_intensity: f32,
    /// True iff a suicide or direct pattern matched locally.
    pub is_unsafe: bool,
    pub matched_categories: BTreeSet<RiskCategory>,
    /// Unique per (category, text), in cascade order.
    pub matched_snippets: Vec<RiskSnippet>,
    /// What the external classifier said about risk, kept for audit.
    pub classifier_flagged_unsafe: bool,
}

impl RiskVerdict {
    /// A verdict with no matches and a neutral emotion.
    pub fn neutral() -> Self {
        Self {
            emotion_label: NEUTRAL_EMOTION.to_string(),
            emotion_intensity: 0.0,
            is_unsafe: false,
            matched_categories: BTreeSet::new(),
            matched_snippets: Vec::new(),
            classifier_flagged_unsafe: false,
        }
    }

    pub fn has_category(&self, category: RiskCategory) -> bool {
        self.matched_categories.contains(&category)
    }

    /// The most severe matched category.
    pub fn primary_category(&self) -> Option<RiskCategory> {
        self.matched_categories
            .iter()
            .copied()
            .min_by_key(|c| c.severity_rank())
    }

    /// Sorted unique snippets from the critical categories.
    pub fn critical_terms(&self) -> Vec<String> {
        let terms: BTreeSet<&str> = self
            .matched_snippets
            .iter()
            .filter(|s| s.category.is_critical())
            .map(|s| s.text.as_str())
            .collect();
        terms.into_iter().map(str::to_string).collect()
    }

    /// Snippet texts of one category, in match order.
    pub fn snippets_for(&self, category: RiskCategory) -> Vec<&str> {
        self.matched_snippets
            .iter()
            .filter(|s| s.category == category)
            .map(|s| s.text.as_str())
            .collect()
    }

    /// True when the classifier raised a flag the local cascade did not back.
    pub fn is_uncorroborated_flag(&self) -> bool {
        self.classifier_flagged_unsafe && !self.is_unsafe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_signal_clamps_and_rejects_non_finite() {
        assert_eq!(EmotionSignal::new("분노", 1.7, false).intensity, 1.0);
        assert_eq!(EmotionSignal::new("분노", -0.3, false).intensity, 0.0);
        assert_eq!(EmotionSignal::new("분노", f32::NAN, false).intensity, 0.0);
        assert_eq!(EmotionSignal::new("분노", f32::INFINITY, false).intensity, 0.0);
    }

    #[test]
    fn test_signal_blank_label_is_neutral() {
        assert_eq!(EmotionSignal::new("  ", 0.4, false).label, NEUTRAL_EMOTION);
    }

    #[test]
    fn test_signal_from_value_accepts_aliases() {
        let signal = EmotionSignal::from_value(&json!({
            "emotion_label": "불안",
            "emotion_intensity": "0.65",
            "is_unsafe": true
        }));
        assert_eq!(signal.label, "불안");
        assert!((signal.intensity - 0.65).abs() < f32::EPSILON);
        assert!(signal.flagged_unsafe);

        let empty = EmotionSignal::from_value(&json!({}));
        assert_eq!(empty, EmotionSignal::neutral());
    }

    #[test]
    fn test_primary_category_and_critical_terms() {
        let mut verdict = RiskVerdict::neutral();
        verdict.matched_categories =
            [RiskCategory::Seed, RiskCategory::Direct, RiskCategory::Indirect]
                .into_iter()
                .collect();
        verdict.matched_snippets = vec![
            RiskSnippet {
                category: RiskCategory::Seed,
                text: "죽고 싶다".into(),
            },
            RiskSnippet {
                category: RiskCategory::Direct,
                text: "죽고 싶다".into(),
            },
        ];
        assert_eq!(verdict.primary_category(), Some(RiskCategory::Direct));
        assert_eq!(verdict.critical_terms(), vec!["죽고 싶다".to_string()]);
        assert_eq!(verdict.snippets_for(RiskCategory::Seed), vec!["죽고 싶다"]);
        assert_eq!(RiskVerdict::neutral().primary_category(), None);
    }
}

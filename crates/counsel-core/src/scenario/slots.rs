use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

/// One of the six scenario facts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SlotKey {
    Event,
    Character,
    Place,
    Emotion,
    Cause,
    Goal,
}

impl SlotKey {
    pub const COUNT: usize = 6;

    /// Parses a key name as used by extraction responses. `why` is accepted
    /// for [`SlotKey::Cause`].
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "event" => Some(Self::Event),
            "character" => Some(Self::Character),
            "place" => Some(Self::Place),
            "emotion" => Some(Self::Emotion),
            "cause" | "why" => Some(Self::Cause),
            "goal" => Some(Self::Goal),
            _ => None,
        }
    }
}

/// Candidate slot values from one extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotCandidates(BTreeMap<SlotKey, String>);

impl SlotCandidates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: SlotKey, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a candidate. Blank values are dropped; when two names map to
    /// the same key the longer value wins.
    pub fn insert(&mut self, key: SlotKey, value: impl Into<String>) {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return;
        }
        match self.0.get(&key) {
            Some(existing) if existing.chars().count() >= value.chars().count() => {}
            _ => {
                self.0.insert(key, value);
            }
        }
    }

    pub fn get(&self, key: SlotKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Reads an extraction response object.
    ///
    /// Unknown keys, nulls and empty strings are ignored; numbers and
    /// booleans are stringified.
    pub fn from_value(value: &Value) -> Self {
        let mut candidates = Self::new();
        let Some(object) = value.as_object() else {
            return candidates;
        };
        for (name, raw) in object {
            let Some(key) = SlotKey::parse(name) else {
                continue;
            };
            let text = match raw {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            candidates.insert(key, text);
        }
        candidates
    }
}

/// The scenario facts gathered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSlots {
    pub event: Option<String>,
    pub character: Option<String>,
    pub place: Option<String>,
    pub emotion: Option<String>,
    pub cause: Option<String>,
    pub goal: Option<String>,
}

impl ScenarioSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: SlotKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    fn slot(&self, key: SlotKey) -> &Option<String> {
        match key {
            SlotKey::Event => &self.event,
            SlotKey::Character => &self.character,
            SlotKey::Place => &self.place,
            SlotKey::Emotion => &self.emotion,
            SlotKey::Cause => &self.cause,
            SlotKey::Goal => &self.goal,
        }
    }

    fn slot_mut(&mut self, key: SlotKey) -> &mut Option<String> {
        match key {
            SlotKey::Event => &mut self.event,
            SlotKey::Character => &mut self.character,
            SlotKey::Place => &mut self.place,
            SlotKey::Emotion => &mut self.emotion,
            SlotKey::Cause => &mut self.cause,
            SlotKey::Goal => &mut self.goal,
        }
    }

    /// Offers one candidate. It replaces the current value only when it is
    /// strictly longer (in chars); returns whether the slot changed.
    pub fn offer(&mut self, key: SlotKey, candidate: &str) -> bool {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return false;
        }
        let slot = self.slot_mut(key);
        let improves = match slot.as_deref() {
            Some(current) => candidate.chars().count() > current.chars().count(),
            None => true,
        };
        if improves {
            *slot = Some(candidate.to_string());
        }
        improves
    }

    /// Merges an extraction result; returns the keys that changed.
    pub fn merge(&mut self, candidates: &SlotCandidates) -> Vec<SlotKey> {
        candidates
            .iter()
            .filter_map(|(key, value)| self.offer(key, value).then_some(key))
            .collect()
    }

    pub fn is_filled(&self, key: SlotKey) -> bool {
        self.get(key).is_some_and(|v| !v.trim().is_empty())
    }

    pub fn filled_count(&self) -> usize {
        SlotKey::iter().filter(|k| self.is_filled(*k)).count()
    }

    /// Filled slots / 6.
    pub fn completeness(&self) -> f32 {
        self.filled_count() as f32 / SlotKey::COUNT as f32
    }

    /// Filled slots in key order.
    pub fn filled(&self) -> Vec<(SlotKey, &str)> {
        SlotKey::iter()
            .filter_map(|k| self.get(k).filter(|v| !v.trim().is_empty()).map(|v| (k, v)))
            .collect()
    }

    /// All filled values joined by a space.
    pub fn combined_text(&self) -> String {
        self.filled()
            .into_iter()
            .map(|(_, v)| v)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_longer_candidate_replaces() {
        let mut slots = ScenarioSlots::new();
        assert!(slots.offer(SlotKey::Event, "갈등"));
        assert!(slots.offer(SlotKey::Event, "친구와의 갈등"));
        assert_eq!(slots.get(SlotKey::Event), Some("친구와의 갈등"));
    }

    #[test]
    fn test_shorter_equal_or_empty_candidate_is_rejected() {
        let mut slots = ScenarioSlots::new();
        slots.offer(SlotKey::Place, "학교 앞 카페");
        assert!(!slots.offer(SlotKey::Place, "카페"));
        assert!(!slots.offer(SlotKey::Place, "회사 앞 식당"));
        assert!(!slots.offer(SlotKey::Place, "   "));
        assert_eq!(slots.get(SlotKey::Place), Some("학교 앞 카페"));
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let mut slots = ScenarioSlots::new();
        slots.offer(SlotKey::Character, "친구");
        // 3 ASCII chars beat 2 Hangul chars (6 bytes)
        assert!(slots.offer(SlotKey::Character, "Tom"));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let candidates = SlotCandidates::new()
            .with(SlotKey::Event, "면접 상황")
            .with(SlotKey::Goal, "침착하게 답변하기");
        let mut slots = ScenarioSlots::new();

        assert_eq!(slots.merge(&candidates), vec![SlotKey::Event, SlotKey::Goal]);
        let snapshot = slots.clone();
        assert!(slots.merge(&candidates).is_empty());
        assert_eq!(slots, snapshot);
    }

    #[test]
    fn test_completeness_tracks_filled_count() {
        let mut slots = ScenarioSlots::new();
        assert_eq!(slots.completeness(), 0.0);
        let mut last = 0.0;
        for (i, key) in SlotKey::iter().enumerate() {
            slots.offer(key, "값");
            let c = slots.completeness();
            assert!(c >= last);
            assert_eq!(c, (i + 1) as f32 / 6.0);
            last = c;
        }
        assert_eq!(slots.completeness(), 1.0);
    }

    #[test]
    fn test_candidates_from_value() {
        let candidates = SlotCandidates::from_value(&json!({
            "event": "친구와의 갈등",
            "why": "내 실수를 놀려서",
            "place": null,
            "emotion": "",
            "goal": 3,
            "unknown": "ignored"
        }));
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates.get(SlotKey::Cause), Some("내 실수를 놀려서"));
        assert_eq!(candidates.get(SlotKey::Goal), Some("3"));
        assert_eq!(candidates.get(SlotKey::Place), None);
    }

    #[test]
    fn test_cause_alias_keeps_longer_value() {
        let candidates = SlotCandidates::from_value(&json!({
            "cause": "놀림",
            "why": "내 실수를 다른 사람에게 말해서"
        }));
        assert_eq!(
            candidates.get(SlotKey::Cause),
            Some("내 실수를 다른 사람에게 말해서")
        );
    }

    #[test]
    fn test_combined_text_in_key_order() {
        let mut slots = ScenarioSlots::new();
        slots.offer(SlotKey::Goal, "사과 받기");
        slots.offer(SlotKey::Event, "다툼");
        assert_eq!(slots.combined_text(), "다툼 사과 받기");
    }
}

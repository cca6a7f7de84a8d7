//! Built-in risk pattern catalog.
//!
//! Patterns are Korean-language regexes grouped by category. The `regex`
//! crate has no look-around, so boundary guards are written as non-capturing
//! groups around a single capture group; when a pattern has a capture group,
//! the group (not the whole match) is the reported snippet.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Category tag of the risk cascade.
///
/// Declaration order is cascade order. Only [`RiskCategory::Suicide`] and
/// [`RiskCategory::Direct`] can make a verdict unsafe.
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
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskCategory {
    /// Broad, low-precision distress phrasing.
    Seed,
    /// First-person direct death wish.
    Direct,
    /// Hopelessness, "better off gone".
    Indirect,
    /// Explicit suicide-intent vocabulary.
    Suicide,
    /// First-person self-devaluation.
    SelfDenigrate,
    /// Devaluation of others (tone only).
    OtherDenigrate,
    /// Operator-supplied patterns without a category.
    Supplementary,
}

impl RiskCategory {
    /// Whether a match in this category makes a verdict unsafe.
    pub fn is_critical(self) -> bool {
        matches!(self, Self::Suicide | Self::Direct)
    }

    /// Reporting priority (lower is more severe).
    pub fn severity_rank(self) -> u8 {
        match self {
            Self::Suicide => 0,
            Self::Direct => 1,
            Self::SelfDenigrate => 2,
            Self::OtherDenigrate => 3,
            Self::Indirect => 4,
            Self::Seed => 5,
            Self::Supplementary => 6,
        }
    }
}

// Verb endings: plain (다), casual (어), polite (어요/요).
const SEED_PATTERNS: &[&str] = &[
    r"죽\s*고\s*싶(?:다|어요|어|요)\b",
    r"사라지\s*고\s*싶(?:다|어요|어|요)\b|사라졌\s*으면\s*좋겠(?:다|어요|어|요)",
    r"(?:다\s*)?끝내(?:고|버리)?\s*싶(?:다|어요|어|요)\b",
    r"없어졌\s*으면\s*좋겠(?:다|어요|어|요)",
    r"자해(?:하|했|할)\w*|손목\s*긋|피\s*흘리",
];

const DIRECT_PATTERNS: &[&str] = &[
    r"죽\s*고\s*싶(?:다|어요|어|요)\b",
    r"차라리\s*죽(?:었\s*으면|는\s*게)\s*좋겠(?:다|어요|어|요)\b",
    r"죽어야\s*편해(?:질|지)\s*것\s*같(?:다|아요|아|어요|어)\b",
];

const INDIRECT_PATTERNS: &[&str] = &[
    r"(?:살|사는\s*게)\s*의미(?:가)?\s*없(?:다|어요|어|요)\b",
    r"희망(?:이)?\s*없(?:다|어요|어|요)\b",
    r"가망(?:이)?\s*없(?:다|어요|어|요)\b",
    r"(?:내가|나는?)\s*없어지(?:는\s*게|는\s*것이?|면)\s*낫겠(?:다|어요|어|요)\b",
    r"없어졌\s*으면\s*좋겠(?:다|어요|어|요)\b",
    r"살아(?:가)?\s*기\s*싫(?:다|어요|어|요)\b",
    r"(?:다\s*)?끝내(?:고|버리)?\s*싶(?:다|어요|어|요)\b",
];

const SUICIDE_PATTERNS: &[&str] = &[
    // bare word, not part of a larger compound
    r"(?:^|[^가-힣A-Za-z0-9])(자살)(?:$|[^가-힣A-Za-z0-9])",
    r"자살\s*(?:하|할|하고|했고|하려)\w*",
    r"자살\s*하\s*고\s*싶(?:다|어요|어|요)\b",
    r"자살\s*할래\b|자살\s*생각\w*|자살\s*충동\w*",
    r"자살\s*마렵\w*",
    r"목숨(?:을)?\s*끊\w*|생(?:을)?\s*마감\w*",
    r"(?:뛰어내리|투신|목\s*매|목을\s*매)\w*",
];

const SELF_DENIGRATE_PATTERNS: &[&str] = &[
    r"(?:나는|난)\s*(?:병신|멍청(?:이)?|쓰레기|쓸모없(?:어|다)?|가치없(?:어|다)?|형편없(?:어|다)?)\s*(?:이야|야|다|이네요|이네|입니다|임)?",
    r"(?:나는|난)\s*(?:쓸모|가치)\s*없(?:어|다)?",
    r"나(?:는)?\s*같은\s*건\s*없어져야\s*해",
];

const OTHER_DENIGRATE_PATTERNS: &[&str] = &[
    r"(?:너|당신|쟤|걔|그놈|그년|저놈|저년|저 자식|저 사람|그 사람|새끼|놈|년|애|니들|너희|너네)\s*(?:은|는|이|가|을|를)?\s*(?:병신|멍청(?:이)?|쓰레기|형편없(?:어|다)?|쓸모없(?:어|다)?|가치없(?:어|다)?)\w*",
    r"[가-힣]{2,}\s*(?:은|는|이|가)?\s*(?:병신|멍청(?:이)?|쓰레기|형편없(?:어|다)?|쓸모없(?:어|다)?|가치없(?:어|다)?)\w*",
];

/// Returns the built-in pattern sources for a category.
pub fn builtin_patterns(category: RiskCategory) -> &'static [&'static str] {
    match category {
        RiskCategory::Seed => SEED_PATTERNS,
        RiskCategory::Direct => DIRECT_PATTERNS,
        RiskCategory::Indirect => INDIRECT_PATTERNS,
        RiskCategory::Suicide => SUICIDE_PATTERNS,
        RiskCategory::SelfDenigrate => SELF_DENIGRATE_PATTERNS,
        RiskCategory::OtherDenigrate => OTHER_DENIGRATE_PATTERNS,
        RiskCategory::Supplementary => &[],
    }
}

/// Operator-supplied patterns merged into the cascade at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSupplement {
    /// Patterns appended to named categories.
    pub by_category: Vec<(RiskCategory, Vec<String>)>,
    /// Patterns without a category; recorded as [`RiskCategory::Supplementary`].
    pub uncategorized: Vec<String>,
}

impl PatternSupplement {
    pub fn is_empty(&self) -> bool {
        self.uncategorized.is_empty() && self.by_category.iter().all(|(_, p)| p.is_empty())
    }

    /// Patterns for one category, in insertion order.
    pub fn patterns_for(&self, category: RiskCategory) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .by_category
            .iter()
            .filter(|(c, _)| *c == category)
            .flat_map(|(_, p)| p.iter().map(String::as_str))
            .collect();
        if category == RiskCategory::Supplementary {
            out.extend(self.uncategorized.iter().map(String::as_str));
        }
        out
    }
}

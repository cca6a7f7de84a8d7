//! Rehearsal template domain model.
//!
//! Templates are loaded from JSON files and are read-only afterward. The
//! on-disk field names (`scene_setup`, `rp_agent_role`, `preconditions`) are
//! kept so existing template files load unchanged.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

/// Behavioral mode of a rehearsal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TemplateType {
    /// Type A: replay a past situation safely from another angle.
    PastReenactment,
    /// Type B: practice an upcoming situation.
    FutureRehearsal,
    /// Type C: step into the counterpart's shoes.
    PerspectiveSwap,
    /// Type D: act as the self one wants to be.
    IdealSelf,
}

impl TemplateType {
    /// Single-letter code used in identifiers.
    pub fn code(self) -> char {
        match self {
            Self::PastReenactment => 'A',
            Self::FutureRehearsal => 'B',
            Self::PerspectiveSwap => 'C',
            Self::IdealSelf => 'D',
        }
    }

    /// Identifier prefix of catalog templates of this type.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::PastReenactment => "TRIG-A-",
            Self::FutureRehearsal => "TRIG-B-",
            Self::PerspectiveSwap => "TRIG-C-",
            Self::IdealSelf => "SELF-D",
        }
    }

    /// Identifier given to synthesized templates of this type.
    pub fn generated_id(self) -> String {
        format!("GENERATED-{}", self.code())
    }

    /// Resolves the type from a catalog or synthesized identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|t| id.starts_with(t.id_prefix()) || id == t.generated_id())
    }

    /// Short description shown when a rehearsal starts.
    pub fn description(self) -> &'static str {
        match self {
            Self::PastReenactment => "과거 상황 재현 (상처가 된 장면을 다른 관점에서 바라보기)",
            Self::FutureRehearsal => "미래 상황 연습 (어려운 상황을 미리 연습하며 자신감 기르기)",
            Self::PerspectiveSwap => "관계 역할 바꾸기 (상대방 입장에서 생각하며 공감하기)",
            Self::IdealSelf => "이상적 자아 연습 (되고 싶은 모습으로 행동하며 자기효능감 높이기)",
        }
    }
}

fn default_counterpart() -> String {
    "상대방".to_string()
}

fn default_user_role() -> String {
    "본인".to_string()
}

/// Who plays whom in a rehearsal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRoles {
    /// Role played by the system.
    #[serde(rename = "rp_agent_role", alias = "counterpart", default = "default_counterpart")]
    pub counterpart: String,
    /// Role played by the user.
    #[serde(default = "default_user_role")]
    pub user_role: String,
}

impl Default for TemplateRoles {
    fn default() -> Self {
        Self {
            counterpart: default_counterpart(),
            user_role: default_user_role(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePreconditions {
    #[serde(default)]
    pub topic_tags: Vec<String>,
}

/// A rehearsal scenario template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Scene description presented to the user.
    #[serde(default)]
    pub scene_setup: String,
    #[serde(default)]
    pub roles: TemplateRoles,
    #[serde(default)]
    pub preconditions: TemplatePreconditions,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl Template {
    /// Type derived from the identifier, if it has a known prefix.
    pub fn kind(&self) -> Option<TemplateType> {
        TemplateType::from_id(&self.id)
    }

    pub fn is_synthesized(&self) -> bool {
        self.id.starts_with("GENERATED-")
    }

    pub fn topic_tags(&self) -> &[String] {
        &self.preconditions.topic_tags
    }

    /// Lowercased title, scene and topic tags; the text slot tokens are
    /// matched against.
    pub fn match_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.title.as_str(), self.scene_setup.as_str()];
        parts.extend(self.topic_tags().iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }
}

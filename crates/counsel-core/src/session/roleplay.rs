//! Rehearsal sub-state.

use crate::template::{Template, TemplateType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One rehearsal exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleplayLogEntry {
    pub turn: u32,
    /// What the user said this turn (absent for the introduction).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_text: Option<String>,
    /// Role that produced `text`.
    pub speaker: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// State of the rehearsal routine for one session.
///
/// The log outlives [`RoleplayState::finish`] so the report can include it;
/// it is cleared on the next [`RoleplayState::begin`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleplayState {
    pub active: bool,
    pub turn_counter: u32,
    pub counterpart_role: String,
    pub user_role: String,
    pub situation_text: String,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub template_type: Option<TemplateType>,
    log: Vec<RoleplayLogEntry>,
}

impl Default for RoleplayState {
    fn default() -> Self {
        Self {
            active: false,
            turn_counter: 0,
            counterpart_role: "상대방".to_string(),
            user_role: "본인".to_string(),
            situation_text: String::new(),
            template_id: None,
            template_type: None,
            log: Vec::new(),
        }
    }
}

impl RoleplayState {
    /// Starts a fresh rehearsal from `template`.
    pub fn begin(&mut self, template: &Template, situation_text: impl Into<String>) {
        self.active = true;
        self.turn_counter = 0;
        self.counterpart_role = template.roles.counterpart.clone();
        self.user_role = template.roles.user_role.clone();
        self.situation_text = situation_text.into();
        self.template_id = Some(template.id.clone());
        self.template_type = template.kind();
        self.log.clear();
    }

    /// Records one rehearsal turn and advances the counter.
    pub fn record(&mut self, user_text: Option<&str>, speaker: impl Into<String>, text: impl Into<String>) {
        self.turn_counter += 1;
        self.log.push(RoleplayLogEntry {
            turn: self.turn_counter,
            user_text: user_text.map(str::to_string),
            speaker: speaker.into(),
            text: text.into(),
            timestamp: Utc::now(),
        });
    }

    pub fn finish(&mut self) {
        self.active = false;
    }

    pub fn log(&self) -> &[RoleplayLogEntry] {
        &self.log
    }

    /// The last `n` log entries, oldest first.
    pub fn recent_log(&self, n: usize) -> &[RoleplayLogEntry] {
        let start = self.log.len().saturating_sub(n);
        &self.log[start..]
    }
}

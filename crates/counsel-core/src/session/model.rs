//! Session aggregate.
//!
//! Every field has one mutation path: turns through [`Session::push_turn`],
//! slots through [`Session::merge_slots`], interventions through
//! [`Session::log_intervention`], the rehearsal sub-state through
//! [`RoleplayState`]'s own methods.

use super::intervention::{InterventionEntry, InterventionKind};
use super::message::Turn;
use super::roleplay::RoleplayState;
use crate::report::Report;
use crate::scenario::{ScenarioSlots, SlotCandidates, SlotKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One counseling conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    turns: Vec<Turn>,
    safety_count: u32,
    rehearsal_count: u32,
    slots: ScenarioSlots,
    roleplay: RoleplayState,
    interventions: Vec<InterventionEntry>,
    /// One-shot rehearsal trigger.
    rehearsal_requested: bool,
    /// Free-text topic from a manual trigger.
    rehearsal_topic: Option<String>,
    report: Option<Report>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            created_at: Utc::now(),
            turns: Vec::new(),
            safety_count: 0,
            rehearsal_count: 0,
            slots: ScenarioSlots::default(),
            roleplay: RoleplayState::default(),
            interventions: Vec::new(),
            rehearsal_requested: false,
            rehearsal_topic: None,
            report: None,
        }
    }

    // ============================================================================
    // Transcript
    // ============================================================================

    /// Appends a turn; returns its index.
    pub fn push_turn(&mut self, turn: Turn) -> usize {
        self.turns.push(turn);
        self.turns.len() - 1
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The last `n` turns, oldest first.
    pub fn recent_turns(&self, n: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    pub fn user_turn_count(&self) -> usize {
        self.turns.iter().filter(|t| t.is_user()).count()
    }

    pub fn last_user_turn(&self) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.is_user())
    }

    // ============================================================================
    // Slots
    // ============================================================================

    pub fn slots(&self) -> &ScenarioSlots {
        &self.slots
    }

    pub fn merge_slots(&mut self, candidates: &SlotCandidates) -> Vec<SlotKey> {
        self.slots.merge(candidates)
    }

    pub fn completeness(&self) -> f32 {
        self.slots.completeness()
    }

    // ============================================================================
    // Routines
    // ============================================================================

    pub fn roleplay(&self) -> &RoleplayState {
        &self.roleplay
    }

    pub fn roleplay_mut(&mut self) -> &mut RoleplayState {
        &mut self.roleplay
    }

    pub fn is_rehearsal_active(&self) -> bool {
        self.roleplay.active
    }

    pub fn safety_count(&self) -> u32 {
        self.safety_count
    }

    pub fn rehearsal_count(&self) -> u32 {
        self.rehearsal_count
    }

    pub fn record_safety_run(&mut self) {
        self.safety_count += 1;
    }

    /// Ends the active rehearsal: deactivates it, counts it and clears the
    /// one-shot trigger.
    pub fn complete_rehearsal(&mut self) {
        self.roleplay.finish();
        self.rehearsal_count += 1;
        self.rehearsal_requested = false;
        self.rehearsal_topic = None;
    }

    pub fn request_rehearsal(&mut self, topic: Option<String>) {
        self.rehearsal_requested = true;
        self.rehearsal_topic = topic.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
    }

    pub fn rehearsal_requested(&self) -> bool {
        self.rehearsal_requested
    }

    pub fn rehearsal_topic(&self) -> Option<&str> {
        self.rehearsal_topic.as_deref()
    }

    // ============================================================================
    // Interventions & report
    // ============================================================================

    pub fn log_intervention(&mut self, kind: InterventionKind, description: impl Into<String>) {
        let turn_index = self.turns.iter().rposition(Turn::is_user).unwrap_or(0);
        self.interventions.push(InterventionEntry {
            kind,
            description: description.into(),
            turn_index,
            timestamp: Utc::now(),
        });
    }

    pub fn interventions(&self) -> &[InterventionEntry] {
        &self.interventions
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn attach_report(&mut self, report: Report) {
        self.report = Some(report);
    }
}

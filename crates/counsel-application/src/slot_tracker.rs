//! Incremental scenario slot filling.

use crate::prompts;
use counsel_core::agent::{Agent, AgentError, parse_json_block};
use counsel_core::scenario::{ScenarioSlots, SlotCandidates, SlotKey};
use counsel_core::session::{Session, render_transcript};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Number of most recent turns shown to the extractor.
pub const EXTRACTION_WINDOW: usize = 10;

pub struct SlotTracker {
    agent: Arc<dyn Agent>,
}

fn snapshot(slots: &ScenarioSlots) -> String {
    let filled: BTreeMap<String, &str> = slots
        .filled()
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    serde_json::to_string(&filled).unwrap_or_else(|_| "{}".to_string())
}

impl SlotTracker {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }

    async fn extract(&self, session: &Session) -> Result<SlotCandidates, AgentError> {
        let transcript = render_transcript(session.recent_turns(EXTRACTION_WINDOW));
        let payload = prompts::slot_extraction(&transcript, &snapshot(session.slots()))?;
        let raw = self.agent.execute(payload).await?;
        let value = parse_json_block(&raw)?;
        Ok(SlotCandidates::from_value(&value))
    }

    /// Runs one extraction over the recent window and merges the result.
    ///
    /// Returns the keys whose value changed. On failure nothing changes.
    pub async fn update(&self, session: &mut Session) -> Vec<SlotKey> {
        let candidates = match self.extract(session).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(session_id = %session.id, "Slot extraction failed: {}", e);
                return Vec::new();
            }
        };

        let changed = session.merge_slots(&candidates);
        tracing::debug!(
            session_id = %session.id,
            changed = ?changed,
            filled = session.slots().filled_count(),
            completeness = session.completeness(),
            "Scenario slots updated"
        );
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_lists_filled_slots_only() {
        let mut slots = ScenarioSlots::new();
        slots.merge(
            &SlotCandidates::new()
                .with(SlotKey::Event, "면접")
                .with(SlotKey::Cause, "압박 질문"),
        );
        assert_eq!(snapshot(&slots), r#"{"cause":"압박 질문","event":"면접"}"#);
        assert_eq!(snapshot(&ScenarioSlots::new()), "{}");
    }
}

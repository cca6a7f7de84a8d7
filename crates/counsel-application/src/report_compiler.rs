//! Session Report Compiler
//!
//! Combines the deterministic aggregation in `counsel_core::report` with one
//! narrative summarization call. The quantitative part never depends on the
//! external service.

use crate::prompts;
use counsel_core::agent::{Agent, AgentError, parse_json_block};
use counsel_core::report::{CounselingSummary, Report};
use counsel_core::session::{Session, render_transcript};
use std::sync::Arc;

pub struct SessionReportCompiler {
    agent: Arc<dyn Agent>,
}

impl SessionReportCompiler {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }

    async fn summarize(&self, session: &Session) -> Result<CounselingSummary, AgentError> {
        let payload = prompts::session_summary(&render_transcript(session.turns()))?;
        let raw = self.agent.execute(payload).await?;
        Ok(CounselingSummary::from_value(&parse_json_block(&raw)?))
    }

    /// Builds the report. A failed summary leaves the narrative fields empty.
    pub async fn compile(&self, session: &Session) -> Report {
        let summary = if session.turns().is_empty() {
            CounselingSummary::default()
        } else {
            match self.summarize(session).await {
                Ok(summary) => summary,
                Err(e) => {
                    tracing::warn!(session_id = %session.id, "Session summary failed: {}", e);
                    CounselingSummary::default()
                }
            }
        };

        let report = Report::from_session(session, summary);
        tracing::info!(
            session_id = %session.id,
            dialogue_length = report.session_overview.dialogue_length,
            safety_count = report.session_overview.safety_count,
            rehearsal_count = report.session_overview.rehearsal_count,
            "Session report compiled"
        );
        report
    }
}

//! Session title generation.

use crate::prompts;
use counsel_core::agent::{Agent, AgentError};
use counsel_core::session::{Session, render_transcript};
use std::sync::Arc;

/// Transcript turns used to title a session.
pub const TITLE_CONTEXT_TURNS: usize = 6;

const MAX_TITLE_CHARS: usize = 30;

pub struct TitleService {
    agent: Arc<dyn Agent>,
}

/// Title used when generation is unavailable.
pub fn default_title(session_id: &str) -> String {
    let short: String = session_id.chars().take(8).collect();
    format!("Session {short}")
}

/// First non-empty line, without surrounding quotes, capped in length.
fn clean_title(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let line = line.trim_matches(|c| matches!(c, '"' | '\'' | '“' | '”' | '`')).trim();
    if line.is_empty() {
        return None;
    }
    Some(line.chars().take(MAX_TITLE_CHARS).collect())
}

impl TitleService {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }

    async fn try_generate(&self, session: &Session) -> Result<String, AgentError> {
        let head = &session.turns()[..session.turns().len().min(TITLE_CONTEXT_TURNS)];
        if head.is_empty() {
            return Err(AgentError::ExecutionFailed("session has no turns yet".into()));
        }
        let raw = self
            .agent
            .execute(prompts::session_title(&render_transcript(head))?)
            .await?;
        clean_title(&raw).ok_or_else(|| AgentError::ParseError("empty title".into()))
    }

    /// Generates a short title, falling back to `Session <id prefix>`.
    pub async fn generate(&self, session: &Session) -> String {
        match self.try_generate(session).await {
            Ok(title) => title,
            Err(e) => {
                tracing::warn!(session_id = %session.id, "Title generation failed: {}", e);
                default_title(&session.id)
            }
        }
    }
}

use crate::prompts;
use counsel_core::agent::{Agent, AgentError};
use counsel_core::session::{RoutineKind, Session, Turn};
use std::sync::Arc;

pub const COUNSELOR_FALLBACK: &str =
    "이야기해 주셔서 고마워요. 그때 어떤 마음이 가장 크게 들었는지 조금 더 들려줄 수 있을까요?";

/// Default conversational routine.
pub struct CounselorRoutine {
    agent: Arc<dyn Agent>,
}

impl CounselorRoutine {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }

    async fn generate(&self, text: &str) -> Result<String, AgentError> {
        let reply = self.agent.execute(prompts::counselor_reply(text)?).await?;
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(AgentError::ParseError("empty counselor reply".into()));
        }
        Ok(reply.to_string())
    }

    pub async fn run(&self, session: &mut Session, text: &str) {
        let reply = match self.generate(text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(session_id = %session.id, "Counselor reply failed, using fallback: {}", e);
                COUNSELOR_FALLBACK.to_string()
            }
        };
        session.push_turn(Turn::assistant(RoutineKind::Counselor, reply));
    }
}

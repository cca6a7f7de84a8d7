use crate::prompts;
use counsel_core::agent::{Agent, AgentError};
use counsel_core::routing::is_exit_request;
use counsel_core::session::{RoutineKind, Session, Turn};
use counsel_core::template::{Retrieval, TemplateRetriever, situation_prompt};
use serde::Serialize;
use std::sync::Arc;

/// Logged exchanges shown to the model when continuing a rehearsal.
pub const REHEARSAL_LOG_WINDOW: usize = 5;

pub const REHEARSAL_FALLBACK: &str = "음... 그렇군요. 조금 더 이야기해 보시겠어요?";

pub const REHEARSAL_CLOSING: &str = "롤플레잉이 종료되었습니다. 일반 상담으로 돌아갑니다.";

const NARRATOR: &str = "system";

/// What a rehearsal turn did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum RehearsalStep {
    /// A fresh rehearsal was introduced.
    Started { template_id: String, synthesized: bool },
    /// The counterpart answered in character.
    Replied,
    /// The user asked to stop; the rehearsal is over.
    Exited,
}

/// Role-play routine: fresh entry, in-character continuation and exit.
pub struct RehearsalRoutine {
    agent: Arc<dyn Agent>,
    retriever: TemplateRetriever,
}

fn introduction(retrieval: &Retrieval, situation: &str) -> String {
    let roles = &retrieval.template.roles;
    format!(
        "🎭 롤플레잉을 시작합니다!\n\n\
         🧭 유형: {kind}\n\n\
         📋 상황: {situation}\n\n\
         👥 역할 분담:\n\
         - 당신: {user}\n\
         - AI: {counterpart}\n\n\
         💡 이제 상황에 맞게 자연스럽게 대화를 시작해주세요!\n\
         ({user} 역할로 첫 마디를 해주세요)",
        kind = retrieval.kind.description(),
        user = roles.user_role,
        counterpart = roles.counterpart,
    )
}

impl RehearsalRoutine {
    pub fn new(agent: Arc<dyn Agent>, retriever: TemplateRetriever) -> Self {
        Self { agent, retriever }
    }

    /// Fresh entry: picks a template and presents the situation. No
    /// in-character reply is generated yet.
    pub fn start(&self, session: &mut Session) -> RehearsalStep {
        let retrieval = self
            .retriever
            .retrieve_with_context(session.slots(), session.rehearsal_topic());
        let situation = situation_prompt(session.slots(), &retrieval.template);
        let intro = introduction(&retrieval, &situation);

        tracing::info!(
            session_id = %session.id,
            template_id = %retrieval.template.id,
            kind = ?retrieval.kind,
            synthesized = retrieval.synthesized,
            "Rehearsal started"
        );

        let roleplay = session.roleplay_mut();
        roleplay.begin(&retrieval.template, situation);
        roleplay.record(None, NARRATOR, intro.clone());
        session.push_turn(Turn::system(RoutineKind::RehearsalIntro, intro));

        RehearsalStep::Started {
            template_id: retrieval.template.id,
            synthesized: retrieval.synthesized,
        }
    }

    async fn generate(&self, session: &Session, text: &str) -> Result<String, AgentError> {
        let roleplay = session.roleplay();
        let payload =
            prompts::roleplay_reply(roleplay, roleplay.recent_log(REHEARSAL_LOG_WINDOW), text)?;
        let reply = self.agent.execute(payload).await?;
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(AgentError::ParseError("empty roleplay reply".into()));
        }
        Ok(reply.to_string())
    }

    /// Continuation of an active rehearsal, or its exit when `text` asks
    /// for it.
    pub async fn continue_turn(&self, session: &mut Session, text: &str) -> RehearsalStep {
        if is_exit_request(text) {
            session
                .roleplay_mut()
                .record(Some(text), NARRATOR, REHEARSAL_CLOSING);
            session.complete_rehearsal();
            session.push_turn(Turn::system(RoutineKind::RehearsalClosing, REHEARSAL_CLOSING));
            tracing::info!(
                session_id = %session.id,
                rehearsal_count = session.rehearsal_count(),
                "Rehearsal ended by user"
            );
            return RehearsalStep::Exited;
        }

        let reply = match self.generate(session, text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(session_id = %session.id, "Roleplay reply failed, using fallback: {}", e);
                REHEARSAL_FALLBACK.to_string()
            }
        };

        let roleplay = session.roleplay_mut();
        let speaker = roleplay.counterpart_role.clone();
        roleplay.record(Some(text), speaker, reply.clone());
        session.push_turn(Turn::assistant(RoutineKind::Rehearsal, reply));
        RehearsalStep::Replied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use counsel_core::scenario::{SlotCandidates, SlotKey};
    use counsel_core::template::TemplateCatalog;

    #[test]
    fn test_introduction_presents_roles_and_situation() {
        let retriever = TemplateRetriever::new(Arc::new(TemplateCatalog::empty()));
        let mut session = Session::new();
        session.merge_slots(
            &SlotCandidates::new()
                .with(SlotKey::Event, "면접")
                .with(SlotKey::Character, "면접관"),
        );
        let retrieval = retriever.retrieve(session.slots());
        let situation = situation_prompt(session.slots(), &retrieval.template);
        let intro = introduction(&retrieval, &situation);

        assert!(intro.starts_with("🎭 롤플레잉을 시작합니다!"));
        assert!(intro.contains(&format!("📋 상황: {situation}")));
        assert!(intro.contains(&format!("- AI: {}", retrieval.template.roles.counterpart)));
        assert!(intro.contains(retrieval.kind.description()));
    }
}

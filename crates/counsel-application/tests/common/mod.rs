#![allow(dead_code)]

use async_trait::async_trait;
use counsel_application::CounselUseCase;
use counsel_core::agent::{Agent, AgentError, AgentTask, Payload};
use counsel_core::config::CounselConfig;
use counsel_core::risk::RiskDetector;
use counsel_core::template::{Template, TemplateCatalog};
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub const COUNSELOR_REPLY: &str = "그 상황에서 어떤 점이 가장 힘드셨나요?";
pub const ROLEPLAY_REPLY: &str = "좋습니다. 본인 소개를 부탁드립니다.";
pub const TITLE_REPLY: &str = "\"직장 스트레스 상담\"";

type Answer = Result<String, AgentError>;

/// In-memory agent answering per task.
///
/// Each task has a default answer; one-shot answers queued with
/// [`ScriptedAgent::push`] take precedence, in order.
pub struct ScriptedAgent {
    defaults: Mutex<HashMap<AgentTask, Answer>>,
    queued: Mutex<HashMap<AgentTask, VecDeque<Answer>>>,
    calls: Mutex<Vec<Payload>>,
}

fn unavailable() -> AgentError {
    AgentError::ProcessError {
        status_code: Some(503),
        message: "service unavailable".into(),
        is_retryable: true,
    }
}

impl ScriptedAgent {
    pub fn new() -> Self {
        let defaults = HashMap::from([
            (
                AgentTask::Classification,
                Ok(json!({"emotion_class": "중립", "emotion_score": 0.2, "extreme": false}).to_string()),
            ),
            (AgentTask::SlotExtraction, Ok("{}".to_string())),
            (AgentTask::CounselorReply, Ok(COUNSELOR_REPLY.to_string())),
            (AgentTask::RoleplayReply, Ok(ROLEPLAY_REPLY.to_string())),
            (
                AgentTask::SessionSummary,
                Ok(json!({
                    "topic_summary": "직장 내 갈등",
                    "emotional_flow": "불안에서 안정으로",
                    "intervention_points": ["호흡 안내", "상황극"],
                    "repeated_patterns": "자기 비난",
                    "session_end_reason": "사용자 종료"
                })
                .to_string()),
            ),
            (AgentTask::SessionTitle, Ok(TITLE_REPLY.to_string())),
        ]);
        Self {
            defaults: Mutex::new(defaults),
            queued: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the default answer for `task`.
    pub fn respond(&self, task: AgentTask, text: impl Into<String>) {
        self.defaults.lock().unwrap().insert(task, Ok(text.into()));
    }

    /// Makes every call for `task` fail.
    pub fn fail(&self, task: AgentTask) {
        self.defaults.lock().unwrap().insert(task, Err(unavailable()));
    }

    pub fn fail_all(&self) {
        for task in [
            AgentTask::Classification,
            AgentTask::SlotExtraction,
            AgentTask::CounselorReply,
            AgentTask::RoleplayReply,
            AgentTask::SessionSummary,
            AgentTask::SessionTitle,
        ] {
            self.fail(task);
        }
    }

    /// Queues a one-shot answer for the next `task` call.
    pub fn push(&self, task: AgentTask, text: impl Into<String>) {
        self.queued
            .lock()
            .unwrap()
            .entry(task)
            .or_default()
            .push_back(Ok(text.into()));
    }

    /// Queues a one-shot emotion classification.
    pub fn push_emotion(&self, label: &str, score: f32, extreme: bool) {
        self.push(
            AgentTask::Classification,
            json!({"emotion_class": label, "emotion_score": score, "extreme": extreme}).to_string(),
        );
    }

    pub fn calls(&self, task: AgentTask) -> usize {
        self.calls.lock().unwrap().iter().filter(|p| p.task == task).count()
    }

    pub fn payloads(&self, task: AgentTask) -> Vec<Payload> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.task == task)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Agent for ScriptedAgent {
    fn expertise(&self) -> &str {
        "scripted test double"
    }

    async fn execute(&self, payload: Payload) -> Result<String, AgentError> {
        let task = payload.task;
        self.calls.lock().unwrap().push(payload);
        if let Some(answer) = self
            .queued
            .lock()
            .unwrap()
            .get_mut(&task)
            .and_then(VecDeque::pop_front)
        {
            return answer;
        }
        self.defaults
            .lock()
            .unwrap()
            .get(&task)
            .cloned()
            .unwrap_or_else(|| Err(AgentError::Other(format!("no answer scripted for {task}"))))
    }
}

fn template(value: serde_json::Value) -> Template {
    serde_json::from_value(value).unwrap()
}

pub fn sample_catalog() -> TemplateCatalog {
    TemplateCatalog::new(vec![
        template(json!({
            "id": "TRIG-B-001",
            "title": "면접 준비 연습",
            "scene_setup": "면접관이 압박 질문을 던지는 최종 면접 자리",
            "roles": {"rp_agent_role": "면접관", "user_role": "지원자"},
            "preconditions": {"topic_tags": ["면접", "취업"]}
        })),
        template(json!({
            "id": "TRIG-B-002",
            "title": "발표 준비",
            "scene_setup": "팀 앞에서 발표를 시작하는 순간",
            "roles": {"rp_agent_role": "팀장", "user_role": "발표자"},
            "preconditions": {"topic_tags": ["발표"]}
        })),
        template(json!({
            "id": "TRIG-A-001",
            "title": "친구와의 갈등 재현",
            "scene_setup": "친구가 내 실수를 놀리던 학교 앞 카페",
            "roles": {"rp_agent_role": "친구", "user_role": "본인"}
        })),
    ])
}

pub fn usecase_with(agent: Arc<ScriptedAgent>, config: CounselConfig) -> CounselUseCase {
    CounselUseCase::new(agent, Arc::new(sample_catalog()), RiskDetector::new(), &config)
}

pub fn usecase(agent: Arc<ScriptedAgent>) -> CounselUseCase {
    usecase_with(agent, CounselConfig::default())
}

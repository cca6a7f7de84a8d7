//! Prompt construction for every external call.
//!
//! Prompts are Jinja templates rendered with `minijinja`; each builder
//! returns a ready [`Payload`] so services only decide what to do with the
//! answer.

use counsel_core::agent::{AgentError, AgentTask, Payload};
use counsel_core::session::{RoleplayLogEntry, RoleplayState};
use minijinja::{Environment, Value, context};

const CLASSIFICATION_SYSTEM: &str =
    "당신은 공감 기반 감정 분석 전문가입니다. 반드시 JSON 형식으로만 응답하세요.";

const CLASSIFICATION_TEMPLATE: &str = r#"다음 발화의 감정과 위험 신호를 분석하고 아래 JSON만 반환하세요.
- emotion_class: 발화의 주된 감정을 "기쁨/슬픔/분노/불안/무기력/중립" 중 하나로 분류
- emotion_score: 감정의 강도를 0.0(매우 약함)에서 1.0(매우 강함) 사이로 평가
- extreme: 자해, 자살 등 극단적 위험 신호가 있으면 true

발화: {{ text }}"#;

const EXTRACTION_SYSTEM: &str =
    "당신은 상담 내용에서 역할극 시나리오의 구체적인 요소를 추출하는 분석가입니다. JSON만 반환하세요.";

const EXTRACTION_TEMPLATE: &str = r#"상담 대화에서 역할극 시나리오의 핵심 요소를 추출하세요.
각 항목에는 대화에 나온 가장 구체적인 정보를 그대로 옮겨 적으세요.
추상적으로 요약하지 말고 사용자의 표현을 최대한 살리세요.

[상담 대화 내용]
{{ transcript }}

[현재까지 채워진 슬롯 정보]
{{ current_slots }}

[추출할 슬롯]
- event: 사용자가 겪은 핵심 사건 (예: "친구와의 갈등", "면접 상황")
- character: 사건에 관련된 상대방 (예: "나를 놀리는 친구", "압박 질문을 하는 면접관")
- place: 사건이 일어난 구체적인 장소 (예: "학교 앞 카페", "팀 회의실")
- emotion: 그 상황에서 가장 두드러진 감정 (예: "서운함과 분노", "극심한 불안감")
- cause: 사건이 일어난 구체적인 행동이나 원인 (예: "내 실수를 다른 사람에게 말하며 놀려서")
- goal: 사용자가 바라는 결과 (예: "친구에게 내 감정을 솔직하게 표현하기")

알 수 없는 항목은 빈 문자열로 두고, 아래 JSON 형식만 반환하세요.
{"event": "...", "character": "...", "place": "...", "emotion": "...", "cause": "...", "goal": "..."}"#;

const COUNSELOR_SYSTEM: &str = "당신은 공감과 소크라틱 질문에 능한 전문 상담자입니다.";

const COUNSELOR_TEMPLATE: &str = r#"사용자의 발화: "{{ text }}"
공감하며, 소크라틱 질문을 사용해 대화를 이어가세요."#;

const ROLEPLAY_SYSTEM_TEMPLATE: &str = "당신은 {{ role }} 역할을 맡은 연기자입니다. \
실제 사람처럼 자연스럽고 현실적인 대화를 이어가세요. \
과장된 연극투는 피하고 일상 대화처럼 응답하세요.";

const ROLEPLAY_TEMPLATE: &str = r#"당신은 "{{ role }}" 역할을 맡고 있습니다.
상황: {{ situation }}

{{ role }}로서 다음을 지키며 응답하세요.
- {{ role }}의 성격과 말투를 일관되게 유지
- 상황에 맞는 자연스러운 감정 표현
- 대화의 맥락을 고려한 응답

[최근 대화 기록]
{% for entry in log -%}
{% if entry.user_text %}{{ user_role }}: {{ entry.user_text }}
{% endif %}{{ entry.speaker }}: {{ entry.text }}
{% endfor %}
[{{ user_role }}의 최근 응답]
"{{ text }}"

[{{ role }}의 응답]"#;

const SUMMARY_SYSTEM: &str = "너는 상담 보고서 전문가야. 반드시 JSON만 반환해.";

const SUMMARY_TEMPLATE: &str = r#"다음 상담 대화를 분석하고 요약 보고서를 JSON 형식으로 작성해주세요.
필드: topic_summary(문자열), emotional_flow(문자열), intervention_points(문자열 배열),
repeated_patterns(문자열), session_end_reason(문자열)

상담:
{{ transcript }}"#;

const TITLE_SYSTEM: &str = "너는 상담 세션에 짧은 제목을 붙이는 도우미야.";

const TITLE_TEMPLATE: &str = r#"다음 상담 대화의 제목을 10~15자 이내의 한국어로 지어주세요.
제목만 출력하고 따옴표나 설명은 붙이지 마세요.

{{ transcript }}"#;

fn render(template: &str, ctx: Value) -> Result<String, AgentError> {
    Environment::new()
        .render_str(template, ctx)
        .map_err(|e| AgentError::Other(format!("Failed to render prompt: {e}")))
}

pub fn classification(text: &str) -> Result<Payload, AgentError> {
    let prompt = render(CLASSIFICATION_TEMPLATE, context! { text })?;
    Ok(Payload::new(AgentTask::Classification, CLASSIFICATION_SYSTEM, prompt)
        .with_temperature(0.2)
        .json())
}

/// `current_slots` is the JSON snapshot of the filled slots.
pub fn slot_extraction(transcript: &str, current_slots: &str) -> Result<Payload, AgentError> {
    let prompt = render(EXTRACTION_TEMPLATE, context! { transcript, current_slots })?;
    Ok(Payload::new(AgentTask::SlotExtraction, EXTRACTION_SYSTEM, prompt)
        .with_temperature(0.1)
        .json())
}

pub fn counselor_reply(text: &str) -> Result<Payload, AgentError> {
    let prompt = render(COUNSELOR_TEMPLATE, context! { text })?;
    Ok(Payload::new(AgentTask::CounselorReply, COUNSELOR_SYSTEM, prompt).with_temperature(0.7))
}

/// In-character reply for the counterpart, framed by the recent log.
pub fn roleplay_reply(
    state: &RoleplayState,
    log: &[RoleplayLogEntry],
    text: &str,
) -> Result<Payload, AgentError> {
    let role = state.counterpart_role.as_str();
    let system = render(ROLEPLAY_SYSTEM_TEMPLATE, context! { role })?;
    let prompt = render(
        ROLEPLAY_TEMPLATE,
        context! {
            role,
            user_role => state.user_role.as_str(),
            situation => state.situation_text.as_str(),
            log => Value::from_serialize(log),
            text,
        },
    )?;
    Ok(Payload::new(AgentTask::RoleplayReply, system, prompt).with_temperature(0.8))
}

pub fn session_summary(transcript: &str) -> Result<Payload, AgentError> {
    let prompt = render(SUMMARY_TEMPLATE, context! { transcript })?;
    Ok(Payload::new(AgentTask::SessionSummary, SUMMARY_SYSTEM, prompt)
        .with_temperature(0.2)
        .json())
}

pub fn session_title(transcript: &str) -> Result<Payload, AgentError> {
    let prompt = render(TITLE_TEMPLATE, context! { transcript })?;
    Ok(Payload::new(AgentTask::SessionTitle, TITLE_SYSTEM, prompt).with_temperature(0.3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use counsel_core::template::Template;

    fn rehearsal_state() -> RoleplayState {
        let template: Template = serde_json::from_value(serde_json::json!({
            "id": "TRIG-B-001",
            "title": "면접 연습",
            "roles": {"rp_agent_role": "면접관", "user_role": "지원자"}
        }))
        .unwrap();
        let mut state = RoleplayState::default();
        state.begin(&template, "압박 면접 상황");
        state
    }

    #[test]
    fn test_classification_payload() {
        let payload = classification("너무 불안해요").unwrap();
        assert_eq!(payload.task, AgentTask::Classification);
        assert!(payload.json_mode);
        assert!(payload.prompt.ends_with("발화: 너무 불안해요"));
    }

    #[test]
    fn test_extraction_payload_contains_window_and_snapshot() {
        let payload = slot_extraction("user: 면접이 걱정돼요", r#"{"event":"면접"}"#).unwrap();
        assert!(payload.prompt.contains("user: 면접이 걱정돼요"));
        assert!(payload.prompt.contains(r#"{"event":"면접"}"#));
        assert_eq!(payload.temperature, 0.1);
    }

    #[test]
    fn test_roleplay_payload_stays_in_character() {
        let mut state = rehearsal_state();
        state.record(None, "system", "소개");
        state.record(Some("안녕하세요"), "면접관", "자기소개 해보세요");
        let payload = roleplay_reply(&state, state.recent_log(5), "저는 개발자입니다").unwrap();

        assert!(payload.system.contains("면접관"));
        assert!(payload.prompt.contains("상황: 압박 면접 상황"));
        assert!(payload.prompt.contains("지원자: 안녕하세요"));
        assert!(payload.prompt.contains("면접관: 자기소개 해보세요"));
        assert!(payload.prompt.contains("\"저는 개발자입니다\""));
    }

    #[test]
    fn test_title_payload_is_korean_plain_text() {
        let payload = session_title("user: 회사 일이 힘들어요").unwrap();
        assert_eq!(payload.task, AgentTask::SessionTitle);
        assert!(!payload.json_mode);
        assert!(payload.system.contains("상담 세션"));
        assert!(!payload.system.is_ascii());
        assert!(payload.prompt.contains("user: 회사 일이 힘들어요"));
    }

    #[test]
    fn test_user_text_is_not_escaped() {
        let payload = counselor_reply("<친구> & 나").unwrap();
        assert!(payload.prompt.contains("<친구> & 나"));
    }
}

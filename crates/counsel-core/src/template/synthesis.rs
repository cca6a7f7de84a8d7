use super::model::{Template, TemplatePreconditions, TemplateRoles, TemplateType};
use crate::scenario::{ScenarioSlots, SlotKey};

const DEFAULT_EVENT: &str = "상황";
const DEFAULT_CHARACTER: &str = "상대방";
const DEFAULT_SCENE: &str = "상황극을 시작합니다.";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Builds a template for `kind` from the available slots.
///
/// Used when no catalog template matches well enough.
pub fn synthesize(kind: TemplateType, slots: &ScenarioSlots) -> Template {
    let event = slots.get(SlotKey::Event).unwrap_or(DEFAULT_EVENT);
    let character = slots.get(SlotKey::Character).unwrap_or(DEFAULT_CHARACTER);

    let (title, scene_setup, objectives, constraints) = match kind {
        TemplateType::PastReenactment => (
            format!("{event} 재현"),
            format!("{event} 상황을 안전하게 재현하여 다른 관점에서 바라보는 연습"),
            strings(&["과거 상황 재현", "다른 관점에서 바라보기", "감정 정리"]),
            strings(&["안전한 환경 유지", "감정 조절", "건설적 대화"]),
        ),
        TemplateType::FutureRehearsal => (
            format!("{event} 대응 연습"),
            format!("{event} 상황에 대한 대응 방법을 연습하여 자신감을 기르는 시간"),
            strings(&["대응 방법 연습", "자신감 향상", "실전 준비"]),
            strings(&["현실적인 상황", "건설적 피드백", "안전한 연습 환경"]),
        ),
        TemplateType::PerspectiveSwap => (
            format!("{character} 입장에서 생각해보기"),
            format!("{character}의 입장에서 {event} 상황을 바라보며 서로의 관점을 이해하는 시간"),
            strings(&["상대방 입장 이해", "공감 능력 향상", "관계 개선"]),
            strings(&["객관적 관점 유지", "상호 존중", "건설적 소통"]),
        ),
        TemplateType::IdealSelf => (
            format!("이상적인 {event} 대응"),
            format!("{event} 상황에서 바라는 모습으로 행동하며 새로운 대응 방식을 연습"),
            strings(&["이상적 자아 연습", "새로운 행동 패턴", "자기효능감 증진"]),
            strings(&["현실적 목표 설정", "점진적 변화", "긍정적 자아상"]),
        ),
    };

    Template {
        id: kind.generated_id(),
        title,
        scene_setup,
        roles: TemplateRoles {
            counterpart: character.to_string(),
            user_role: "본인".to_string(),
        },
        preconditions: TemplatePreconditions::default(),
        keywords: Vec::new(),
        objectives,
        constraints,
    }
}

/// Situation text presented when a rehearsal starts: the scene (or title),
/// then the filled slots.
pub fn situation_prompt(slots: &ScenarioSlots, template: &Template) -> String {
    let base = [template.scene_setup.trim(), template.title.trim()]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SCENE);

    let info: Vec<String> = slots
        .filled()
        .into_iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect();

    if info.is_empty() {
        base.to_string()
    } else {
        format!("{base}\n\n상황 정보: {}", info.join(", "))
    }
}

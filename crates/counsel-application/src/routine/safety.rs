use counsel_core::routing::SafetyCause;
use counsel_core::session::{RoutineKind, Session, Turn};

pub const GROUNDING_SCRIPT: &str =
    "지금 이 순간에 집중해보세요. 5초간 들이쉬고 천천히 내쉬어보세요.";

pub const HIGH_INTENSITY_NOTICE: &str =
    "지금 감정 강도가 높게 감지되었어요. 잠깐 호흡에 집중해보도록 안내할게요.";

/// Grounding routine. Never calls an external service and never ends an
/// active rehearsal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyRoutine;

impl SafetyRoutine {
    pub fn run(&self, session: &mut Session, cause: SafetyCause) {
        session.record_safety_run();
        if cause == SafetyCause::HighIntensity {
            session.push_turn(Turn::system(RoutineKind::Notice, HIGH_INTENSITY_NOTICE));
        }
        session.push_turn(Turn::system(RoutineKind::Safety, GROUNDING_SCRIPT));
    }
}

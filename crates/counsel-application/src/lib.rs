//! Application layer for Counsel.
//!
//! Use cases that drive the domain policy in `counsel-core` with the
//! external language service and the filesystem stores.

pub mod counsel_usecase;
pub mod emotion_analysis_service;
pub mod prompts;
pub mod report_compiler;
pub mod routine;
pub mod session_registry;
pub mod slot_tracker;
pub mod title_service;

pub use counsel_usecase::{CounselUseCase, TurnOutcome};
pub use emotion_analysis_service::EmotionAnalysisService;
pub use report_compiler::SessionReportCompiler;
pub use session_registry::SessionRegistry;
pub use slot_tracker::SlotTracker;
pub use title_service::TitleService;

//! Counsel use case.
//!
//! `CounselUseCase` runs the per-turn pipeline for any number of live
//! sessions:
//!
//! 1. classify the utterance (external, advisory) and run the local risk
//!    cascade
//! 2. append the user turn and update the scenario slots
//! 3. let the `DialogueRouter` pick a route and log the intervention
//! 4. execute the chosen routine
//!
//! # Thread Safety
//!
//! Sessions live in a [`SessionRegistry`]; every operation on one session
//! holds that session's mutex for its whole duration, so turns of one
//! session never interleave while different sessions run in parallel.

use crate::emotion_analysis_service::EmotionAnalysisService;
use crate::report_compiler::SessionReportCompiler;
use crate::routine::{CounselorRoutine, RehearsalRoutine, RehearsalStep, SafetyRoutine};
use crate::session_registry::{SessionRegistry, SharedSession};
use crate::slot_tracker::SlotTracker;
use crate::title_service::TitleService;
use counsel_core::agent::Agent;
use counsel_core::config::CounselConfig;
use counsel_core::error::{CounselError, Result};
use counsel_core::report::Report;
use counsel_core::risk::{RiskDetector, RiskVerdict};
use counsel_core::routing::{DialogueRouter, Route, RoutingPolicy, SafetyCause};
use counsel_core::session::{InterventionKind, Session, Turn};
use counsel_core::template::{TemplateCatalog, TemplateRepository, TemplateRetriever};
use counsel_infrastructure::{DirTemplateRepository, PatternFile};
use serde::Serialize;
use std::sync::Arc;

/// Everything the front end needs after one user turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub session_id: String,
    pub route: Route,
    /// Human-readable trigger reason when a rehearsal started.
    pub trigger_reason: Option<String>,
    pub verdict: RiskVerdict,
    /// Rehearsal state after the turn.
    pub rehearsal_active: bool,
    /// What the rehearsal routine did, when it handled the turn.
    pub rehearsal: Option<RehearsalStep>,
    pub completeness: f32,
    /// Turns appended after the user turn, in order.
    pub outputs: Vec<Turn>,
}

pub struct CounselUseCase {
    registry: SessionRegistry,
    catalog: Arc<TemplateCatalog>,
    detector: RiskDetector,
    router: DialogueRouter,
    emotion: EmotionAnalysisService,
    slots: SlotTracker,
    safety: SafetyRoutine,
    counselor: CounselorRoutine,
    rehearsal: RehearsalRoutine,
    reports: SessionReportCompiler,
    titles: TitleService,
    require_templates: bool,
}

impl CounselUseCase {
    /// Creates a use case over an already loaded catalog and detector.
    pub fn new(
        agent: Arc<dyn Agent>,
        catalog: Arc<TemplateCatalog>,
        detector: RiskDetector,
        config: &CounselConfig,
    ) -> Self {
        Self {
            registry: SessionRegistry::new(),
            catalog: catalog.clone(),
            detector,
            router: DialogueRouter::new(RoutingPolicy::from(config)),
            emotion: EmotionAnalysisService::new(agent.clone()),
            slots: SlotTracker::new(agent.clone()),
            safety: SafetyRoutine,
            counselor: CounselorRoutine::new(agent.clone()),
            rehearsal: RehearsalRoutine::new(agent.clone(), TemplateRetriever::new(catalog)),
            reports: SessionReportCompiler::new(agent.clone()),
            titles: TitleService::new(agent),
            require_templates: config.require_templates,
        }
    }

    /// Loads the template directory and supplementary patterns named in
    /// `config`, then builds the use case.
    ///
    /// An unreadable pattern file is logged and ignored; the built-in
    /// cascade is always active.
    pub async fn load(agent: Arc<dyn Agent>, config: &CounselConfig) -> Result<Self> {
        let catalog = DirTemplateRepository::new(&config.template_dir)
            .load_catalog()
            .await?;
        tracing::info!(
            dir = %config.template_dir.display(),
            templates = catalog.len(),
            "Template catalog loaded"
        );

        let detector = match PatternFile::new(&config.extra_patterns_path).load() {
            Ok(supplement) if !supplement.is_empty() => RiskDetector::with_supplement(&supplement),
            Ok(_) => RiskDetector::new(),
            Err(e) => {
                tracing::warn!(
                    path = %config.extra_patterns_path.display(),
                    "Ignoring supplementary risk patterns: {}",
                    e
                );
                RiskDetector::new()
            }
        };

        Ok(Self::new(agent, Arc::new(catalog), detector, config))
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn detector(&self) -> &RiskDetector {
        &self.detector
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    async fn session(&self, session_id: &str) -> Result<SharedSession> {
        self.registry
            .get(session_id)
            .await
            .ok_or_else(|| CounselError::not_found("session", session_id))
    }

    // ============================================================================
    // Session lifecycle
    // ============================================================================

    /// Starts a new session and returns its id.
    ///
    /// Fails when rehearsals are required but the catalog is empty.
    pub async fn start_session(&self) -> Result<String> {
        if self.require_templates && self.catalog.is_empty() {
            return Err(CounselError::catalog(
                "no role-play templates could be loaded; check the template directory",
            ));
        }
        let session = Session::new();
        let id = session.id.clone();
        self.registry.insert(session).await;
        tracing::info!(session_id = %id, "Session started");
        Ok(id)
    }

    /// Compiles the report, stores it on the session and retires the session.
    pub async fn end_session(&self, session_id: &str) -> Result<Report> {
        let shared = self.session(session_id).await?;
        let report = {
            let mut session = shared.lock().await;
            let report = self.reports.compile(&session).await;
            session.attach_report(report.clone());
            report
        };
        self.registry.remove(session_id).await;
        tracing::info!(session_id = %session_id, "Session ended");
        Ok(report)
    }

    /// A copy of the current session state.
    pub async fn session_snapshot(&self, session_id: &str) -> Result<Session> {
        let shared = self.session(session_id).await?;
        let session = shared.lock().await;
        Ok(session.clone())
    }

    /// Generates and stores a short title for the session.
    pub async fn generate_title(&self, session_id: &str) -> Result<String> {
        let shared = self.session(session_id).await?;
        let mut session = shared.lock().await;
        let title = self.titles.generate(&session).await;
        session.title = Some(title.clone());
        Ok(title)
    }

    /// Requests a rehearsal on the next turn, optionally about `topic`.
    pub async fn trigger_rehearsal(&self, session_id: &str, topic: Option<String>) -> Result<()> {
        let shared = self.session(session_id).await?;
        let mut session = shared.lock().await;
        session.request_rehearsal(topic);
        tracing::info!(session_id = %session_id, "Rehearsal requested");
        Ok(())
    }

    // ============================================================================
    // Turn processing
    // ============================================================================

    /// Processes one user turn end to end.
    ///
    /// External failures never fail the turn; only an unknown session id
    /// does.
    pub async fn process_turn(&self, session_id: &str, text: &str) -> Result<TurnOutcome> {
        let shared = self.session(session_id).await?;
        let mut session = shared.lock().await;

        let signal = self.emotion.classify(text).await;
        let verdict = self.detector.evaluate(text, signal.as_ref());
        if verdict.is_uncorroborated_flag() {
            tracing::info!(
                session_id = %session_id,
                "Classifier risk flag not corroborated by local patterns"
            );
        }

        let first_output = session.push_turn(Turn::user(text, verdict.clone())) + 1;
        self.slots.update(&mut session).await;

        let route = self.router.decide(&session, &verdict, text);
        tracing::info!(
            session_id = %session_id,
            route = route.name(),
            categories = ?verdict.matched_categories,
            intensity = verdict.emotion_intensity,
            completeness = session.completeness(),
            "Turn routed"
        );
        self.log_intervention(&mut session, &route, &verdict);

        let rehearsal = match &route {
            Route::Safety { cause } => {
                self.safety.run(&mut session, *cause);
                None
            }
            Route::RehearsalStart { .. } => Some(self.rehearsal.start(&mut session)),
            Route::RehearsalContinue => Some(self.rehearsal.continue_turn(&mut session, text).await),
            Route::Default => {
                self.counselor.run(&mut session, text).await;
                None
            }
        };

        Ok(TurnOutcome {
            session_id: session.id.clone(),
            trigger_reason: route.trigger_reason().map(ToString::to_string),
            route,
            verdict,
            rehearsal_active: session.is_rehearsal_active(),
            rehearsal,
            completeness: session.completeness(),
            outputs: session.turns()[first_output..].to_vec(),
        })
    }

    fn log_intervention(&self, session: &mut Session, route: &Route, verdict: &RiskVerdict) {
        match route {
            Route::Safety {
                cause: SafetyCause::UnsafeVerdict,
            } => {
                let terms = verdict.critical_terms();
                session.log_intervention(
                    InterventionKind::SafetyEscalation,
                    format!("위험 표현 감지: {}", terms.join(", ")),
                );
            }
            Route::Safety {
                cause: SafetyCause::HighIntensity,
            } => {
                session.log_intervention(
                    InterventionKind::HighIntensityNotice,
                    format!(
                        "감정 강도 {:.2} (기준 {:.2} 초과)",
                        verdict.emotion_intensity,
                        self.router.policy().safety_threshold
                    ),
                );
            }
            Route::RehearsalStart { reason } => {
                session.log_intervention(InterventionKind::RehearsalTrigger, reason.to_string());
            }
            Route::RehearsalContinue | Route::Default => {}
        }
    }
}

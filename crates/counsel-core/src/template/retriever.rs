use super::catalog::TemplateCatalog;
use super::model::{Template, TemplateType};
use super::scoring::{self, MIN_TEMPLATE_SCORE, TypeScores};
use super::synthesis::synthesize;
use crate::scenario::ScenarioSlots;
use std::sync::Arc;

/// Outcome of one retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct Retrieval {
    pub template: Template,
    pub kind: TemplateType,
    pub type_scores: TypeScores,
    /// Best within-type catalog score (`None` when the type had no entries).
    pub best_score: Option<usize>,
    pub synthesized: bool,
}

/// Picks the rehearsal template for the current scenario.
///
/// Deterministic: the same slots, context and catalog always give the same
/// template. Never fails; when the catalog has nothing good enough a
/// template is synthesized.
#[derive(Debug, Clone)]
pub struct TemplateRetriever {
    catalog: Arc<TemplateCatalog>,
}

impl TemplateRetriever {
    pub fn new(catalog: Arc<TemplateCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn retrieve(&self, slots: &ScenarioSlots) -> Retrieval {
        self.retrieve_with_context(slots, None)
    }

    /// Retrieval with extra free-text context (e.g. a requested topic).
    pub fn retrieve_with_context(&self, slots: &ScenarioSlots, context: Option<&str>) -> Retrieval {
        let mut situation = slots.combined_text();
        if let Some(context) = context.map(str::trim).filter(|c| !c.is_empty()) {
            if !situation.is_empty() {
                situation.push(' ');
            }
            situation.push_str(context);
        }

        let type_scores = scoring::type_scores(&situation);
        let kind = type_scores.winner();
        let tokens = scoring::tokenize(&situation);

        // highest score, then smallest id
        let best = self
            .catalog
            .by_type(kind)
            .map(|t| (scoring::template_match_score(&tokens, t), t))
            .min_by(|(sa, ta), (sb, tb)| sb.cmp(sa).then_with(|| ta.id.cmp(&tb.id)));

        let best_score = best.map(|(score, _)| score);
        tracing::debug!(?type_scores, %kind, ?best_score, "Scored rehearsal templates");

        match best {
            Some((score, template)) if score >= MIN_TEMPLATE_SCORE => Retrieval {
                template: template.clone(),
                kind,
                type_scores,
                best_score,
                synthesized: false,
            },
            _ => Retrieval {
                template: synthesize(kind, slots),
                kind,
                type_scores,
                best_score,
                synthesized: true,
            },
        }
    }
}

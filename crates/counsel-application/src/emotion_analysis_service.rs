//! Emotion Analysis Service
//!
//! Asks the external classifier for the emotion label, intensity and its
//! own (advisory) risk judgment. Failures degrade to `None`; the local risk
//! cascade runs either way.

use crate::prompts;
use counsel_core::agent::{Agent, AgentError, parse_json_block};
use counsel_core::risk::EmotionSignal;
use std::sync::Arc;

pub struct EmotionAnalysisService {
    agent: Arc<dyn Agent>,
}

impl EmotionAnalysisService {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }

    async fn try_classify(&self, text: &str) -> Result<EmotionSignal, AgentError> {
        let payload = prompts::classification(text)?;
        let raw = self.agent.execute(payload).await?;
        let value = parse_json_block(&raw)?;
        Ok(EmotionSignal::from_value(&value))
    }

    /// Classifies one utterance. `None` means the classifier was unavailable
    /// or answered with something unusable.
    pub async fn classify(&self, text: &str) -> Option<EmotionSignal> {
        match self.try_classify(text).await {
            Ok(signal) => {
                tracing::debug!(
                    label = %signal.label,
                    intensity = signal.intensity,
                    flagged = signal.flagged_unsafe,
                    "Emotion classified"
                );
                Some(signal)
            }
            Err(e) => {
                tracing::warn!("Emotion classification failed, using neutral signal: {}", e);
                None
            }
        }
    }
}

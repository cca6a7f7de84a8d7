use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// What an agent call is for.
///
/// Carried on every payload so transports can pick models per task and test
/// doubles can answer per task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AgentTask {
    /// Emotion label/intensity and advisory risk flag for one utterance.
    Classification,
    /// Scenario slot extraction over a transcript window.
    SlotExtraction,
    /// Default empathetic counselor reply.
    CounselorReply,
    /// In-character counterpart reply during a rehearsal.
    RoleplayReply,
    /// End-of-session narrative summary.
    SessionSummary,
    /// Short session title.
    SessionTitle,
}

/// A single completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub task: AgentTask,
    /// System instruction framing the call.
    pub system: String,
    /// The user-side prompt.
    pub prompt: String,
    pub temperature: f32,
    /// Ask the transport for a JSON object response.
    #[serde(default)]
    pub json_mode: bool,
}

impl Payload {
    pub fn new(task: AgentTask, system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            task,
            system: system.into(),
            prompt: prompt.into(),
            temperature: 0.7,
            json_mode: false,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Requests a JSON object response.
    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let payload = Payload::new(AgentTask::CounselorReply, "sys", "hi");
        assert_eq!(payload.temperature, 0.7);
        assert!(!payload.json_mode);

        let payload = payload.with_temperature(0.2).json();
        assert_eq!(payload.temperature, 0.2);
        assert!(payload.json_mode);
    }

    #[test]
    fn test_task_names() {
        assert_eq!(AgentTask::SlotExtraction.to_string(), "slot_extraction");
        assert_eq!(AgentTask::RoleplayReply.as_ref(), "roleplay_reply");
    }
}

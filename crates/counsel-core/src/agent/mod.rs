//! External language-service port.
//!
//! Every model-backed collaborator (classification, slot extraction, reply
//! generation, summarization) is reached through the single [`Agent`] trait.
//! Output from an agent is untrusted: callers parse it defensively and fall
//! back to neutral defaults on any [`AgentError`].
//!
//! # Module Structure
//!
//! - `payload`: request envelope (`Payload`, `AgentTask`)
//! - `json`: tolerant JSON extraction from free-form model output

mod json;
mod payload;

pub use json::parse_json_block;
pub use payload::{AgentTask, Payload};

use async_trait::async_trait;
use thiserror::Error;

/// Errors produced by an external agent call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    /// The agent could not be invoked at all (missing key, empty payload).
    #[error("Agent execution failed: {0}")]
    ExecutionFailed(String),

    /// The remote service answered with an error.
    #[error("Agent process error (status: {status_code:?}): {message}")]
    ProcessError {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
    },

    /// The service answered, but the output could not be parsed.
    #[error("Agent output could not be parsed: {0}")]
    ParseError(String),

    #[error("Agent error: {0}")]
    Other(String),
}

/// An external text service.
///
/// Implementations must be safe to share across sessions; the orchestrator
/// holds them behind `Arc<dyn Agent>`.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Short description of what the agent is used for (diagnostics only).
    fn expertise(&self) -> &str;

    /// Executes one completion request and returns the raw text answer.
    async fn execute(&self, payload: Payload) -> Result<String, AgentError>;
}

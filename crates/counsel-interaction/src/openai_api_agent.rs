//! OpenAIApiAgent - REST client for OpenAI-compatible chat completions.
//!
//! Configuration comes from the environment: `OPENAI_API_KEY` (required),
//! `OPENAI_MODEL` (default `gpt-4o-mini`) and `OPENAI_BASE_URL` (for
//! compatible gateways).

use async_trait::async_trait;
use counsel_core::agent::{Agent, AgentError, Payload};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Agent implementation that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAIApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: Option<u32>,
    timeout: Duration,
}

impl std::fmt::Debug for OpenAIApiAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIApiAgent")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OpenAIApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// Model name defaults to `gpt-4o-mini` if not specified.
    pub fn try_from_env() -> Result<Self, AgentError> {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AgentError::ExecutionFailed("OPENAI_API_KEY not found in environment variables".into())
            })?;

        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.into());
        let mut agent = Self::new(api_key, model);
        if let Ok(base_url) = env::var("OPENAI_BASE_URL") {
            agent = agent.with_base_url(base_url);
        }
        Ok(agent)
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the agent at an OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, payload: &Payload) -> Result<ChatCompletionRequest, AgentError> {
        if payload.prompt.trim().is_empty() {
            return Err(AgentError::ExecutionFailed(
                "OpenAI payload must include a prompt".into(),
            ));
        }

        let mut messages = Vec::with_capacity(2);
        if !payload.system.trim().is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: payload.system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: payload.prompt.clone(),
        });

        Ok(ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: payload.temperature,
            max_tokens: self.max_tokens,
            response_format: payload.json_mode.then(|| ResponseFormat {
                r#type: "json_object",
            }),
        })
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, AgentError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|err| AgentError::ProcessError {
                status_code: None,
                message: format!("OpenAI API request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| AgentError::ParseError(format!("Failed to parse OpenAI response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl Agent for OpenAIApiAgent {
    fn expertise(&self) -> &str {
        "OpenAI chat model for classification, extraction and counseling replies"
    }

    async fn execute(&self, payload: Payload) -> Result<String, AgentError> {
        let request = self.build_request(&payload)?;
        tracing::debug!(task = %payload.task, model = %self.model, "Sending chat completion request");
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, AgentError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| {
            AgentError::ExecutionFailed("OpenAI API returned no content in the response".into())
        })
}

fn map_http_error(status: StatusCode, body: String) -> AgentError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    AgentError::ProcessError {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
    }
}

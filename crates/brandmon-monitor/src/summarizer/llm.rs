//! Minimal client for OpenAI-compatible `/chat/completions` endpoints.

use std::time::Duration;

use brandmon_core::app_config::LlmEndpoint;
use serde::{Deserialize, Serialize};

use crate::error::SummarizerError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

pub struct ChatClient {
    http: reqwest::Client,
}

impl ChatClient {
    /// # Errors
    ///
    /// Returns [`SummarizerError::Transport`] if the client cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, SummarizerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { http })
    }

    /// Sends one chat completion and returns the first choice's content.
    ///
    /// # Errors
    ///
    /// - [`SummarizerError::Transport`] on network failure or an undecodable body.
    /// - [`SummarizerError::Api`] on a non-2xx status.
    /// - [`SummarizerError::EmptyResponse`] when no choice carries content.
    pub async fn complete(
        &self,
        endpoint: &LlmEndpoint,
        messages: Vec<ChatMessage>,
        temperature: f32,
        response_format: Option<serde_json::Value>,
    ) -> Result<String, SummarizerError> {
        let stage = if response_format.is_some() {
            "writer"
        } else {
            "analysis"
        };
        let url = format!(
            "{}/chat/completions",
            endpoint.base_url.trim_end_matches('/')
        );
        let body = ChatRequest {
            model: &endpoint.model,
            messages,
            temperature,
            stream: false,
            response_format,
        };

        let mut request = self.http.post(&url).json(&body);
        if let Some(key) = &endpoint.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(SummarizerError::EmptyResponse { stage })
    }
}

//! Two-stage LLM summarization of a platform's normalized records.
//!
//! Stage one asks the model to pull brand-relevant signal out of the records
//! as free text. Stage two turns that analysis into a [`PlatformReport`]
//! constrained by a JSON schema and validated on the way back.

mod llm;
mod prompts;
mod schema;

use std::sync::Arc;

use async_trait::async_trait;
use brandmon_core::{AppConfig, LlmProvider, Platform};

use self::llm::ChatClient;
use crate::error::SummarizerError;
use crate::extract::NormalizedRecord;
use crate::platform::descriptor;
use crate::types::PlatformReport;

/// Input to one summarization.
#[derive(Debug, Clone, Copy)]
pub struct SummaryRequest<'a> {
    pub platform: Platform,
    pub brand_name: &'a str,
    pub records: &'a [NormalizedRecord],
    pub provider: LlmProvider,
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produces the report for one platform.
    ///
    /// # Errors
    ///
    /// Any [`SummarizerError`]; the caller confines it to this platform.
    async fn summarize(&self, request: SummaryRequest<'_>)
        -> Result<PlatformReport, SummarizerError>;
}

/// [`Summarizer`] backed by an OpenAI-compatible chat endpoint (Groq or
/// Ollama). The endpoint is resolved from config on every call.
pub struct LlmSummarizer {
    config: Arc<AppConfig>,
    chat: ChatClient,
}

impl LlmSummarizer {
    /// # Errors
    ///
    /// Returns [`SummarizerError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: Arc<AppConfig>) -> Result<Self, SummarizerError> {
        let chat = ChatClient::new(config.request_timeout_secs)?;
        Ok(Self { config, chat })
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(
        &self,
        request: SummaryRequest<'_>,
    ) -> Result<PlatformReport, SummarizerError> {
        self.config
            .require_llm_credentials(request.provider)
            .map_err(|e| SummarizerError::Configuration(e.to_string()))?;
        let endpoint = self.config.llm_endpoint(request.provider);
        let temperature = self.config.llm_temperature;
        let desc = descriptor(request.platform);

        let records = format!(
            "{:#}",
            serde_json::Value::Array(
                request
                    .records
                    .iter()
                    .cloned()
                    .map(serde_json::Value::Object)
                    .collect()
            )
        );

        tracing::debug!(
            platform = %request.platform,
            provider = %request.provider,
            model = %endpoint.model,
            records = request.records.len(),
            "running analysis stage"
        );
        let analysis = self
            .chat
            .complete(
                endpoint,
                prompts::analysis_messages(desc, request.brand_name, &records),
                temperature,
                None,
            )
            .await?;
        let analysis = schema::strip_reasoning(&analysis);
        if analysis.trim().is_empty() {
            return Err(SummarizerError::EmptyResponse { stage: "analysis" });
        }

        tracing::debug!(platform = %request.platform, "running writer stage");
        let written = self
            .chat
            .complete(
                endpoint,
                prompts::writer_messages(desc, request.brand_name, analysis),
                temperature,
                Some(schema::response_format::<PlatformReport>("platform_report")),
            )
            .await?;

        let report = schema::parse_structured::<PlatformReport>(&written)?;
        tracing::info!(
            platform = %request.platform,
            posts = report.content.len(),
            "summary complete"
        );
        Ok(report)
    }
}

use std::time::Duration;

use crate::types::LlmProvider;
use crate::ConfigError;

/// Credentials and endpoints for one LLM provider.
#[derive(Clone)]
pub struct LlmEndpoint {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for LlmEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmEndpoint")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub bright_data_username: String,
    pub bright_data_password: String,
    pub bright_data_api_key: String,
    pub bright_data_api_url: String,
    pub proxy_host: String,
    pub proxy_port: u16,
    pub search_url: String,
    pub search_recency: String,
    pub scrape_poll_interval_secs: u64,
    pub scrape_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub llm_provider: LlmProvider,
    pub llm_temperature: f32,
    pub groq: LlmEndpoint,
    pub ollama: LlmEndpoint,
    pub log_level: String,
}

impl AppConfig {
    /// Endpoint settings for the given provider.
    #[must_use]
    pub fn llm_endpoint(&self, provider: LlmProvider) -> &LlmEndpoint {
        match provider {
            LlmProvider::Groq => &self.groq,
            LlmProvider::Ollama => &self.ollama,
        }
    }

    /// Check that the credentials needed by `provider` are present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when Groq is selected without
    /// `GROQ_API_KEY`. Ollama needs no key.
    pub fn require_llm_credentials(&self, provider: LlmProvider) -> Result<(), ConfigError> {
        match provider {
            LlmProvider::Groq if self.groq.api_key.is_none() => {
                Err(ConfigError::MissingEnvVar("GROQ_API_KEY".to_string()))
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn scrape_poll_interval(&self) -> Duration {
        Duration::from_secs(self.scrape_poll_interval_secs)
    }

    #[must_use]
    pub fn scrape_timeout(&self) -> Duration {
        Duration::from_secs(self.scrape_timeout_secs)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bright_data_username", &self.bright_data_username)
            .field("bright_data_password", &"[redacted]")
            .field("bright_data_api_key", &"[redacted]")
            .field("bright_data_api_url", &self.bright_data_api_url)
            .field("proxy_host", &self.proxy_host)
            .field("proxy_port", &self.proxy_port)
            .field("search_url", &self.search_url)
            .field("search_recency", &self.search_recency)
            .field("scrape_poll_interval_secs", &self.scrape_poll_interval_secs)
            .field("scrape_timeout_secs", &self.scrape_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("llm_provider", &self.llm_provider)
            .field("llm_temperature", &self.llm_temperature)
            .field("groq", &self.groq)
            .field("ollama", &self.ollama)
            .field("log_level", &self.log_level)
            .finish()
    }
}

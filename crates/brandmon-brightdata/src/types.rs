use brandmon_core::SearchHit;
use serde::{Deserialize, Serialize};

/// Google SERP rendered as JSON by the proxy. Only `organic` is used.
#[derive(Debug, Clone, Deserialize)]
pub struct SerpResponse {
    pub organic: Option<Vec<SearchHit>>,
}

/// Dataset parameters sent as query string on the trigger call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeParams {
    pub dataset_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_errors: Option<String>,
}

impl ScrapeParams {
    #[must_use]
    pub fn new(dataset_id: &str) -> Self {
        Self {
            dataset_id: dataset_id.to_string(),
            include_errors: None,
        }
    }

    #[must_use]
    pub fn include_errors(mut self, include: bool) -> Self {
        self.include_errors = Some(include.to_string());
        self
    }
}

/// One element of the trigger request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TriggerInput<'a> {
    pub url: &'a str,
}

/// Body returned by the trigger call.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TriggerResponse {
    pub snapshot_id: Option<String>,
}

/// Body returned by the progress endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProgressResponse {
    pub status: String,
    #[serde(default)]
    pub progress: Option<serde_json::Value>,
}

impl ProgressResponse {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == "failed"
    }
}

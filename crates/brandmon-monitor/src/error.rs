use brandmon_brightdata::BrightDataError;
use brandmon_core::ConfigError;
use thiserror::Error;

/// Errors from the LLM-backed summarizer.
#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("LLM transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LLM API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("LLM returned no content for the {stage} stage")]
    EmptyResponse { stage: &'static str },

    /// The writer output did not deserialize into a `PlatformReport`.
    #[error("report does not match schema: {source}")]
    SchemaValidation {
        #[source]
        source: serde_json::Error,
    },

    #[error("summarizer configuration error: {0}")]
    Configuration(String),
}

/// Why a platform pipeline ended without a report.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("search produced no URLs for this platform")]
    NoSearchResults,

    #[error("scrape failed: {0}")]
    Scrape(#[from] BrightDataError),

    #[error("scrape returned no records")]
    EmptyScrape,

    #[error("no usable records after filtering")]
    NoFilteredRecords,

    #[error("summarizer failed: {0}")]
    Summarizer(#[from] SummarizerError),

    #[error("pipeline panicked: {0}")]
    Panicked(String),
}

/// Errors raised before a run starts.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("brand name must not be empty")]
    InvalidBrand,

    #[error("failed to build Bright Data client: {0}")]
    Client(#[from] BrightDataError),

    #[error("failed to build summarizer: {0}")]
    Summarizer(#[from] SummarizerError),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

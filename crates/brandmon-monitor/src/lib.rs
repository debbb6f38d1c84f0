//! Multi-platform brand monitoring pipeline.
//!
//! A run searches for the brand once, buckets the hits by platform, then runs
//! one fetch → extract → summarize pipeline per platform concurrently. Each
//! pipeline owns its own slice of [`MonitoringState`]; a failure in one never
//! reaches the others.

pub mod classify;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod platform;
pub mod services;
pub mod state;
pub mod summarizer;
pub mod types;

pub use classify::classify;
pub use error::{MonitorError, PipelineError, SummarizerError};
pub use extract::{extract, NormalizedRecord};
pub use pipeline::{BrandMonitor, MAX_RESULT_LIMIT};
pub use platform::{descriptor, PlatformDescriptor};
pub use services::RemoteService;
pub use state::{MonitoringState, PipelineStatus, PlatformSlice};
pub use summarizer::{LlmSummarizer, Summarizer, SummaryRequest};
pub use types::{PlatformReport, PostSummary};

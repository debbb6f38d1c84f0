//! The aggregate produced by one monitoring run.

use std::collections::{BTreeMap, HashSet};

use brandmon_core::{LlmProvider, Platform, RawRecord, SearchHit};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::PipelineError;
use crate::extract::NormalizedRecord;
use crate::types::PlatformReport;

/// Where a platform pipeline stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStatus {
    Pending,
    Fetched,
    Filtered,
    Summarized,
    /// Nothing to do: no search hits, or nothing usable after filtering.
    Skipped,
    Failed,
}

impl PipelineStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetched => "fetched",
            Self::Filtered => "filtered",
            Self::Summarized => "summarized",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One platform's share of the run. Written only by that platform's pipeline.
#[derive(Debug)]
pub struct PlatformSlice {
    pub search_results: Vec<SearchHit>,
    pub scrape_results: Vec<RawRecord>,
    pub filtered_records: Vec<NormalizedRecord>,
    pub status: PipelineStatus,
    pub outcome: Result<PlatformReport, PipelineError>,
}

impl PlatformSlice {
    #[must_use]
    pub fn pending(search_results: Vec<SearchHit>) -> Self {
        Self {
            search_results,
            scrape_results: Vec::new(),
            filtered_records: Vec::new(),
            status: PipelineStatus::Pending,
            outcome: Err(PipelineError::NoSearchResults),
        }
    }

    /// Sets a terminal status and the error that caused it.
    #[must_use]
    pub fn stop(mut self, status: PipelineStatus, error: PipelineError) -> Self {
        self.status = status;
        self.outcome = Err(error);
        self
    }

    #[must_use]
    pub fn report(&self) -> Option<&PlatformReport> {
        self.outcome.as_ref().ok()
    }

    #[must_use]
    pub fn error(&self) -> Option<&PipelineError> {
        self.outcome.as_ref().err()
    }
}

/// Final snapshot of a monitoring run.
#[derive(Debug)]
pub struct MonitoringState {
    pub run_id: Uuid,
    pub brand_name: String,
    pub result_limit: usize,
    pub llm_provider: LlmProvider,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Every search hit, before classification.
    pub raw_search_results: Vec<SearchHit>,
    /// One entry per platform in [`Platform::ALL`].
    pub platforms: BTreeMap<Platform, PlatformSlice>,
}

impl MonitoringState {
    #[must_use]
    pub fn slice(&self, platform: Platform) -> Option<&PlatformSlice> {
        self.platforms.get(&platform)
    }

    #[must_use]
    pub fn report(&self, platform: Platform) -> Option<&PlatformReport> {
        self.slice(platform).and_then(PlatformSlice::report)
    }

    #[must_use]
    pub fn status(&self, platform: Platform) -> Option<PipelineStatus> {
        self.slice(platform).map(|s| s.status)
    }

    /// True if at least one platform produced a report.
    #[must_use]
    pub fn has_results(&self) -> bool {
        self.platforms.values().any(|s| s.report().is_some())
    }

    /// Every raw search link, deduplicated, in first-seen order.
    #[must_use]
    pub fn fallback_urls(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.raw_search_results
            .iter()
            .map(|hit| hit.link.as_str())
            .filter(|link| !link.is_empty() && seen.insert(*link))
            .collect()
    }
}

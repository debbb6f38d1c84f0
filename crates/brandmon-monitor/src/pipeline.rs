//! Pipeline orchestration: search once, then one pipeline per platform.
//!
//! Platform pipelines run concurrently on the calling task and are joined
//! with `join_all`. Each returns its own [`PlatformSlice`]; a panic inside
//! one is caught and recorded for that platform only.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use brandmon_brightdata::BrightDataClient;
use brandmon_core::{AppConfig, LlmProvider, Platform, SearchHit};
use chrono::Utc;
use futures::future::join_all;
use futures::FutureExt;
use tracing::Instrument;
use uuid::Uuid;

use crate::classify::classify;
use crate::error::{MonitorError, PipelineError};
use crate::extract::extract_all;
use crate::services::RemoteService;
use crate::state::{MonitoringState, PipelineStatus, PlatformSlice};
use crate::summarizer::{LlmSummarizer, Summarizer, SummaryRequest};

/// Upper bound on results kept per platform.
pub const MAX_RESULT_LIMIT: usize = 5;

pub struct BrandMonitor {
    remote: Arc<dyn RemoteService>,
    summarizer: Arc<dyn Summarizer>,
    brand_name: String,
    result_limit: usize,
    llm_provider: LlmProvider,
}

impl BrandMonitor {
    /// Prepares a run for `brand_name`. `result_limit` is clamped to
    /// `1..=MAX_RESULT_LIMIT`.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::InvalidBrand`] if the brand name is blank.
    pub fn initialize(
        remote: Arc<dyn RemoteService>,
        summarizer: Arc<dyn Summarizer>,
        brand_name: &str,
        result_limit: usize,
        llm_provider: LlmProvider,
    ) -> Result<Self, MonitorError> {
        let brand_name = brand_name.trim();
        if brand_name.is_empty() {
            return Err(MonitorError::InvalidBrand);
        }

        let clamped = result_limit.clamp(1, MAX_RESULT_LIMIT);
        if clamped != result_limit {
            tracing::warn!(requested = result_limit, using = clamped, "result limit clamped");
        }

        Ok(Self {
            remote,
            summarizer,
            brand_name: brand_name.to_string(),
            result_limit: clamped,
            llm_provider,
        })
    }

    /// Wires the Bright Data client and the LLM summarizer from config.
    ///
    /// Credentials for `llm_provider` are checked here, before anything runs.
    ///
    /// # Errors
    ///
    /// - [`MonitorError::Config`] if the provider's credentials are missing.
    /// - [`MonitorError::Client`] / [`MonitorError::Summarizer`] if an HTTP
    ///   client cannot be built.
    /// - [`MonitorError::InvalidBrand`] if the brand name is blank.
    pub fn from_config(
        config: Arc<AppConfig>,
        brand_name: &str,
        result_limit: usize,
        llm_provider: LlmProvider,
    ) -> Result<Self, MonitorError> {
        config.require_llm_credentials(llm_provider)?;
        let remote = BrightDataClient::from_config(&config)?;
        let summarizer = LlmSummarizer::new(config)?;
        Self::initialize(
            Arc::new(remote),
            Arc::new(summarizer),
            brand_name,
            result_limit,
            llm_provider,
        )
    }

    #[must_use]
    pub fn brand_name(&self) -> &str {
        &self.brand_name
    }

    #[must_use]
    pub fn result_limit(&self) -> usize {
        self.result_limit
    }

    /// Runs the whole workflow. Never fails: per-platform problems are
    /// recorded in the returned state.
    pub async fn run(&self) -> MonitoringState {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("monitor_run", %run_id, brand = %self.brand_name);
        self.run_inner(run_id).instrument(span).await
    }

    /// Drives [`run`](Self::run) on a fresh current-thread runtime.
    ///
    /// Must not be called from inside an async context.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Runtime`] if the runtime cannot be started.
    pub fn run_blocking(&self) -> Result<MonitoringState, MonitorError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(MonitorError::Runtime)?;
        Ok(runtime.block_on(self.run()))
    }

    async fn run_inner(&self, run_id: Uuid) -> MonitoringState {
        let started_at = Utc::now();
        tracing::info!(
            limit = self.result_limit,
            provider = %self.llm_provider,
            "monitoring run started"
        );

        let raw_search_results = self
            .remote
            .search(&self.brand_name, self.result_limit)
            .await;
        tracing::info!(hits = raw_search_results.len(), "search finished");

        let mut buckets = classify(&raw_search_results, self.result_limit);

        let pipelines = Platform::ALL.map(|platform| {
            let bucket = buckets.remove(&platform).unwrap_or_default();
            let fallback = bucket.clone();
            AssertUnwindSafe(self.run_platform(platform, bucket))
                .catch_unwind()
                .map(move |outcome| {
                    let slice = outcome.unwrap_or_else(|payload| {
                        let message = panic_message(payload.as_ref());
                        tracing::error!(platform = %platform, panic = %message, "pipeline panicked");
                        PlatformSlice::pending(fallback)
                            .stop(PipelineStatus::Failed, PipelineError::Panicked(message))
                    });
                    (platform, slice)
                })
        });

        let platforms: BTreeMap<Platform, PlatformSlice> =
            join_all(pipelines).await.into_iter().collect();

        let state = MonitoringState {
            run_id,
            brand_name: self.brand_name.clone(),
            result_limit: self.result_limit,
            llm_provider: self.llm_provider,
            started_at,
            finished_at: Utc::now(),
            raw_search_results,
            platforms,
        };

        if state.has_results() {
            tracing::info!("monitoring run finished");
        } else {
            tracing::warn!(
                fallback_urls = state.fallback_urls().len(),
                "no platform produced a report"
            );
        }
        state
    }

    /// fetch → filter → summarize for one platform.
    async fn run_platform(&self, platform: Platform, search_results: Vec<SearchHit>) -> PlatformSlice {
        let mut slice = PlatformSlice::pending(search_results);

        if slice.search_results.is_empty() {
            tracing::info!(platform = %platform, "no search results, skipping");
            return slice.stop(PipelineStatus::Skipped, PipelineError::NoSearchResults);
        }

        let urls: Vec<String> = slice
            .search_results
            .iter()
            .map(|hit| hit.link.clone())
            .collect();

        match self.remote.scrape(platform, &urls).await {
            Ok(records) if records.is_empty() => {
                tracing::warn!(platform = %platform, "scrape returned no records");
                return slice.stop(PipelineStatus::Failed, PipelineError::EmptyScrape);
            }
            Ok(mut records) => {
                records.truncate(self.result_limit);
                slice.scrape_results = records;
                slice.status = PipelineStatus::Fetched;
            }
            Err(e) => {
                tracing::warn!(platform = %platform, error = %e, "scrape failed");
                return slice.stop(PipelineStatus::Failed, PipelineError::Scrape(e));
            }
        }

        slice.filtered_records = extract_all(platform, &slice.scrape_results);
        if slice.filtered_records.is_empty() {
            tracing::info!(platform = %platform, "no usable records after filtering");
            return slice.stop(PipelineStatus::Skipped, PipelineError::NoFilteredRecords);
        }
        slice.status = PipelineStatus::Filtered;

        let request = SummaryRequest {
            platform,
            brand_name: &self.brand_name,
            records: &slice.filtered_records,
            provider: self.llm_provider,
        };
        let summary = self.summarizer.summarize(request).await;
        match summary {
            Ok(report) => {
                tracing::info!(platform = %platform, posts = report.content.len(), "platform summarized");
                slice.status = PipelineStatus::Summarized;
                slice.outcome = Ok(report);
                slice
            }
            Err(e) => {
                tracing::warn!(platform = %platform, error = %e, "summarizer failed");
                slice.stop(PipelineStatus::Failed, PipelineError::Summarizer(e))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

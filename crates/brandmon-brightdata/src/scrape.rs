//! Dataset scrape: trigger a job, poll its progress, fetch the snapshot.

use brandmon_core::RawRecord;
use tokio::time::{timeout_at, Instant};

use crate::client::BrightDataClient;
use crate::error::BrightDataError;
use crate::types::{ProgressResponse, ScrapeParams, TriggerInput, TriggerResponse};

impl BrightDataClient {
    /// Scrapes `urls` with the given dataset parameters.
    ///
    /// Fails soft: any error (non-2xx trigger, malformed handle, timeout,
    /// malformed snapshot) is logged and an empty `Vec` is returned. An empty
    /// `urls` slice returns immediately without a network call.
    pub async fn scrape(&self, urls: &[String], params: &ScrapeParams, tag: &str) -> Vec<RawRecord> {
        match self.try_scrape(urls, params, tag).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(scrape = tag, error = %e, "scrape failed");
                Vec::new()
            }
        }
    }

    /// Scrapes `urls`, surfacing the failure reason.
    ///
    /// # Errors
    ///
    /// - [`BrightDataError::UnexpectedStatus`] on a non-2xx trigger, progress
    ///   or snapshot response.
    /// - [`BrightDataError::MalformedResponse`] / [`BrightDataError::Deserialize`]
    ///   when a body lacks the expected shape.
    /// - [`BrightDataError::SnapshotFailed`] if the job reports `failed`.
    /// - [`BrightDataError::Timeout`] if the trigger and progress polling
    ///   together do not reach `ready` within the scrape timeout.
    /// - [`BrightDataError::Http`] on network failure.
    pub async fn try_scrape(
        &self,
        urls: &[String],
        params: &ScrapeParams,
        tag: &str,
    ) -> Result<Vec<RawRecord>, BrightDataError> {
        if urls.is_empty() {
            tracing::debug!(scrape = tag, "no URLs to scrape");
            return Ok(Vec::new());
        }

        tracing::info!(scrape = tag, count = urls.len(), dataset = %params.dataset_id, "triggering scrape");
        let started = Instant::now();
        let deadline = started + self.scrape_timeout;

        let snapshot_id = timeout_at(deadline, self.trigger(urls, params))
            .await
            .map_err(|_| BrightDataError::Timeout {
                stage: "trigger".to_string(),
                waited: started.elapsed(),
            })??;
        tracing::debug!(scrape = tag, snapshot_id = %snapshot_id, "scrape triggered");

        timeout_at(deadline, self.wait_for_snapshot(&snapshot_id, started, deadline, tag))
            .await
            .map_err(|_| BrightDataError::Timeout {
                stage: format!("snapshot {snapshot_id}"),
                waited: started.elapsed(),
            })??;
        let records = self.fetch_snapshot(&snapshot_id).await?;
        tracing::info!(scrape = tag, count = records.len(), "scrape complete");
        Ok(records)
    }

    /// Submits the job and returns its snapshot handle.
    async fn trigger(&self, urls: &[String], params: &ScrapeParams) -> Result<String, BrightDataError> {
        let url = self.api_url("datasets/v3/trigger")?;
        let body: Vec<TriggerInput<'_>> = urls.iter().map(|u| TriggerInput { url: u }).collect();

        let response = self
            .api_http
            .post(url.clone())
            .bearer_auth(&self.api_key)
            .query(params)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrightDataError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        let parsed: TriggerResponse =
            serde_json::from_str(&text).map_err(|e| BrightDataError::Deserialize {
                context: "trigger response".to_string(),
                source: e,
            })?;

        parsed
            .snapshot_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| BrightDataError::MalformedResponse {
                context: "trigger response".to_string(),
                reason: "missing snapshot_id".to_string(),
            })
    }

    /// Polls the progress endpoint at a fixed interval until the snapshot is
    /// `ready` or `deadline` passes. The caller also bounds the whole loop by
    /// `deadline`, so a slow progress request cannot outlive it.
    async fn wait_for_snapshot(
        &self,
        snapshot_id: &str,
        started: Instant,
        deadline: Instant,
        tag: &str,
    ) -> Result<(), BrightDataError> {
        loop {
            let progress = self.fetch_progress(snapshot_id).await?;
            if progress.is_ready() {
                return Ok(());
            }
            if progress.is_failed() {
                return Err(BrightDataError::SnapshotFailed {
                    snapshot_id: snapshot_id.to_string(),
                    status: progress.status,
                });
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(BrightDataError::Timeout {
                    stage: format!("snapshot {snapshot_id}"),
                    waited: now.duration_since(started),
                });
            }

            tracing::debug!(
                scrape = tag,
                snapshot_id,
                status = %progress.status,
                progress = ?progress.progress,
                "snapshot not ready"
            );
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }
    }

    async fn fetch_progress(&self, snapshot_id: &str) -> Result<ProgressResponse, BrightDataError> {
        let url = self.api_url(&format!("datasets/v3/progress/{snapshot_id}"))?;
        let response = self
            .api_http
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrightDataError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| BrightDataError::Deserialize {
            context: format!("progress for snapshot {snapshot_id}"),
            source: e,
        })
    }

    /// Downloads the finished snapshot. Non-object array items are dropped.
    async fn fetch_snapshot(&self, snapshot_id: &str) -> Result<Vec<RawRecord>, BrightDataError> {
        let url = self.api_url(&format!("datasets/v3/snapshot/{snapshot_id}"))?;
        let response = self
            .api_http
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .query(&[("format", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrightDataError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| BrightDataError::Deserialize {
                context: format!("snapshot {snapshot_id}"),
                source: e,
            })?;

        records_from_snapshot(value).ok_or_else(|| BrightDataError::MalformedResponse {
            context: format!("snapshot {snapshot_id}"),
            reason: "expected a JSON array of records".to_string(),
        })
    }
}

/// Keeps the object items of a snapshot array; `None` if it is not an array.
pub(crate) fn records_from_snapshot(value: serde_json::Value) -> Option<Vec<RawRecord>> {
    let serde_json::Value::Array(items) = value else {
        return None;
    };
    Some(
        items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
    )
}

//! Proxied Google search returning organic hits.

use brandmon_core::SearchHit;
use reqwest::Url;

use crate::client::BrightDataClient;
use crate::error::BrightDataError;
use crate::types::SerpResponse;

impl BrightDataClient {
    /// Runs every query in order and concatenates their organic hits.
    ///
    /// Fails soft: a query that errors is logged and contributes nothing.
    /// Results are not deduplicated across queries.
    pub async fn search(&self, queries: &[String], num_results: usize) -> Vec<SearchHit> {
        let mut hits = Vec::new();

        for query in queries {
            match self.search_one(query, num_results).await {
                Ok(found) => {
                    tracing::info!(query = %query, count = found.len(), "search query returned hits");
                    hits.extend(found);
                }
                Err(e) => {
                    tracing::warn!(query = %query, error = %e, "search query failed");
                }
            }
        }

        tracing::info!(total = hits.len(), "search complete");
        hits
    }

    /// Runs a single search query.
    ///
    /// # Errors
    ///
    /// - [`BrightDataError::Http`] on proxy or network failure.
    /// - [`BrightDataError::UnexpectedStatus`] for any non-2xx response.
    /// - [`BrightDataError::Deserialize`] if the body is not JSON.
    /// - [`BrightDataError::MalformedResponse`] if the body has no `organic` array.
    pub async fn search_one(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchHit>, BrightDataError> {
        let url = self.search_request_url(query, num_results);

        let response = self.search_http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BrightDataError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let serp: SerpResponse =
            serde_json::from_str(&body).map_err(|e| BrightDataError::Deserialize {
                context: format!("search results for {query}"),
                source: e,
            })?;

        serp.organic
            .ok_or_else(|| BrightDataError::MalformedResponse {
                context: format!("search results for {query}"),
                reason: "missing `organic` array".to_string(),
            })
    }

    /// Builds the SERP URL for `query`: `q`, recency window, JSON rendering
    /// and result count.
    pub(crate) fn search_request_url(&self, query: &str, num_results: usize) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("tbs", &format!("qdr:{}", self.search_recency))
            .append_pair("brd_json", "1")
            .append_pair("num", &num_results.to_string());
        url
    }
}

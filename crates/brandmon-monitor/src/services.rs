//! The remote search/scrape boundary the orchestrator depends on.

use async_trait::async_trait;
use brandmon_brightdata::{BrightDataClient, BrightDataError};
use brandmon_core::{Platform, RawRecord, SearchHit};

use crate::platform::descriptor;

#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Searches every platform for `brand_name`, `per_platform_limit` hits
    /// per query. Fails soft: errors yield fewer (or zero) hits.
    async fn search(&self, brand_name: &str, per_platform_limit: usize) -> Vec<SearchHit>;

    /// Scrapes `urls` with `platform`'s dataset. Empty input must not touch
    /// the network.
    async fn scrape(
        &self,
        platform: Platform,
        urls: &[String],
    ) -> Result<Vec<RawRecord>, BrightDataError>;
}

#[async_trait]
impl RemoteService for BrightDataClient {
    async fn search(&self, brand_name: &str, per_platform_limit: usize) -> Vec<SearchHit> {
        let queries: Vec<String> = Platform::ALL
            .iter()
            .map(|p| descriptor(*p).search_query(brand_name))
            .collect();
        BrightDataClient::search(self, &queries, per_platform_limit).await
    }

    async fn scrape(
        &self,
        platform: Platform,
        urls: &[String],
    ) -> Result<Vec<RawRecord>, BrightDataError> {
        let desc = descriptor(platform);
        self.try_scrape(urls, &desc.scrape_params(), desc.scrape_tag)
            .await
    }
}

//! Routes raw search hits into capped per-platform buckets.

use std::collections::BTreeMap;

use brandmon_core::{Platform, SearchHit};
use reqwest::Url;

use crate::platform::descriptor;

/// Buckets `raw_results` by platform in a single pass.
///
/// Each hit goes to the first platform (in [`Platform::ALL`] order) whose
/// domains match its link, and only to that one. Hits matching no platform
/// are dropped. A bucket that already holds `limit` hits ignores later ones,
/// so selection is by arrival order. Every platform has an entry in the
/// returned map, possibly empty.
#[must_use]
pub fn classify(raw_results: &[SearchHit], limit: usize) -> BTreeMap<Platform, Vec<SearchHit>> {
    let mut buckets: BTreeMap<Platform, Vec<SearchHit>> =
        Platform::ALL.iter().map(|p| (*p, Vec::new())).collect();

    for hit in raw_results {
        let Some(platform) = platform_for_link(&hit.link) else {
            tracing::debug!(link = %hit.link, "search hit matches no platform");
            continue;
        };
        let bucket = buckets.entry(platform).or_default();
        if bucket.len() < limit {
            bucket.push(hit.clone());
        }
    }

    buckets
}

/// The platform a link belongs to, by host.
#[must_use]
pub fn platform_for_link(link: &str) -> Option<Platform> {
    let host = link_host(link)?;
    Platform::ALL
        .into_iter()
        .find(|p| descriptor(*p).matches_host(&host))
}

/// Lowercased host of `link`. Scheme-less links are read as `https`.
fn link_host(link: &str) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }
    let url = Url::parse(link).or_else(|_| Url::parse(&format!("https://{link}"))).ok()?;
    url.host_str().map(str::to_ascii_lowercase)
}

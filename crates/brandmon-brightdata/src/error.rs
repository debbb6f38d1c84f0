use std::time::Duration;

use thiserror::Error;

/// Errors returned by the Bright Data client.
#[derive(Debug, Error)]
pub enum BrightDataError {
    /// Network, proxy, or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed as JSON but did not have the expected shape.
    #[error("malformed response for {context}: {reason}")]
    MalformedResponse { context: String, reason: String },

    #[error("snapshot {snapshot_id} finished with status \"{status}\"")]
    SnapshotFailed { snapshot_id: String, status: String },

    /// The scrape deadline passed during `stage` (`trigger` or `snapshot <id>`).
    #[error("scrape timed out after {waited:?} waiting for {stage}")]
    Timeout { stage: String, waited: Duration },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

//! Bright Data client: proxied SERP search and the dataset scrape API.
//!
//! Search goes through the Bright Data super-proxy against a Google results
//! page rendered as JSON (`brd_json=1`). Scraping uses the dataset API's
//! trigger → progress → snapshot protocol with a bounded poll loop.

pub mod client;
pub mod error;
pub mod scrape;
pub mod search;
pub mod types;

pub use client::BrightDataClient;
pub use error::BrightDataError;
pub use types::ScrapeParams;

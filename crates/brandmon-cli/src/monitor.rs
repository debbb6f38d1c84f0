//! `monitor` command handler.

use std::sync::Arc;

use brandmon_core::{AppConfig, LlmProvider};
use brandmon_monitor::BrandMonitor;

use crate::render::{render, OutputFormat};

/// Runs one monitoring pass for `brand` and prints the report to stdout.
///
/// Missing credentials for `provider` abort before any network call.
/// A run in which no platform produced a report still succeeds and prints
/// the raw search URLs instead.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, a client cannot be built,
/// or the report cannot be serialized.
pub(crate) async fn run_monitor(
    config: AppConfig,
    brand: &str,
    limit: usize,
    provider: LlmProvider,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let monitor = BrandMonitor::from_config(Arc::new(config), brand, limit, provider)?;

    tracing::info!(
        brand = monitor.brand_name(),
        limit = monitor.result_limit(),
        provider = %provider,
        "starting brand monitoring"
    );
    let state = monitor.run().await;

    if !state.has_results() {
        tracing::warn!(brand = monitor.brand_name(), "no platform produced a report");
    }

    print!("{}", render(&state, format)?);
    Ok(())
}

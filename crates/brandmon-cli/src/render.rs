//! Rendering a finished [`MonitoringState`] as text, markdown or JSON.

use std::fmt::{self, Write as _};

use brandmon_core::{LlmProvider, Platform};
use brandmon_monitor::{MonitoringState, PlatformReport, PlatformSlice};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Markdown,
    Json,
}

/// Renders `state` in the requested format.
///
/// # Errors
///
/// Returns an error if formatting or JSON serialization fails.
pub(crate) fn render(state: &MonitoringState, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(state)?),
        OutputFormat::Markdown => Ok(render_markdown(state)?),
        OutputFormat::Json => render_json(state),
    }
}

/// One-word status plus the reason for anything that did not produce a report.
fn status_line(slice: &PlatformSlice) -> String {
    match (slice.report(), slice.error()) {
        (Some(report), _) => format!("{} ({} posts)", slice.status, report.content.len()),
        (None, Some(e)) => format!("{}: {e}", slice.status),
        (None, None) => slice.status.to_string(),
    }
}

fn render_text(state: &MonitoringState) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Brand monitoring for \"{}\"", state.brand_name)?;
    writeln!(
        out,
        "run {} | provider {} | up to {} results per platform",
        state.run_id, state.llm_provider, state.result_limit
    )?;

    for (platform, slice) in &state.platforms {
        writeln!(out)?;
        writeln!(out, "== {} == {}", platform.display_name(), status_line(slice))?;
        if let Some(report) = slice.report() {
            for (i, post) in report.content.iter().enumerate() {
                writeln!(out, "{}. {}", i + 1, post.title)?;
                writeln!(out, "   {}", post.link)?;
                for point in &post.bullet_points {
                    writeln!(out, "   - {point}")?;
                }
            }
        }
    }

    if !state.has_results() {
        writeln!(out)?;
        writeln!(out, "No platform produced a report. Raw search results:")?;
        let urls = state.fallback_urls();
        if urls.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for url in urls {
            writeln!(out, "  {url}")?;
        }
    }
    Ok(out)
}

fn render_markdown(state: &MonitoringState) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "# Brand Monitoring Report: {}", state.brand_name)?;
    writeln!(out)?;
    writeln!(out, "**Run**: {}", state.run_id)?;
    writeln!(out, "**Provider**: {}", state.llm_provider)?;
    writeln!(
        out,
        "**Generated**: {}",
        state.finished_at.format("%Y-%m-%d %H:%M UTC")
    )?;
    writeln!(out)?;
    writeln!(out, "| Platform | Status | Hits | Posts |")?;
    writeln!(out, "|----------|--------|------|-------|")?;
    for (platform, slice) in &state.platforms {
        let posts = slice.report().map_or(0, |r| r.content.len());
        writeln!(
            out,
            "| {} | {} | {} | {} |",
            platform.display_name(),
            slice.status,
            slice.search_results.len(),
            posts
        )?;
    }

    for (platform, slice) in &state.platforms {
        let Some(report) = slice.report() else {
            continue;
        };
        writeln!(out)?;
        writeln!(out, "## {}", platform.display_name())?;
        for post in &report.content {
            writeln!(out)?;
            writeln!(out, "### [{}]({})", post.title, post.link)?;
            writeln!(out)?;
            for point in &post.bullet_points {
                writeln!(out, "- {point}")?;
            }
        }
    }

    if !state.has_results() {
        writeln!(out)?;
        writeln!(out, "## Raw search results")?;
        writeln!(out)?;
        let urls = state.fallback_urls();
        if urls.is_empty() {
            writeln!(out, "_No search results._")?;
        }
        for url in urls {
            writeln!(out, "- <{url}>")?;
        }
    }
    Ok(out)
}

#[derive(Serialize)]
struct RunView<'a> {
    run_id: Uuid,
    brand_name: &'a str,
    llm_provider: LlmProvider,
    result_limit: usize,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    has_results: bool,
    platforms: Vec<PlatformView<'a>>,
    fallback_urls: Vec<&'a str>,
}

#[derive(Serialize)]
struct PlatformView<'a> {
    platform: Platform,
    status: &'static str,
    search_results: usize,
    scrape_results: usize,
    filtered_records: usize,
    report: Option<&'a PlatformReport>,
    error: Option<String>,
}

fn render_json(state: &MonitoringState) -> anyhow::Result<String> {
    let view = RunView {
        run_id: state.run_id,
        brand_name: &state.brand_name,
        llm_provider: state.llm_provider,
        result_limit: state.result_limit,
        started_at: state.started_at,
        finished_at: state.finished_at,
        has_results: state.has_results(),
        platforms: state
            .platforms
            .iter()
            .map(|(platform, slice)| PlatformView {
                platform: *platform,
                status: slice.status.as_str(),
                search_results: slice.search_results.len(),
                scrape_results: slice.scrape_results.len(),
                filtered_records: slice.filtered_records.len(),
                report: slice.report(),
                error: slice.error().map(ToString::to_string),
            })
            .collect(),
        fallback_urls: state.fallback_urls(),
    };
    let mut json = serde_json::to_string_pretty(&view)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

//! Monitor command: fetch the dashboard payload over HTTP, extract the
//! last-complete-hour value and assess it against the thresholds.
//!
//! The fetch is a plain request/response exchange; the core library
//! never sees the network. Screenshotting and mail dispatch are handled
//! by external tooling consuming this command's JSON output.

use anyhow::Context;
use empaq_assess::{Severity, ThresholdSet};
use log::{error, info, warn};

/// Fetch, extract and assess one reading.
///
/// Exits with an error on fatal extraction failures (`ParseFailure`,
/// `NoActualSeriesFound`); a fallback selection is reported but not
/// fatal.
pub async fn run_monitor(
    url: &str,
    thresholds: &ThresholdSet,
    now: Option<&str>,
) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;

    info!("fetching payload from {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?;

    if !response.status().is_success() {
        anyhow::bail!("bad response from {}: {}", url, response.status());
    }

    let body = response
        .text()
        .await
        .context("failed to read response body")?;
    if body.trim().is_empty() {
        anyhow::bail!("empty response body from {}", url);
    }

    let now = crate::resolve_now(now)?;
    let selection = empaq_extract::extract_value(&body, now)
        .with_context(|| format!("extraction failed for payload from {}", url))?;

    if selection.fallback_used {
        warn!(
            "target hour missing upstream; assessed the most recent reading ({})",
            selection.timestamp
        );
    }

    let assessment = empaq_assess::assess(selection.value, thresholds);
    match assessment.severity {
        Severity::Critical => error!("{}", assessment.message),
        Severity::Warning => warn!("{}", assessment.message),
        Severity::Neutral => info!("{}", assessment.message),
    }

    let output = serde_json::json!({
        "selection": selection,
        "assessment": assessment,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

//! Run log persistence

use crate::core::RateHistory;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::path::Path;
use tracing::debug;

pub const LOG_HEADER_PREFIX: &str = "Exchange command executed at ";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Pretty JSON with two-space indentation. Non-ASCII text is written as is.
pub fn to_pretty_json(history: &RateHistory) -> Result<String> {
    serde_json::to_string_pretty(history).context("Failed to serialize exchange rates")
}

pub fn render_log(history: &RateHistory, executed_at: NaiveDateTime) -> Result<String> {
    Ok(format!(
        "{}{}\n{}",
        LOG_HEADER_PREFIX,
        executed_at.format(TIMESTAMP_FORMAT),
        to_pretty_json(history)?
    ))
}

/// Replaces the file at `path` with the run header and the rates.
pub async fn write_log<P: AsRef<Path>>(
    path: P,
    history: &RateHistory,
    executed_at: NaiveDateTime,
) -> Result<()> {
    let path = path.as_ref();
    let contents = render_log(history, executed_at)?;
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write exchange log: {}", path.display()))?;
    debug!("Wrote exchange log to {}", path.display());
    Ok(())
}

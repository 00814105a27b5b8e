use chrono::NaiveDateTime;
use log::warn;
use serde::Serialize;

use crate::error::{ExtractError, Result};
use crate::record::{CandidateRecord, SeriesKind};

/// The value selected for a run, with the metadata the caller needs to
/// decide how loudly to report it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub value: f64,
    pub hour: u32,
    pub timestamp: NaiveDateTime,
    /// True when no actual record existed at or before the target hour
    /// and the most recent one was used instead. Informational, not an
    /// error; the caller may soften its notification.
    pub fallback_used: bool,
}

/// Pick the authoritative value for `target_hour` from the candidates.
///
/// Only `Actual` records are considered; `Unknown` records are never a
/// fallback. Among actuals at or before the target hour the newest wins,
/// with the quality flag breaking ties between equal timestamps. If the
/// hour filter leaves nothing, the newest actual overall is returned
/// with `fallback_used` set.
pub fn select(candidates: &[CandidateRecord], target_hour: u32) -> Result<Selection> {
    let mut actuals: Vec<&CandidateRecord> = candidates
        .iter()
        .filter(|c| c.series == SeriesKind::Actual)
        .collect();
    if actuals.is_empty() {
        return Err(ExtractError::NoActualSeriesFound);
    }

    actuals.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.quality.rank().cmp(&a.quality.rank()))
    });

    if let Some(hit) = actuals.iter().find(|c| c.hour <= target_hour) {
        return Ok(Selection {
            value: hit.value,
            hour: hit.hour,
            timestamp: hit.timestamp,
            fallback_used: false,
        });
    }

    let newest = actuals[0];
    warn!(
        "no Empacotamento record at or before hour {}; falling back to {} ({})",
        target_hour, newest.timestamp, newest.value
    );
    Ok(Selection {
        value: newest.value,
        hour: newest.hour,
        timestamp: newest.timestamp,
        fallback_used: true,
    })
}

use chrono::NaiveDateTime;
use log::{debug, info};

use crate::error::{ExtractError, Result};
use crate::parser;
use crate::payload::Payload;
use crate::selector::{self, Selection};
use crate::time_bucket;

/// Run the full extraction pipeline on a raw payload.
///
/// `now` is injected by the caller; the core never reads the system
/// clock. Pipeline: detect shape, parse, bucket `now` into the last
/// complete hour, select. Fails with `ParseFailure` when the payload
/// yields no candidates at all, or `NoActualSeriesFound` when none of
/// them belong to the Empacotamento series.
pub fn extract_value(raw: &str, now: NaiveDateTime) -> Result<Selection> {
    let payload = Payload::detect(raw);
    let candidates = parser::parse(&payload);
    if candidates.is_empty() {
        return Err(ExtractError::ParseFailure);
    }
    debug!("parsed {} candidate records", candidates.len());

    let bucket = time_bucket::last_complete_hour(now);
    let selection = selector::select(&candidates, bucket.hour)?;
    info!(
        "selected {} for hour {} (timestamp {}, fallback: {})",
        selection.value, selection.hour, selection.timestamp, selection.fallback_used
    );
    Ok(selection)
}

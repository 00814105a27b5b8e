use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::classifier;

/// Which series a record belongs to.
///
/// The dashboard publishes two series with overlapping numeric ranges:
/// the measured "Empacotamento" values and the "Estimativa/Previsão"
/// projections. Only `Actual` records are ever selectable.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    Actual,
    Forecast,
    Unknown,
}

/// Quality flag attached by the upstream source, when present.
///
/// JSON payloads in the PI style carry a `Good` boolean per item; the
/// text table carries nothing, so rows parsed from it are `Unknown`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Quality {
    Good,
    Bad,
    Unknown,
}

impl Quality {
    /// Rank for tie-breaking: `Good` beats `Unknown` beats `Bad`.
    pub fn rank(&self) -> u8 {
        match self {
            Quality::Good => 2,
            Quality::Unknown => 1,
            Quality::Bad => 0,
        }
    }
}

/// A single parsed reading from the dashboard payload.
///
/// Immutable once constructed; `hour` and `series` are derived from the
/// timestamp and tag at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub tag: String,
    pub timestamp: NaiveDateTime,
    pub hour: u32,
    pub value: f64,
    pub quality: Quality,
    pub series: SeriesKind,
}

impl CandidateRecord {
    pub fn new(tag: String, timestamp: NaiveDateTime, value: f64, quality: Quality) -> Self {
        let series = classifier::classify(&tag);
        CandidateRecord {
            hour: timestamp.hour(),
            tag,
            timestamp,
            value,
            quality,
            series,
        }
    }
}

impl Ord for CandidateRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}

impl Eq for CandidateRecord {}

impl PartialEq for CandidateRecord {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp && self.tag == other.tag
    }
}

impl PartialOrd for CandidateRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

//! Core extraction library for the Empacotamento hourly monitor.
//!
//! Turns a raw dashboard payload (delimited text table or one of several
//! JSON layouts) into candidate records, classifies them into the actual
//! vs. forecast series, and selects the authoritative value for the last
//! complete hour. Pure and synchronous; the clock and all I/O live with
//! the caller.

pub mod classifier;
pub mod error;
pub mod extract;
pub mod parser;
pub mod payload;
pub mod record;
pub mod selector;
pub mod time_bucket;

pub use error::{ExtractError, Result};
pub use extract::extract_value;
pub use record::{CandidateRecord, Quality, SeriesKind};
pub use selector::Selection;

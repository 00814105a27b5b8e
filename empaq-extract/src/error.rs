/// Error types for the extraction library.
use thiserror::Error;

/// Errors that cross the extraction boundary.
///
/// Per-row parse failures never surface here: rows or items that fail
/// structural parsing are skipped locally. Only these two fatal kinds
/// reach the caller, kept distinct so it can alert differently on
/// "no data" vs. "wrong data".
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ExtractError {
    /// The payload produced zero usable rows across all supported shapes.
    #[error("payload produced no usable rows")]
    ParseFailure,

    /// Rows parsed, but none belong to the Empacotamento (actual) series.
    #[error("no record from the Empacotamento series found")]
    NoActualSeriesFound,
}

/// Type alias for Results using ExtractError
pub type Result<T> = std::result::Result<T, ExtractError>;

use serde_json::Value;

/// A raw dashboard payload, classified by outer shape.
///
/// The dashboard serves the same series through several channels and the
/// shape varies by channel: a delimited text table from the CSV export,
/// or JSON in one of the layouts `parser` knows how to walk.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Delimited text table with a header row: label, datetime, value.
    DelimitedText(String),
    /// Any of the supported JSON layouts.
    Json(Value),
}

impl Payload {
    /// Classify a raw payload. Anything that parses as JSON is handed to
    /// the JSON shape matchers; everything else is treated as a text
    /// table.
    pub fn detect(raw: &str) -> Payload {
        match serde_json::from_str::<Value>(raw.trim()) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::DelimitedText(raw.to_string()),
        }
    }
}

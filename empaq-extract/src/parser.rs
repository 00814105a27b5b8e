use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use log::debug;
use serde_json::Value;

use crate::payload::Payload;
use crate::record::{CandidateRecord, Quality};

/// Datetime format used in the text table: "06/12/2025, 14:00:00"
pub const TEXT_DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Fallback datetime formats tried for JSON timestamp strings.
const JSON_DATE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y, %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

/// Parse a classified payload into candidate records.
///
/// Parsing is forgiving: rows or items that fail structurally (missing
/// columns, unparsable date, non-numeric value) are skipped and excluded
/// from every candidate set. The caller decides whether an empty result
/// is fatal.
pub fn parse(payload: &Payload) -> Vec<CandidateRecord> {
    match payload {
        Payload::DelimitedText(text) => parse_table(text),
        Payload::Json(value) => parse_json(value),
    }
}

/// Parse the delimited text table: header row, then [label, datetime, value].
fn parse_table(text: &str) -> Vec<CandidateRecord> {
    let mut out = Vec::new();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(_) => continue,
        };

        let tag = match record.get(0).map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => continue,
        };

        let timestamp = match record
            .get(1)
            .and_then(|s| NaiveDateTime::parse_from_str(s.trim(), TEXT_DATE_FORMAT).ok())
        {
            Some(ts) => ts,
            None => {
                debug!("skipping row with unparsable datetime: {:?}", record.get(1));
                continue;
            }
        };

        let value = match record.get(2).and_then(|s| parse_locale_number(s)) {
            Some(v) => v,
            None => {
                debug!("skipping row with non-numeric value: {:?}", record.get(2));
                continue;
            }
        };

        // The text export carries no quality flag.
        out.push(CandidateRecord::new(tag, timestamp, value, Quality::Unknown));
    }
    out
}

/// Parse a JSON payload via an ordered list of shape matchers, each
/// producing the same record sequence:
/// flat array, `{data:[...]}`, `{Items:[...]}` (PI style),
/// `{series:[{name,data}]}`, and finally `{<tagName>:[...]}`.
fn parse_json(value: &Value) -> Vec<CandidateRecord> {
    if let Value::Array(items) = value {
        return parse_items(items, None);
    }

    let obj = match value.as_object() {
        Some(o) => o,
        None => return Vec::new(),
    };

    if let Some(Value::Array(items)) = obj.get("data") {
        return parse_items(items, None);
    }

    if let Some(Value::Array(items)) = obj.get("Items") {
        return parse_items(items, None);
    }

    if let Some(Value::Array(series)) = obj.get("series") {
        let mut out = Vec::new();
        for entry in series {
            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string);
            if let Some(Value::Array(items)) = entry.get("data") {
                out.extend(parse_items(items, name.as_deref()));
            }
        }
        return out;
    }

    // Last shape: each key mapping to an array of items is a tag name.
    let mut out = Vec::new();
    for (key, entry) in obj {
        if let Value::Array(items) = entry {
            out.extend(parse_items(items, Some(key.as_str())));
        }
    }
    out
}

/// Parse a sequence of JSON items, inheriting `default_tag` for items
/// that carry no tag of their own.
fn parse_items(items: &[Value], default_tag: Option<&str>) -> Vec<CandidateRecord> {
    let mut out = Vec::new();
    for item in items {
        match parse_item(item, default_tag) {
            Some(record) => out.push(record),
            None => debug!("skipping malformed item: {}", item),
        }
    }
    out
}

/// Parse one JSON item into a record, or None if it fails structurally.
///
/// Objects may spell their fields several ways (`tag`/`Tag`/`name`/
/// `label`, `timestamp`/`Timestamp`/`time`/`datetime`, `value`/`Value`
/// with the PI style nesting the number under `Value.Value`). Two-element
/// arrays are chart points: [timestamp, value].
fn parse_item(item: &Value, default_tag: Option<&str>) -> Option<CandidateRecord> {
    if let Value::Array(pair) = item {
        if pair.len() != 2 {
            return None;
        }
        let tag = default_tag?.to_string();
        let timestamp = parse_timestamp(&pair[0])?;
        let value = parse_number(&pair[1])?;
        return Some(CandidateRecord::new(tag, timestamp, value, Quality::Unknown));
    }

    let obj = item.as_object()?;

    let tag = ["tag", "Tag", "name", "Name", "label", "Label"]
        .iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::to_string)
        .or_else(|| default_tag.map(str::to_string))?;

    let timestamp = ["timestamp", "Timestamp", "time", "Time", "datetime", "date"]
        .iter()
        .find_map(|k| obj.get(*k))
        .and_then(parse_timestamp)?;

    let raw_value = obj.get("value").or_else(|| obj.get("Value"))?;
    // PI style nests the reading: {"Value": {"Value": 66500000, ...}}
    let value = match raw_value {
        Value::Object(inner) => inner.get("Value").and_then(parse_number)?,
        other => parse_number(other)?,
    };

    let quality = ["good", "Good", "quality", "Quality"]
        .iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_bool))
        .map(|good| if good { Quality::Good } else { Quality::Bad })
        .unwrap_or(Quality::Unknown);

    Some(CandidateRecord::new(tag, timestamp, value, quality))
}

fn parse_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_locale_number(s),
        _ => None,
    }
}

/// Parse a JSON timestamp: RFC 3339 (offset dropped, wall clock kept),
/// one of the plain formats, or epoch milliseconds.
fn parse_timestamp(v: &Value) -> Option<NaiveDateTime> {
    match v {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    JSON_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

/// Parse a number in the dashboard's locale: dot as thousands separator,
/// comma as decimal separator ("66.500.000" is 66500000, "1.234,5" is
/// 1234.5). A lone dot followed by exactly three digits is read as a
/// thousands separator, not a decimal point.
pub(crate) fn parse_locale_number(s: &str) -> Option<f64> {
    let trimmed = s.trim().replace('\u{a0}', "");
    if trimmed.is_empty() {
        return None;
    }
    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        match trimmed.matches('.').count() {
            0 => trimmed,
            1 => {
                let frac = trimmed.rsplit('.').next().unwrap_or("");
                if frac.len() == 3 && frac.chars().all(|c| c.is_ascii_digit()) {
                    trimmed.replace('.', "")
                } else {
                    trimmed
                }
            }
            _ => trimmed.replace('.', ""),
        }
    };
    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SeriesKind;
    use chrono::NaiveDate;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    const TABLE: &str = "\
label,datetime,value
Empacotamento,\"06/12/2025, 14:00:00\",66500000
Empacotamento,\"06/12/2025, 15:00:00\",67800000
Previsão Empacotamento,\"06/12/2025, 15:00:00\",70100000
";

    #[test]
    fn test_parse_text_table() {
        let records = parse(&Payload::detect(TABLE));
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].timestamp, ts(6, 14));
        assert_eq!(records[0].value, 66_500_000.0);
        assert_eq!(records[0].series, SeriesKind::Actual);
        assert_eq!(records[2].series, SeriesKind::Forecast);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let table = "\
label,datetime,value
Empacotamento,\"06/12/2025, 14:00:00\",66500000
Empacotamento,not-a-date,66000000
Empacotamento,\"06/12/2025, 15:00:00\",not-a-number
,\"06/12/2025, 16:00:00\",66000000
";
        let records = parse(&Payload::detect(table));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hour, 14);
    }

    #[test]
    fn test_thousands_separator() {
        let table = "\
label,datetime,value
Empacotamento,\"06/12/2025, 14:00:00\",\"66.500.000\"
";
        let records = parse(&Payload::detect(table));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, 66_500_000.0);
    }

    #[test]
    fn test_locale_number_forms() {
        assert_eq!(parse_locale_number("66500000"), Some(66_500_000.0));
        assert_eq!(parse_locale_number("66.500.000"), Some(66_500_000.0));
        assert_eq!(parse_locale_number("66.500"), Some(66_500.0));
        assert_eq!(parse_locale_number("1.234,5"), Some(1_234.5));
        assert_eq!(parse_locale_number("0.5"), Some(0.5));
        assert_eq!(parse_locale_number("---"), None);
        assert_eq!(parse_locale_number(""), None);
    }

    #[test]
    fn test_json_flat_array() {
        let raw = r#"[
            {"tag": "EMPACOTAMENTO-TAG-1", "timestamp": "2025-12-06T14:00:00", "value": 66500000},
            {"tag": "PREVISAO-EMPACOTAMENTO", "timestamp": "2025-12-06T14:00:00", "value": 70100000}
        ]"#;
        let records = parse(&Payload::detect(raw));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].series, SeriesKind::Actual);
        assert_eq!(records[0].timestamp, ts(6, 14));
        assert_eq!(records[1].series, SeriesKind::Forecast);
    }

    #[test]
    fn test_json_data_wrapper() {
        let raw = r#"{"data": [
            {"tag": "Empacotamento", "timestamp": "2025-12-06 14:00:00", "value": 66500000}
        ]}"#;
        let records = parse(&Payload::detect(raw));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, 66_500_000.0);
    }

    #[test]
    fn test_json_tag_keyed_object() {
        let raw = r#"{"Empacotamento": [
            {"timestamp": "2025-12-06T14:00:00", "value": 66500000}
        ]}"#;
        let records = parse(&Payload::detect(raw));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tag, "Empacotamento");
        assert_eq!(records[0].series, SeriesKind::Actual);
    }

    #[test]
    fn test_json_series_with_chart_points() {
        // 2025-12-06T14:00:00Z = 1765029600000 ms
        let raw = r#"{"series": [
            {"name": "Empacotamento", "data": [[1765029600000, 66500000]]},
            {"name": "Estimativa", "data": [[1765029600000, 70100000]]}
        ]}"#;
        let records = parse(&Payload::detect(raw));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tag, "Empacotamento");
        assert_eq!(records[0].timestamp, ts(6, 14));
        assert_eq!(records[1].series, SeriesKind::Forecast);
    }

    #[test]
    fn test_json_pi_items() {
        let raw = r#"{"Items": [
            {"Tag": "EMPACOTAMENTO-TAG-1", "Timestamp": "2025-12-06T14:00:00",
             "Value": {"Value": 66500000}, "Good": true},
            {"Tag": "EMPACOTAMENTO-TAG-1", "Timestamp": "2025-12-06T15:00:00",
             "Value": {"Value": 67800000}, "Good": false}
        ]}"#;
        let records = parse(&Payload::detect(raw));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].quality, Quality::Good);
        assert_eq!(records[0].value, 66_500_000.0);
        assert_eq!(records[1].quality, Quality::Bad);
    }

    #[test]
    fn test_json_malformed_items_are_skipped() {
        let raw = r#"{"data": [
            {"tag": "Empacotamento", "timestamp": "2025-12-06T14:00:00", "value": 66500000},
            {"tag": "Empacotamento", "timestamp": "garbage", "value": 1},
            {"tag": "Empacotamento", "value": 2},
            "not an object"
        ]}"#;
        let records = parse(&Payload::detect(raw));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_rfc3339_keeps_wall_clock() {
        let raw = r#"[{"tag": "Empacotamento", "timestamp": "2025-12-06T14:00:00-03:00", "value": 1}]"#;
        let records = parse(&Payload::detect(raw));
        assert_eq!(records[0].hour, 14);
    }
}

use crate::record::SeriesKind;

/// Labels containing any of these mark the forecast series. Checked
/// before the actual-series rule so "PREVISAO-EMPACOTAMENTO" classifies
/// as Forecast.
const FORECAST_MARKERS: [&str; 2] = ["previsao", "estimativa"];

/// Label substring that marks the measured series.
const ACTUAL_MARKER: &str = "empacotamento";

/// Classify a tag or label into its series.
///
/// Matching is on label semantics only. The two series overlap in
/// numeric range, so value magnitude is never consulted; anything that
/// matches neither rule is `Unknown` and is excluded from selection.
pub fn classify(tag: &str) -> SeriesKind {
    let folded = fold(tag);
    if FORECAST_MARKERS.iter().any(|m| folded.contains(m)) {
        return SeriesKind::Forecast;
    }
    if folded.contains(ACTUAL_MARKER) {
        return SeriesKind::Actual;
    }
    SeriesKind::Unknown
}

/// Lowercase and strip Portuguese diacritics, so "Previsão" and
/// "PREVISAO" match the same rule.
fn fold(tag: &str) -> String {
    tag.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

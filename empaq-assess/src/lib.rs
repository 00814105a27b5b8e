//! Threshold banding for extracted Empacotamento readings.
//!
//! The monitor classifies each hourly value against a fixed four-band
//! threshold set. Bands are checked outermost first, so the critical
//! bounds always win when a value lands past both a critical and an
//! alert bound on the same side.

use serde::{Deserialize, Serialize};

/// Fixed alert thresholds for the hourly reading.
///
/// The banding relies on `critico_put > alerta_put > alerta_call >
/// critico_call` but does not enforce it; an inverted set simply yields
/// whichever band matches first in the cascade.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct ThresholdSet {
    pub critico_put: f64,
    pub alerta_put: f64,
    pub alerta_call: f64,
    pub critico_call: f64,
}

/// Severity of an assessment, for the caller to route notifications.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Neutral,
}

/// Which band the value landed in.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Status {
    CriticoPut,
    AlertaPut,
    Neutral,
    AlertaCall,
    CriticoCall,
}

/// Derived classification of one reading. Never persisted.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Assessment {
    pub status: Status,
    pub severity: Severity,
    pub message: String,
    pub value: f64,
}

/// Classify a value against the threshold set.
///
/// Upper bounds are inclusive upward (`value >= critico_put` is
/// critical), lower bounds inclusive downward.
pub fn assess(value: f64, thresholds: &ThresholdSet) -> Assessment {
    if value >= thresholds.critico_put {
        Assessment {
            status: Status::CriticoPut,
            severity: Severity::Critical,
            message: format!(
                "CRITICO put: {value} at or above {}",
                thresholds.critico_put
            ),
            value,
        }
    } else if value >= thresholds.alerta_put {
        Assessment {
            status: Status::AlertaPut,
            severity: Severity::Warning,
            message: format!("alerta put: {value} at or above {}", thresholds.alerta_put),
            value,
        }
    } else if value <= thresholds.critico_call {
        Assessment {
            status: Status::CriticoCall,
            severity: Severity::Critical,
            message: format!(
                "CRITICO call: {value} at or below {}",
                thresholds.critico_call
            ),
            value,
        }
    } else if value <= thresholds.alerta_call {
        Assessment {
            status: Status::AlertaCall,
            severity: Severity::Warning,
            message: format!(
                "alerta call: {value} at or below {}",
                thresholds.alerta_call
            ),
            value,
        }
    } else {
        Assessment {
            status: Status::Neutral,
            severity: Severity::Neutral,
            message: format!("{value} within neutral band"),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> ThresholdSet {
        ThresholdSet {
            critico_put: 80_000_000.0,
            alerta_put: 75_000_000.0,
            alerta_call: 60_000_000.0,
            critico_call: 55_000_000.0,
        }
    }

    #[test]
    fn test_neutral_band() {
        let a = assess(66_500_000.0, &thresholds());
        assert_eq!(a.status, Status::Neutral);
        assert_eq!(a.severity, Severity::Neutral);
    }

    #[test]
    fn test_put_side_bands() {
        let a = assess(76_000_000.0, &thresholds());
        assert_eq!(a.status, Status::AlertaPut);
        assert_eq!(a.severity, Severity::Warning);

        let a = assess(81_000_000.0, &thresholds());
        assert_eq!(a.status, Status::CriticoPut);
        assert_eq!(a.severity, Severity::Critical);
    }

    #[test]
    fn test_call_side_bands() {
        let a = assess(58_000_000.0, &thresholds());
        assert_eq!(a.status, Status::AlertaCall);
        assert_eq!(a.severity, Severity::Warning);

        let a = assess(54_000_000.0, &thresholds());
        assert_eq!(a.status, Status::CriticoCall);
        assert_eq!(a.severity, Severity::Critical);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(assess(80_000_000.0, &thresholds()).status, Status::CriticoPut);
        assert_eq!(assess(75_000_000.0, &thresholds()).status, Status::AlertaPut);
        assert_eq!(assess(60_000_000.0, &thresholds()).status, Status::AlertaCall);
        assert_eq!(assess(55_000_000.0, &thresholds()).status, Status::CriticoCall);
    }
}

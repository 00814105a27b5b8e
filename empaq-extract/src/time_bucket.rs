use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

/// The most recent hour-aligned bucket that has fully elapsed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CompleteHour {
    pub date: NaiveDate,
    pub hour: u32,
}

/// Compute the last complete hour relative to `now`.
///
/// At minute 0 the current hour is itself complete (a reading stamped
/// 15:00 covers the hour ending at 15:00). Otherwise the previous hour
/// is the last complete one. Between 00:01 and 00:59 the result wraps
/// to hour 23 of the previous day.
pub fn last_complete_hour(now: NaiveDateTime) -> CompleteHour {
    if now.minute() == 0 {
        return CompleteHour {
            date: now.date(),
            hour: now.hour(),
        };
    }
    if now.hour() == 0 {
        return CompleteHour {
            date: now.date() - Duration::days(1),
            hour: 23,
        };
    }
    CompleteHour {
        date: now.date(),
        hour: now.hour() - 1,
    }
}

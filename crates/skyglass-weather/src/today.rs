use chrono::{Datelike, NaiveDate};

/// Whether a forecast `date` is the current day, judged by weekday and
/// day-of-month against `now`.
pub fn is_current_day(date: NaiveDate, now: &impl Datelike) -> bool {
    date.weekday() == now.weekday() && date.day() == now.day()
}

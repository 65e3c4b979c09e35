use serde::Serialize;

use smdatetime::{CalendarDate, ClockTime, DateTime, Duration, Weekday};

/// A duration together with its rendering.
#[derive(Debug, Clone, Serialize)]
pub struct DurationReport {
    pub duration: Duration,
    pub total_seconds: i64,
    pub text: String,
}

impl DurationReport {
    pub fn new(duration: Duration, text: String) -> Self {
        Self {
            duration,
            total_seconds: duration.total_seconds(),
            text,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeReport {
    pub time: ClockTime,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateReport {
    pub date: CalendarDate,
    pub weekday: Weekday,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateInfo {
    pub date: CalendarDate,
    pub iso: String,
    pub weekday: Weekday,
    pub id: i64,
    pub timestamp: i64,
    pub relative: Option<&'static str>,
    pub this_month: bool,
    pub this_year: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateTimeReport {
    pub datetime: DateTime,
    pub weekday: Weekday,
    pub timestamp: i64,
    pub text: String,
}

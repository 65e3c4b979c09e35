//! A calendar date paired with a clock time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use time::{format_description, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::calendar;
use crate::clock::ClockTime;
use crate::date::{CalendarDate, RelativeLabels, Weekday};
use crate::duration::Duration;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "DateTimeRecord")]
pub struct DateTime {
    #[serde(flatten)]
    date: CalendarDate,
    #[serde(flatten)]
    time: ClockTime,
}

#[derive(Deserialize)]
struct DateTimeRecord {
    year: i64,
    #[serde(default)]
    month: i64,
    #[serde(default)]
    day: i64,
    #[serde(default)]
    hours: i64,
    #[serde(default)]
    minutes: i64,
    #[serde(default)]
    seconds: i64,
}

impl From<DateTimeRecord> for DateTime {
    fn from(r: DateTimeRecord) -> Self {
        DateTime::new(r.year, r.month, r.day, r.hours, r.minutes, r.seconds)
    }
}

impl DateTime {
    /// Every field is clamped independently; `month` is zero-based.
    pub fn new(year: i64, month: i64, day: i64, hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            date: CalendarDate::new(year, month, day),
            time: ClockTime::new(hours, minutes, seconds),
        }
    }

    /// Combine the parts, folding an overlong day into a real month.
    pub fn from_parts(date: CalendarDate, time: ClockTime) -> Self {
        Self {
            date: date.normalized(),
            time,
        }
    }

    /// Local date and time of `timestamp` read at `offset`.
    pub fn from_timestamp(timestamp: i64, offset: UtcOffset) -> Self {
        let (days, seconds_of_day) = calendar::from_seconds(timestamp, offset);
        Self {
            date: CalendarDate::from_days(days),
            time: ClockTime::from_total_seconds(seconds_of_day),
        }
    }

    pub fn now(now: OffsetDateTime) -> Self {
        Self {
            date: CalendarDate::today(now),
            time: ClockTime::now(now),
        }
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn time(&self) -> ClockTime {
        self.time
    }

    pub fn year(&self) -> i64 {
        self.date.year()
    }

    pub fn month(&self) -> u8 {
        self.date.month()
    }

    pub fn day(&self) -> u8 {
        self.date.day()
    }

    pub fn hours(&self) -> u8 {
        self.time.hours()
    }

    pub fn minutes(&self) -> u8 {
        self.time.minutes()
    }

    pub fn seconds(&self) -> u8 {
        self.time.seconds()
    }

    pub fn with_date(self, date: CalendarDate) -> Self {
        Self { date, ..self }
    }

    pub fn with_time(self, time: ClockTime) -> Self {
        Self { time, ..self }
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn timestamp(&self, offset: UtcOffset) -> i64 {
        calendar::to_seconds(
            self.date.days_since_epoch(),
            self.time.total_seconds(),
            offset,
        )
    }

    pub fn is_yesterday(&self, now: OffsetDateTime) -> bool {
        self.date.is_yesterday(now)
    }

    pub fn is_today(&self, now: OffsetDateTime) -> bool {
        self.date.is_today(now)
    }

    pub fn is_tomorrow(&self, now: OffsetDateTime) -> bool {
        self.date.is_tomorrow(now)
    }

    pub fn to_primitive(&self) -> Result<PrimitiveDateTime> {
        Ok(PrimitiveDateTime::new(
            self.date.to_time_date()?,
            self.time.to_time(),
        ))
    }

    pub fn format(&self, pattern: &str) -> Result<String> {
        let items = format_description::parse_borrowed::<2>(pattern)?;
        Ok(self.to_primitive()?.format(&items)?)
    }

    /// Relative day name when enabled in `labels`, else the formatted value.
    pub fn describe(
        &self,
        pattern: &str,
        labels: RelativeLabels,
        now: OffsetDateTime,
    ) -> Result<String> {
        match self.date.relative_label(labels, now) {
            Some(label) => Ok(label.to_string()),
            None => self.format(pattern),
        }
    }

    /// Parse with a `time` format description. Returns `None` on mismatch.
    pub fn parse(s: &str, pattern: &str) -> Option<DateTime> {
        let items = format_description::parse_borrowed::<2>(pattern).ok()?;
        let parsed = PrimitiveDateTime::parse(s.trim(), &items).ok()?;
        Some(Self {
            date: CalendarDate::from_time_date(parsed.date()),
            time: ClockTime::from_time(parsed.time()),
        })
    }

    fn shifted(&self, seconds: i64) -> Self {
        let timestamp = self.timestamp(UtcOffset::UTC).saturating_add(seconds);
        Self::from_timestamp(timestamp, UtcOffset::UTC)
    }
}

impl FromStr for DateTime {
    type Err = Error;

    /// Accepts `YYYY-MM-DD HH:MM[:SS]` with a space or `T` separator.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().replacen('T', " ", 1);
        Self::parse(&s, "[year]-[month]-[day] [hour]:[minute]:[second]")
            .or_else(|| Self::parse(&s, "[year]-[month]-[day] [hour]:[minute]"))
            .ok_or_else(|| Error::InvalidFormat(s.clone()))
    }
}

/// Elapsed time between two date-times, as a magnitude.
impl Sub for DateTime {
    type Output = Duration;

    fn sub(self, rhs: DateTime) -> Duration {
        let (a, b) = (self.timestamp(UtcOffset::UTC), rhs.timestamp(UtcOffset::UTC));
        Duration::from_total_seconds(a.saturating_sub(b))
    }
}

impl Add<Duration> for DateTime {
    type Output = DateTime;

    fn add(self, rhs: Duration) -> DateTime {
        self.shifted(rhs.total_seconds())
    }
}

impl Sub<Duration> for DateTime {
    type Output = DateTime;

    fn sub(self, rhs: Duration) -> DateTime {
        self.shifted(rhs.total_seconds().saturating_neg())
    }
}

impl Add<i64> for DateTime {
    type Output = DateTime;

    fn add(self, seconds: i64) -> DateTime {
        self.shifted(seconds)
    }
}

impl Sub<i64> for DateTime {
    type Output = DateTime;

    fn sub(self, seconds: i64) -> DateTime {
        self.shifted(seconds.saturating_neg())
    }
}

impl AddAssign<Duration> for DateTime {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl SubAssign<Duration> for DateTime {
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

impl AddAssign<i64> for DateTime {
    fn add_assign(&mut self, seconds: i64) {
        *self = *self + seconds;
    }
}

impl SubAssign<i64> for DateTime {
    fn sub_assign(&mut self, seconds: i64) {
        *self = *self - seconds;
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_new_clamps_like_parts() {
        let dt = DateTime::new(2024, 12, 0, 24, 60, -1);
        assert_eq!(dt.date(), CalendarDate::new(2024, 11, 1));
        assert_eq!(dt.time(), ClockTime::new(23, 59, 0));
    }

    #[test]
    fn test_from_parts_normalizes_date() {
        let dt = DateTime::from_parts(CalendarDate::new(2023, 1, 30), ClockTime::new(8, 0, 0));
        assert_eq!(dt.date(), CalendarDate::new(2023, 2, 2));
    }

    #[test]
    fn test_timestamp_roundtrip() {
        let offset = UtcOffset::from_hms(-5, 0, 0).unwrap();
        let dt = DateTime::new(2024, 1, 29, 18, 45, 10);
        let ts = dt.timestamp(offset);
        assert_eq!(DateTime::from_timestamp(ts, offset), dt);
        assert_eq!(ts, dt.timestamp(UtcOffset::UTC) + 5 * 3_600);
    }

    #[test]
    fn test_from_timestamp_known_instant() {
        // 2024-01-01 11:50:45 UTC = 1704109845
        let dt = DateTime::from_timestamp(1_704_109_845, UtcOffset::UTC);
        assert_eq!(dt.to_string(), "2024-01-01 11:50:45");
        assert_eq!(dt.weekday(), Weekday::Monday);
    }

    #[test]
    fn test_now_uses_injected_instant() {
        let now = datetime!(2024-06-15 09:10:11 +03:00);
        let dt = DateTime::now(now);
        assert_eq!(dt, DateTime::new(2024, 5, 15, 9, 10, 11));
        assert!(dt.is_today(now));
        assert!(!dt.is_tomorrow(now));
    }

    #[test]
    fn test_difference_is_duration() {
        let a = DateTime::new(2024, 0, 1, 0, 0, 0);
        let b = DateTime::new(2024, 0, 2, 1, 2, 3);
        assert_eq!(b - a, Duration::new(1, 1, 2, 3));
        assert_eq!(a - b, Duration::new(1, 1, 2, 3));
    }

    #[test]
    fn test_add_and_sub_duration() {
        let dt = DateTime::new(2023, 11, 31, 23, 30, 0);
        assert_eq!(dt + Duration::new(0, 1, 0, 0), DateTime::new(2024, 0, 1, 0, 30, 0));
        assert_eq!(dt - Duration::new(31, 0, 0, 0), DateTime::new(2023, 10, 30, 23, 30, 0));
    }

    #[test]
    fn test_add_and_sub_seconds() {
        let mut dt = DateTime::new(2024, 1, 28, 23, 59, 59);
        dt += 1;
        assert_eq!(dt, DateTime::new(2024, 1, 29, 0, 0, 0));
        dt -= 86_400;
        assert_eq!(dt, DateTime::new(2024, 1, 28, 0, 0, 0));
        dt += Duration::new(1, 0, 0, 0);
        dt -= Duration::new(0, 12, 0, 0);
        assert_eq!(dt, DateTime::new(2024, 1, 28, 12, 0, 0));
    }

    #[test]
    fn test_ordering_date_then_time() {
        let early = DateTime::new(2024, 0, 1, 23, 0, 0);
        let late = DateTime::new(2024, 0, 2, 1, 0, 0);
        assert!(early < late);
        assert!(DateTime::new(2024, 0, 2, 0, 0, 1) > DateTime::new(2024, 0, 2, 0, 0, 0));
    }

    #[test]
    fn test_format_and_parse() {
        let dt = DateTime::new(2024, 2, 5, 14, 7, 0);
        let pattern = "[day]/[month]/[year] [hour]:[minute]";
        assert_eq!(dt.format(pattern).unwrap(), "05/03/2024 14:07");
        assert_eq!(DateTime::parse("05/03/2024 14:07", pattern), Some(dt));
        assert_eq!(DateTime::parse("yesterday", pattern), None);
    }

    #[test]
    fn test_describe_labels() {
        let now = datetime!(2024-03-05 12:00:00 UTC);
        let dt = DateTime::new(2024, 2, 4, 18, 0, 0);
        assert_eq!(
            dt.describe("[year]-[month]-[day]", RelativeLabels::ALL, now).unwrap(),
            "Yesterday"
        );
        assert_eq!(
            dt.describe("[hour]:[minute]", RelativeLabels::NONE, now).unwrap(),
            "18:00"
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "2024-03-05T14:07:30".parse::<DateTime>().unwrap(),
            DateTime::new(2024, 2, 5, 14, 7, 30)
        );
        assert_eq!(
            "2024-03-05 14:07".parse::<DateTime>().unwrap(),
            DateTime::new(2024, 2, 5, 14, 7, 0)
        );
        assert!("2024-03-05".parse::<DateTime>().is_err());
    }

    #[test]
    fn test_serde_flat_record() {
        let dt = DateTime::new(2024, 2, 5, 14, 7, 30);
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(
            json,
            r#"{"year":2024,"month":2,"day":5,"hours":14,"minutes":7,"seconds":30}"#
        );
        let back: DateTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dt);
    }
}

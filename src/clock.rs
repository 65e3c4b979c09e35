//! Wall-clock time of day.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use time::format_description;
use time::OffsetDateTime;

use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::unit::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// 24-hour or 12-hour (am/pm) rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockType {
    #[default]
    #[serde(rename = "24")]
    Hours24,
    #[serde(rename = "12")]
    Hours12,
}

impl FromStr for ClockType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "24" | "24h" => Ok(ClockType::Hours24),
            "12" | "12h" | "ampm" => Ok(ClockType::Hours12),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

/// Time of day with `hours` in 0..=23 and `minutes`/`seconds` in 0..=59.
///
/// Unlike [`Duration`] there is no day field: building from a second count
/// wraps around midnight instead of carrying.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "ClockRecord")]
pub struct ClockTime {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct ClockRecord {
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl From<ClockRecord> for ClockTime {
    fn from(r: ClockRecord) -> Self {
        ClockTime::new(r.hours, r.minutes, r.seconds)
    }
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Each field is clamped into its own range; nothing carries.
    pub fn new(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            hours: hours.clamp(0, 23) as u8,
            minutes: minutes.clamp(0, 59) as u8,
            seconds: seconds.clamp(0, 59) as u8,
        }
    }

    /// Wraps `total_seconds` into a single day, so `-1` is 23:59:59.
    pub fn from_total_seconds(total_seconds: i64) -> Self {
        let secs = total_seconds.rem_euclid(SECONDS_PER_DAY);
        Self {
            hours: (secs / SECONDS_PER_HOUR) as u8,
            minutes: (secs % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u8,
            seconds: (secs % SECONDS_PER_MINUTE) as u8,
        }
    }

    /// Clock reading of an instant, in the instant's own offset.
    pub fn now(now: OffsetDateTime) -> Self {
        Self {
            hours: now.hour(),
            minutes: now.minute(),
            seconds: now.second(),
        }
    }

    /// Clock reading `hours`, `minutes` and `seconds` after `now`.
    pub fn from_now(now: OffsetDateTime, hours: i64, minutes: i64, seconds: i64) -> Self {
        let offset = hours
            .saturating_mul(SECONDS_PER_HOUR)
            .saturating_add(minutes.saturating_mul(SECONDS_PER_MINUTE))
            .saturating_add(seconds);
        Self::from_total_seconds(Self::now(now).total_seconds().saturating_add(offset))
    }

    pub fn from_datetime(datetime: &DateTime) -> Self {
        datetime.time()
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn with_hours(self, hours: i64) -> Self {
        Self::new(hours, self.minutes.into(), self.seconds.into())
    }

    pub fn with_minutes(self, minutes: i64) -> Self {
        Self::new(self.hours.into(), minutes, self.seconds.into())
    }

    pub fn with_seconds(self, seconds: i64) -> Self {
        Self::new(self.hours.into(), self.minutes.into(), seconds)
    }

    /// Seconds since midnight, in `0..86400`.
    pub fn total_seconds(&self) -> i64 {
        i64::from(self.hours) * SECONDS_PER_HOUR
            + i64::from(self.minutes) * SECONDS_PER_MINUTE
            + i64::from(self.seconds)
    }

    /// Zero-padded `HH:MM[:SS]`, with ` am`/` pm` in 12-hour mode.
    ///
    /// The 12-hour reading subtracts twelve from afternoon hours, so half past
    /// noon is `00:30 pm`.
    pub fn format(&self, clock: ClockType, include_seconds: bool) -> String {
        let (hours, suffix) = match clock {
            ClockType::Hours24 => (self.hours, ""),
            ClockType::Hours12 if self.hours >= 12 => (self.hours - 12, " pm"),
            ClockType::Hours12 => (self.hours, " am"),
        };
        let mut out = format!("{:02}:{:02}", hours, self.minutes);
        if include_seconds {
            out.push_str(&format!(":{:02}", self.seconds));
        }
        out.push_str(suffix);
        out
    }

    /// Render with a `time` format description such as `[hour]:[minute]`.
    pub fn format_with(&self, pattern: &str) -> Result<String> {
        let items = format_description::parse_borrowed::<2>(pattern)?;
        Ok(self.to_time().format(&items)?)
    }

    /// Parse with a `time` format description. Returns `None` on mismatch.
    pub fn parse(s: &str, pattern: &str) -> Option<ClockTime> {
        let items = format_description::parse_borrowed::<2>(pattern).ok()?;
        let parsed = time::Time::parse(s.trim(), &items).ok()?;
        Some(Self::from_time(parsed))
    }

    pub fn to_time(&self) -> time::Time {
        // fields are always within range
        time::Time::from_hms(self.hours, self.minutes, self.seconds).unwrap_or(time::Time::MIDNIGHT)
    }

    pub fn from_time(t: time::Time) -> Self {
        Self {
            hours: t.hour(),
            minutes: t.minute(),
            seconds: t.second(),
        }
    }
}

impl FromStr for ClockTime {
    type Err = Error;

    /// Accepts `HH:MM` or `HH:MM:SS` in 24-hour form.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s, "[hour]:[minute]:[second]")
            .or_else(|| Self::parse(s, "[hour]:[minute]"))
            .ok_or_else(|| Error::InvalidFormat(s.to_string()))
    }
}

impl Add<Duration> for ClockTime {
    type Output = ClockTime;

    fn add(self, rhs: Duration) -> ClockTime {
        // only the part below one day moves the clock
        let shift = rhs.total_seconds().rem_euclid(SECONDS_PER_DAY);
        ClockTime::from_total_seconds(self.total_seconds() + shift)
    }
}

impl Add<ClockTime> for Duration {
    type Output = ClockTime;

    fn add(self, rhs: ClockTime) -> ClockTime {
        rhs + self
    }
}

impl Sub<Duration> for ClockTime {
    type Output = ClockTime;

    fn sub(self, rhs: Duration) -> ClockTime {
        let shift = rhs.total_seconds().rem_euclid(SECONDS_PER_DAY);
        ClockTime::from_total_seconds(self.total_seconds() - shift)
    }
}

impl AddAssign<Duration> for ClockTime {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl SubAssign<Duration> for ClockTime {
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

/// Always zero-padded 24-hour `HH:MM:SS`, so 9:05:03 prints as `09:05:03`.
/// The output parses back through [`FromStr`].
impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(ClockType::Hours24, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_new_clamps_each_field() {
        let t = ClockTime::new(25, -3, 75);
        assert_eq!((t.hours(), t.minutes(), t.seconds()), (23, 0, 59));
    }

    #[test]
    fn test_from_total_seconds_wraps() {
        assert_eq!(ClockTime::from_total_seconds(90_061), ClockTime::new(1, 1, 1));
        assert_eq!(ClockTime::from_total_seconds(-1), ClockTime::new(23, 59, 59));
        assert_eq!(ClockTime::from_total_seconds(86_400), ClockTime::MIDNIGHT);
    }

    #[test]
    fn test_total_seconds() {
        assert_eq!(ClockTime::new(23, 59, 59).total_seconds(), 86_399);
    }

    #[test]
    fn test_now_and_from_now() {
        let now = datetime!(2024-03-10 22:30:00 +01:00);
        assert_eq!(ClockTime::now(now), ClockTime::new(22, 30, 0));
        assert_eq!(ClockTime::from_now(now, 2, 0, 15), ClockTime::new(0, 30, 15));
    }

    #[test]
    fn test_format_24_hour() {
        let t = ClockTime::new(7, 5, 9);
        assert_eq!(t.format(ClockType::Hours24, true), "07:05:09");
        assert_eq!(t.format(ClockType::Hours24, false), "07:05");
    }

    #[test]
    fn test_format_12_hour() {
        assert_eq!(
            ClockTime::new(14, 5, 0).format(ClockType::Hours12, false),
            "02:05 pm"
        );
        assert_eq!(
            ClockTime::new(9, 45, 30).format(ClockType::Hours12, true),
            "09:45:30 am"
        );
        assert_eq!(
            ClockTime::new(12, 30, 0).format(ClockType::Hours12, false),
            "00:30 pm"
        );
    }

    #[test]
    fn test_format_with_pattern() {
        let t = ClockTime::new(18, 4, 2);
        assert_eq!(t.format_with("[hour]h[minute]").unwrap(), "18h04");
        assert!(t.format_with("[bogus]").is_err());
    }

    #[test]
    fn test_parse_with_pattern() {
        assert_eq!(
            ClockTime::parse("08:15:42", "[hour]:[minute]:[second]"),
            Some(ClockTime::new(8, 15, 42))
        );
        assert_eq!(ClockTime::parse("8 o'clock", "[hour]:[minute]:[second]"), None);
        assert_eq!(ClockTime::parse("08:15", "[not a pattern"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("13:07".parse::<ClockTime>().unwrap(), ClockTime::new(13, 7, 0));
        assert_eq!("13:07:45".parse::<ClockTime>().unwrap(), ClockTime::new(13, 7, 45));
        assert!("25:00".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_add_duration_wraps_midnight() {
        let t = ClockTime::new(23, 0, 0);
        assert_eq!(t + Duration::new(0, 2, 30, 0), ClockTime::new(1, 30, 0));
        assert_eq!(Duration::new(3, 1, 0, 0) + t, ClockTime::new(0, 0, 0));
    }

    #[test]
    fn test_sub_duration_wraps_midnight() {
        let mut t = ClockTime::new(0, 15, 0);
        t -= Duration::new(0, 0, 30, 0);
        assert_eq!(t, ClockTime::new(23, 45, 0));
        t += Duration::new(0, 0, 15, 0);
        assert_eq!(t, ClockTime::MIDNIGHT);
    }

    #[test]
    fn test_ordering() {
        assert!(ClockTime::new(9, 59, 59) < ClockTime::new(10, 0, 0));
        assert!(ClockTime::new(10, 0, 1) > ClockTime::new(10, 0, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(ClockTime::new(6, 0, 5).to_string(), "06:00:05");
    }

    #[test]
    fn test_display_pads_every_field() {
        let t = ClockTime::new(9, 5, 3);
        assert_eq!(t.to_string(), "09:05:03");
        assert_eq!(t.to_string().parse::<ClockTime>().unwrap(), t);
        assert_eq!(ClockTime::new(23, 0, 0).to_string(), "23:00:00");
    }

    #[test]
    fn test_serde_record() {
        let json = serde_json::to_string(&ClockTime::new(1, 2, 3)).unwrap();
        assert_eq!(json, r#"{"hours":1,"minutes":2,"seconds":3}"#);
        let t: ClockTime = serde_json::from_str(r#"{"hours":99,"minutes":5}"#).unwrap();
        assert_eq!(t, ClockTime::new(23, 5, 0));
    }

    #[test]
    fn test_clock_type_from_str() {
        assert_eq!("12".parse::<ClockType>().unwrap(), ClockType::Hours12);
        assert_eq!("24h".parse::<ClockType>().unwrap(), ClockType::Hours24);
        assert!("13".parse::<ClockType>().is_err());
    }
}

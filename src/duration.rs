//! Normalized, unsigned elapsed-time values.
//!
//! A [`Duration`] always holds its span as `days`, `hours` (0..=23),
//! `minutes` (0..=59) and `seconds` (0..=59). Two constructors exist and they
//! deliberately disagree on out-of-range input:
//!
//! - [`Duration::new`] clamps every field into its own range and never carries,
//!   so `Duration::new(0, 30, 0, 0)` holds 23 hours, not one day and six hours.
//! - [`Duration::from_total_seconds`] carries a raw second count into the
//!   fields. Every arithmetic operation routes through it.
//!
//! Durations are magnitudes: the sign of any raw input is discarded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::clock::ClockTime;
use crate::error::{Error, Result};
use crate::format::{LabelType, StringFormat};
use crate::unit::{TimeUnit, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Largest day count a duration can hold while its total still fits in `i64`.
pub const MAX_DAYS: i64 = i64::MAX / SECONDS_PER_DAY - 1;

const MAX_TOTAL_SECONDS: i64 = MAX_DAYS * SECONDS_PER_DAY + SECONDS_PER_DAY - 1;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*([a-z]+)").unwrap());

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "DurationRecord")]
pub struct Duration {
    // Field order drives the derived lexicographic ordering. Because fields are
    // always normalized it agrees with ordering by total seconds.
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct DurationRecord {
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl From<DurationRecord> for Duration {
    fn from(r: DurationRecord) -> Self {
        Duration::new(r.days, r.hours, r.minutes, r.seconds)
    }
}

fn clamp_field(value: i64, unit: TimeUnit) -> i64 {
    value.clamp(0, unit.field_max())
}

impl Duration {
    pub const ZERO: Duration = Duration {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub const MAX: Duration = Duration {
        days: MAX_DAYS,
        hours: 23,
        minutes: 59,
        seconds: 59,
    };

    /// Build a duration from raw fields, clamping each one into its range.
    ///
    /// Out-of-range values are truncated to the boundary, not carried into
    /// the neighbouring field. Use [`Duration::from_total_seconds`] to carry.
    pub fn new(days: i64, hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            days: clamp_field(days, TimeUnit::Day),
            hours: clamp_field(hours, TimeUnit::Hour),
            minutes: clamp_field(minutes, TimeUnit::Minute),
            seconds: clamp_field(seconds, TimeUnit::Second),
        }
    }

    /// Build a normalized duration from a second count.
    ///
    /// The sign is discarded. Magnitudes beyond [`Duration::MAX`] saturate.
    pub fn from_total_seconds(total_seconds: i64) -> Self {
        let magnitude = total_seconds.unsigned_abs();
        let mut remaining = if magnitude > MAX_TOTAL_SECONDS as u64 {
            debug!(total_seconds, "duration saturated at maximum");
            MAX_TOTAL_SECONDS
        } else {
            magnitude as i64
        };

        let days = remaining.div_euclid(SECONDS_PER_DAY);
        remaining -= days * SECONDS_PER_DAY;
        let hours = remaining.div_euclid(SECONDS_PER_HOUR);
        remaining -= hours * SECONDS_PER_HOUR;
        let minutes = remaining.div_euclid(SECONDS_PER_MINUTE);
        let seconds = remaining - minutes * SECONDS_PER_MINUTE;

        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    pub fn from_total_days(total_days: f64) -> Self {
        Self::from_total_minutes(total_days * 1440.0)
    }

    pub fn from_total_hours(total_hours: f64) -> Self {
        Self::from_total_minutes(total_hours * 60.0)
    }

    /// Fractional seconds are floored before normalization.
    pub fn from_total_minutes(total_minutes: f64) -> Self {
        // `as` saturates on overflow and maps NaN to zero.
        Self::from_total_seconds((total_minutes * 60.0).floor() as i64)
    }

    /// Span between two clock times, as a magnitude.
    pub fn between(start: &ClockTime, finish: &ClockTime) -> Self {
        Self::from_total_seconds(finish.total_seconds() - start.total_seconds())
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    pub fn hours(&self) -> i64 {
        self.hours
    }

    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn with_days(self, days: i64) -> Self {
        Self::new(days, self.hours, self.minutes, self.seconds)
    }

    pub fn with_hours(self, hours: i64) -> Self {
        Self::new(self.days, hours, self.minutes, self.seconds)
    }

    pub fn with_minutes(self, minutes: i64) -> Self {
        Self::new(self.days, self.hours, minutes, self.seconds)
    }

    pub fn with_seconds(self, seconds: i64) -> Self {
        Self::new(self.days, self.hours, self.minutes, seconds)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }

    pub fn total_minutes(&self) -> f64 {
        self.total_seconds() as f64 / SECONDS_PER_MINUTE as f64
    }

    pub fn total_hours(&self) -> f64 {
        self.total_seconds() as f64 / SECONDS_PER_HOUR as f64
    }

    pub fn total_days(&self) -> f64 {
        self.total_seconds() as f64 / SECONDS_PER_DAY as f64
    }

    /// Value of the single field for `unit`.
    pub fn get(&self, unit: TimeUnit) -> i64 {
        match unit {
            TimeUnit::Day => self.days,
            TimeUnit::Hour => self.hours,
            TimeUnit::Minute => self.minutes,
            TimeUnit::Second => self.seconds,
        }
    }

    /// Whole span expressed in `unit`.
    pub fn total(&self, unit: TimeUnit) -> f64 {
        match unit {
            TimeUnit::Day => self.total_days(),
            TimeUnit::Hour => self.total_hours(),
            TimeUnit::Minute => self.total_minutes(),
            TimeUnit::Second => self.total_seconds() as f64,
        }
    }

    pub fn checked_add(self, rhs: Duration) -> Result<Duration> {
        self.total_seconds()
            .checked_add(rhs.total_seconds())
            .filter(|total| *total <= MAX_TOTAL_SECONDS)
            .map(Duration::from_total_seconds)
            .ok_or(Error::Overflow)
    }

    /// Magnitude of the difference. Never fails: both operands are non-negative.
    pub fn abs_diff(self, rhs: Duration) -> Duration {
        Duration::from_total_seconds(self.total_seconds() - rhs.total_seconds())
    }

    pub fn checked_mul(self, factor: i64) -> Result<Duration> {
        self.total_seconds()
            .checked_mul(factor)
            .filter(|total| total.unsigned_abs() <= MAX_TOTAL_SECONDS as u64)
            .map(Duration::from_total_seconds)
            .ok_or(Error::Overflow)
    }

    /// Divide, rounding the second count to nearest with ties away from zero.
    pub fn checked_div(self, factor: i64) -> Result<Duration> {
        if factor == 0 {
            debug!(duration = %self, "rejected division by zero");
            return Err(Error::DivisionByZero);
        }
        let numerator = self.total_seconds() as u128;
        let divisor = factor.unsigned_abs() as u128;
        let quotient = (2 * numerator + divisor) / (2 * divisor);
        // quotient <= numerator, so it fits back into i64
        Ok(Duration::from_total_seconds(quotient as i64))
    }

    /// Round half-up to the nearest whole `unit`, zeroing every finer field.
    ///
    /// Thresholds are 30 seconds for a minute, 30 minutes for an hour and
    /// 12 hours for a day. Carries cascade from the finest field upward.
    pub fn rounded(&self, unit: TimeUnit) -> Duration {
        let mut days = self.days;
        let mut hours = self.hours;
        let mut minutes = self.minutes;
        let mut seconds = self.seconds;

        if unit >= TimeUnit::Minute {
            minutes += i64::from(seconds >= 30);
            seconds = 0;
        }
        if unit >= TimeUnit::Hour {
            hours += i64::from(minutes >= 30);
            minutes = 0;
        }
        if unit >= TimeUnit::Day {
            days += i64::from(hours >= 12);
            hours = 0;
        }

        let total = days * SECONDS_PER_DAY
            + hours * SECONDS_PER_HOUR
            + minutes * SECONDS_PER_MINUTE
            + seconds;
        let rounded = Duration::from_total_seconds(total);
        trace!(from = %self, to = %rounded, %unit, "rounded duration");
        rounded
    }

    pub fn format(&self, format: &StringFormat) -> String {
        format.render(self)
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration::from_total_seconds(self.total_seconds().saturating_add(rhs.total_seconds()))
    }
}

/// Yields the magnitude of the difference, never a negative span.
impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        self.abs_diff(rhs)
    }
}

impl Mul<i64> for Duration {
    type Output = Duration;

    fn mul(self, factor: i64) -> Duration {
        Duration::from_total_seconds(self.total_seconds().saturating_mul(factor))
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

impl std::iter::Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration::ZERO, Add::add)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0s");
        }
        let format = StringFormat::Textual {
            label: LabelType::Single,
            include_zeros: false,
        };
        write!(f, "{}", self.format(&format))
    }
}

impl FromStr for Duration {
    type Err = Error;

    /// Accepts a bare second count (`3600`), colon fields (`HH:MM`,
    /// `HH:MM:SS`, `DD:HH:MM:SS`) or unit tokens (`1d 2h 30m`, `1.5h`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || Error::InvalidDuration(s.to_string());

        if s.is_empty() {
            return Err(invalid());
        }
        if let Ok(total) = s.parse::<i64>() {
            return Ok(Duration::from_total_seconds(total));
        }
        let total = if s.contains(':') {
            parse_colon_fields(s)
        } else {
            parse_unit_tokens(s)
        };
        total.map(Duration::from_total_seconds).ok_or_else(invalid)
    }
}

fn parse_colon_fields(s: &str) -> Option<i64> {
    let fields = s
        .split(':')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;

    let units: &[TimeUnit] = match fields.len() {
        2 => &[TimeUnit::Hour, TimeUnit::Minute],
        3 => &[TimeUnit::Hour, TimeUnit::Minute, TimeUnit::Second],
        4 => &TimeUnit::DESCENDING,
        _ => return None,
    };

    units.iter().zip(&fields).try_fold(0i64, |total, (unit, value)| {
        i64::from(*value)
            .checked_mul(unit.seconds())
            .and_then(|secs| total.checked_add(secs))
    })
}

fn parse_unit_tokens(s: &str) -> Option<i64> {
    let is_separator = |c: char| c.is_whitespace() || c == ',';
    let mut total = 0f64;
    let mut cursor = 0;

    for caps in TOKEN_RE.captures_iter(s) {
        let whole = caps.get(0)?;
        if !s[cursor..whole.start()].trim_matches(is_separator).is_empty() {
            return None;
        }
        let value: f64 = caps[1].parse().ok()?;
        let unit: TimeUnit = caps[2].parse().ok()?;
        total += value * unit.seconds() as f64;
        cursor = whole.end();
    }

    if cursor == 0 || !s[cursor..].trim_matches(is_separator).is_empty() {
        return None;
    }
    Some(total.floor() as i64)
}

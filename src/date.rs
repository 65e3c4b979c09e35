//! Civil calendar dates.
//!
//! A [`CalendarDate`] stores `month` as a zero-based index (0 = January)
//! clamped to 0..=11, and `day` clamped to 1..=31. The day is NOT checked
//! against the month's length: February 31st is a storable value and is read
//! as early March whenever the date is converted to a day count or timestamp.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, BitOr, Sub, SubAssign};
use std::str::FromStr;

use time::{format_description, OffsetDateTime, UtcOffset};

use crate::calendar::{self, Direction};
use crate::duration::Duration;
use crate::error::{Error, Result};

/// Years are clamped to this magnitude so day counts stay far from overflow.
pub const MAX_YEAR: i64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
    Friday = 6,
    Saturday = 7,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// 1 for Sunday through 7 for Saturday.
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Option<Weekday> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl FromStr for Weekday {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|w| {
                let name = w.as_str().to_lowercase();
                lower.len() >= 3 && name.starts_with(&lower)
            })
            .ok_or_else(|| Error::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which relative names [`CalendarDate::describe`] may substitute for a
/// formatted date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelativeLabels {
    pub yesterday: bool,
    pub today: bool,
    pub tomorrow: bool,
}

impl RelativeLabels {
    pub const NONE: RelativeLabels = RelativeLabels {
        yesterday: false,
        today: false,
        tomorrow: false,
    };
    pub const YESTERDAY: RelativeLabels = RelativeLabels {
        yesterday: true,
        ..Self::NONE
    };
    pub const TODAY: RelativeLabels = RelativeLabels {
        today: true,
        ..Self::NONE
    };
    pub const TOMORROW: RelativeLabels = RelativeLabels {
        tomorrow: true,
        ..Self::NONE
    };
    pub const ALL: RelativeLabels = RelativeLabels {
        yesterday: true,
        today: true,
        tomorrow: true,
    };
}

impl BitOr for RelativeLabels {
    type Output = RelativeLabels;

    fn bitor(self, rhs: RelativeLabels) -> RelativeLabels {
        RelativeLabels {
            yesterday: self.yesterday || rhs.yesterday,
            today: self.today || rhs.today,
            tomorrow: self.tomorrow || rhs.tomorrow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "DateRecord")]
pub struct CalendarDate {
    year: i64,
    month: u8,
    day: u8,
}

#[derive(Deserialize)]
struct DateRecord {
    year: i64,
    #[serde(default)]
    month: i64,
    #[serde(default)]
    day: i64,
}

impl From<DateRecord> for CalendarDate {
    fn from(r: DateRecord) -> Self {
        CalendarDate::new(r.year, r.month, r.day)
    }
}

impl CalendarDate {
    /// `month` is zero-based. Each field is clamped independently.
    pub fn new(year: i64, month: i64, day: i64) -> Self {
        Self {
            year: year.clamp(-MAX_YEAR, MAX_YEAR),
            month: month.clamp(0, 11) as u8,
            day: day.clamp(1, 31) as u8,
        }
    }

    /// Date for a count of days since 1970-01-01.
    pub fn from_days(days: i64) -> Self {
        let (year, month, day) = calendar::days_to_ymd(days);
        Self::new(year, i64::from(month) - 1, i64::from(day))
    }

    /// Local date of `timestamp` read at `offset`.
    pub fn from_timestamp(timestamp: i64, offset: UtcOffset) -> Self {
        let (days, _) = calendar::from_seconds(timestamp, offset);
        Self::from_days(days)
    }

    pub fn today(now: OffsetDateTime) -> Self {
        Self::new(
            i64::from(now.year()),
            i64::from(u8::from(now.month())) - 1,
            i64::from(now.day()),
        )
    }

    pub fn yesterday(now: OffsetDateTime) -> Self {
        Self::today(now).prev_day(1)
    }

    pub fn tomorrow(now: OffsetDateTime) -> Self {
        Self::today(now).next_day(1)
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    /// Zero-based month index, 0 = January.
    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn with_year(self, year: i64) -> Self {
        Self::new(year, self.month.into(), self.day.into())
    }

    pub fn with_month(self, month: i64) -> Self {
        Self::new(self.year, month, self.day.into())
    }

    pub fn with_day(self, day: i64) -> Self {
        Self::new(self.year, self.month.into(), day)
    }

    /// Days since 1970-01-01, rolling an overlong day into the next month.
    pub fn days_since_epoch(&self) -> i64 {
        calendar::lenient_days(self.year, self.month.into(), self.day.into())
    }

    /// The same instant with the day folded into a real month.
    pub fn normalized(&self) -> Self {
        Self::from_days(self.days_since_epoch())
    }

    /// Unix timestamp of local midnight at `offset`.
    pub fn timestamp(&self, offset: UtcOffset) -> i64 {
        calendar::to_seconds(self.days_since_epoch(), 0, offset)
    }

    pub fn weekday(&self) -> Weekday {
        let n = calendar::weekday_of(self.days_since_epoch());
        // weekday_of always yields 1..=7
        Weekday::from_number(n).unwrap_or(Weekday::Sunday)
    }

    /// Stable sortable key, `(year * 100 + month) * 100 + day`.
    pub fn id(&self) -> i64 {
        (self.year * 100 + i64::from(self.month)) * 100 + i64::from(self.day)
    }

    pub fn is_yesterday(&self, now: OffsetDateTime) -> bool {
        self.normalized() == Self::yesterday(now)
    }

    pub fn is_today(&self, now: OffsetDateTime) -> bool {
        self.normalized() == Self::today(now)
    }

    pub fn is_tomorrow(&self, now: OffsetDateTime) -> bool {
        self.normalized() == Self::tomorrow(now)
    }

    pub fn is_this_month(&self, now: OffsetDateTime) -> bool {
        let (date, today) = (self.normalized(), Self::today(now));
        date.year == today.year && date.month == today.month
    }

    pub fn is_this_year(&self, now: OffsetDateTime) -> bool {
        self.normalized().year == Self::today(now).year
    }

    pub fn next_day(&self, count: i64) -> Self {
        Self::from_days(self.days_since_epoch().saturating_add(count))
    }

    pub fn prev_day(&self, count: i64) -> Self {
        Self::from_days(self.days_since_epoch().saturating_sub(count))
    }

    /// Step forward `count` months, clamping the day to the target month.
    pub fn next_month(&self, count: i64) -> Self {
        let (year, month, day) = calendar::days_to_ymd(self.days_since_epoch());
        let (year, month, day) = calendar::add_months(year, month, day, count);
        Self::new(year, i64::from(month) - 1, i64::from(day))
    }

    pub fn prev_month(&self, count: i64) -> Self {
        self.next_month(count.saturating_neg())
    }

    /// The nearest `weekday` strictly after this date.
    pub fn next(&self, weekday: Weekday) -> Self {
        let days = calendar::next_matching_weekday(
            self.days_since_epoch(),
            weekday.number(),
            Direction::Forward,
        );
        Self::from_days(days)
    }

    /// The nearest `weekday` strictly before this date.
    pub fn prev(&self, weekday: Weekday) -> Self {
        let days = calendar::next_matching_weekday(
            self.days_since_epoch(),
            weekday.number(),
            Direction::Backward,
        );
        Self::from_days(days)
    }

    pub fn to_time_date(&self) -> Result<time::Date> {
        let (year, month, day) = calendar::days_to_ymd(self.days_since_epoch());
        calendar::to_time_date(year, month, day)
    }

    pub fn from_time_date(date: time::Date) -> Self {
        Self::new(
            i64::from(date.year()),
            i64::from(u8::from(date.month())) - 1,
            i64::from(date.day()),
        )
    }

    /// Render with a `time` format description such as `[day].[month].[year]`.
    pub fn format(&self, pattern: &str) -> Result<String> {
        let items = format_description::parse_borrowed::<2>(pattern)?;
        Ok(self.to_time_date()?.format(&items)?)
    }

    /// Like [`CalendarDate::format`], but yields `Yesterday`, `Today` or
    /// `Tomorrow` when the date matches one enabled in `labels`.
    pub fn describe(
        &self,
        pattern: &str,
        labels: RelativeLabels,
        now: OffsetDateTime,
    ) -> Result<String> {
        match self.relative_label(labels, now) {
            Some(label) => Ok(label.to_string()),
            None => self.format(pattern),
        }
    }

    pub fn relative_label(
        &self,
        labels: RelativeLabels,
        now: OffsetDateTime,
    ) -> Option<&'static str> {
        if labels.yesterday && self.is_yesterday(now) {
            Some("Yesterday")
        } else if labels.today && self.is_today(now) {
            Some("Today")
        } else if labels.tomorrow && self.is_tomorrow(now) {
            Some("Tomorrow")
        } else {
            None
        }
    }

    /// Parse with a `time` format description. Returns `None` on mismatch.
    pub fn parse(s: &str, pattern: &str) -> Option<CalendarDate> {
        let items = format_description::parse_borrowed::<2>(pattern).ok()?;
        let date = time::Date::parse(s.trim(), &items).ok()?;
        Some(Self::from_time_date(date))
    }
}

impl FromStr for CalendarDate {
    type Err = Error;

    /// Accepts ISO 8601 `YYYY-MM-DD`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s, "[year]-[month]-[day]").ok_or_else(|| Error::InvalidFormat(s.to_string()))
    }
}

impl Add<Duration> for CalendarDate {
    type Output = CalendarDate;

    fn add(self, rhs: Duration) -> CalendarDate {
        let timestamp = self.timestamp(UtcOffset::UTC);
        CalendarDate::from_timestamp(timestamp.saturating_add(rhs.total_seconds()), UtcOffset::UTC)
    }
}

impl Add<CalendarDate> for Duration {
    type Output = CalendarDate;

    fn add(self, rhs: CalendarDate) -> CalendarDate {
        rhs + self
    }
}

impl Sub<Duration> for CalendarDate {
    type Output = CalendarDate;

    fn sub(self, rhs: Duration) -> CalendarDate {
        let timestamp = self.timestamp(UtcOffset::UTC);
        CalendarDate::from_timestamp(timestamp.saturating_sub(rhs.total_seconds()), UtcOffset::UTC)
    }
}

impl AddAssign<Duration> for CalendarDate {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl SubAssign<Duration> for CalendarDate {
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

/// ISO 8601 with a one-based month, e.g. `2024-03-05`.
impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month + 1, self.day)
    }
}

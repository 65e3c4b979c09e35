//! Civil calendar arithmetic on the proleptic Gregorian calendar.
//!
//! Converts between (year, month, day) triples, day counts and Unix
//! timestamps, and hosts the small amount of glue to the `time` crate used
//! for offsets and pattern-based formatting. Months here are one-based;
//! callers holding a zero-based index convert at the boundary.

use time::macros::{date, format_description};
use time::{Date, Month, UtcOffset};
use tracing::debug;

use crate::date::MAX_YEAR;
use crate::error::{Error, Result};
use crate::unit::SECONDS_PER_DAY;

/// Direction of a weekday search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Days in one full Gregorian cycle of 400 years. The cycle is a whole
/// number of weeks, so both dates and weekdays repeat after it.
const DAYS_PER_CYCLE: i64 = 146_097;
const YEARS_PER_CYCLE: i64 = 400;

/// Cycle years are looked up in 2000..2400, well inside `time`'s range.
const CYCLE_BASE_YEAR: i64 = 2000;

const UNIX_EPOCH: Date = date!(1970-01-01);

/// The `time` date `offset` days after the epoch, for `offset` in
/// `0..DAYS_PER_CYCLE`.
fn cycle_date(offset: i64) -> Date {
    let julian_day = i64::from(UNIX_EPOCH.to_julian_day()) + offset;
    i32::try_from(julian_day)
        .ok()
        .and_then(|jd| Date::from_julian_day(jd).ok())
        // offsets within one cycle always land in 1970..2370
        .unwrap_or(UNIX_EPOCH)
}

/// Fold `year` into the cycle starting at `CYCLE_BASE_YEAR`, returning the
/// equivalent cycle year and how many whole cycles were removed.
fn fold_year(year: i64) -> (i32, i64) {
    let shifted = year.saturating_sub(CYCLE_BASE_YEAR);
    let cycles = shifted.div_euclid(YEARS_PER_CYCLE);
    // 2000..2400 always fits
    let cycle_year = (CYCLE_BASE_YEAR + shifted.rem_euclid(YEARS_PER_CYCLE)) as i32;
    (cycle_year, cycles)
}

/// Convert days since Unix epoch to (year, month, day).
pub fn days_to_ymd(days: i64) -> (i64, u32, u32) {
    let cycles = days.div_euclid(DAYS_PER_CYCLE);
    let date = cycle_date(days.rem_euclid(DAYS_PER_CYCLE));
    (
        i64::from(date.year()) + cycles * YEARS_PER_CYCLE,
        u8::from(date.month()).into(),
        date.day().into(),
    )
}

/// Convert (year, month, day) to days since Unix epoch.
///
/// Inverse of [`days_to_ymd`]. `month` is clamped to 1..=12 and `day` is
/// counted from the first of the month, so a day past the month's end rolls
/// into the next one. Saturates for years far beyond `MAX_YEAR`.
pub fn ymd_to_days(year: i64, month: u32, day: u32) -> i64 {
    let (cycle_year, cycles) = fold_year(year);
    // the first of any month in a cycle year is always a valid date
    let first = Date::from_calendar_date(cycle_year, month_of(month), 1)
        .map_or(0, |d| i64::from(d.to_julian_day() - UNIX_EPOCH.to_julian_day()));
    cycles
        .saturating_mul(DAYS_PER_CYCLE)
        .saturating_add(first)
        .saturating_add(i64::from(day) - 1)
}

fn month_of(month: u32) -> Month {
    // clamped to 1..=12, so the step is 0..=11
    Month::January.nth_next((month.clamp(1, 12) - 1) as u8)
}

/// Days since epoch for a possibly out-of-range civil date.
///
/// `month0` is a zero-based month index and may fall outside 0..=11; the
/// excess rolls into the year. A `day` past the end of its month rolls into
/// the following month, so February 31st lands in early March.
pub fn lenient_days(year: i64, month0: i64, day: i64) -> i64 {
    let year = year.saturating_add(month0.div_euclid(12));
    let month = month0.rem_euclid(12) as u32 + 1;
    if day > i64::from(days_in_month(year, month)) {
        debug!(year, month, day, "day overflows month, rolling forward");
    }
    ymd_to_days(year, month, 1).saturating_add(day - 1)
}

pub fn is_leap_year(year: i64) -> bool {
    time::util::is_leap_year(fold_year(year).0)
}

/// Number of days in a one-based `month`.
pub fn days_in_month(year: i64, month: u32) -> u32 {
    month_of(month).length(fold_year(year).0).into()
}

/// Weekday of a day count, numbered 1 (Sunday) through 7 (Saturday).
pub fn weekday_of(days: i64) -> u8 {
    cycle_date(days.rem_euclid(DAYS_PER_CYCLE))
        .weekday()
        .number_from_sunday()
}

/// Step a valid civil date by `months`, clamping the day to the target
/// month's length (January 31st plus one month is the last day of February).
/// The resulting year is held within `MAX_YEAR`.
pub fn add_months(year: i64, month: u32, day: u32, months: i64) -> (i64, u32, u32) {
    let limit = MAX_YEAR * 12;
    let unclamped = year
        .saturating_mul(12)
        .saturating_add(i64::from(month) - 1)
        .saturating_add(months);
    let index = unclamped.clamp(-limit, limit + 11);
    if index != unclamped {
        debug!(year, months, "month step clamped to the year limit");
    }
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    (year, month, day.min(days_in_month(year, month)))
}

/// Nearest day strictly after (or before) `days` falling on `weekday`
/// (1 = Sunday .. 7 = Saturday).
pub fn next_matching_weekday(days: i64, weekday: u8, direction: Direction) -> i64 {
    let current = i64::from(weekday_of(days));
    let target = i64::from(weekday);
    match direction {
        Direction::Forward => {
            let delta = (target - current).rem_euclid(7);
            days.saturating_add(if delta == 0 { 7 } else { delta })
        }
        Direction::Backward => {
            let delta = (current - target).rem_euclid(7);
            days.saturating_sub(if delta == 0 { 7 } else { delta })
        }
    }
}

/// Unix timestamp of a local day plus seconds into that day, read at `offset`.
pub fn to_seconds(days: i64, seconds_of_day: i64, offset: UtcOffset) -> i64 {
    days.saturating_mul(SECONDS_PER_DAY)
        .saturating_add(seconds_of_day)
        .saturating_sub(i64::from(offset.whole_seconds()))
}

/// Split a Unix timestamp into (local day count, seconds into that day) at `offset`.
pub fn from_seconds(timestamp: i64, offset: UtcOffset) -> (i64, i64) {
    let local = timestamp.saturating_add(i64::from(offset.whole_seconds()));
    (
        local.div_euclid(SECONDS_PER_DAY),
        local.rem_euclid(SECONDS_PER_DAY),
    )
}

/// Convert to the `time` crate's date, used for pattern formatting.
pub fn to_time_date(year: i64, month: u32, day: u32) -> Result<time::Date> {
    let out_of_range = || Error::OutOfRange { year, month, day };
    let y = i32::try_from(year).map_err(|_| out_of_range())?;
    let m = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(out_of_range)?;
    let d = u8::try_from(day).map_err(|_| out_of_range())?;
    time::Date::from_calendar_date(y, m, d).map_err(|_| out_of_range())
}

/// Offset of the host's local timezone, falling back to UTC when the
/// platform cannot determine it safely.
pub fn local_offset() -> UtcOffset {
    match UtcOffset::current_local_offset() {
        Ok(offset) => offset,
        Err(e) => {
            debug!(error = %e, "local offset unavailable, using UTC");
            UtcOffset::UTC
        }
    }
}

/// Parse `utc`, `local`, `Z` or a signed `+HH:MM` offset.
pub fn parse_offset(s: &str) -> Option<UtcOffset> {
    let s = s.trim();
    match s.to_lowercase().as_str() {
        "utc" | "z" => Some(UtcOffset::UTC),
        "local" => Some(local_offset()),
        _ => UtcOffset::parse(
            s,
            format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
        )
        .ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── day counts ───────────────────────────────────────────

    #[test]
    fn epoch_is_day_zero() {
        assert_eq!(days_to_ymd(0), (1970, 1, 1));
        assert_eq!(ymd_to_days(1970, 1, 1), 0);
    }

    #[test]
    fn day_counts_on_both_sides_of_epoch() {
        assert_eq!(days_to_ymd(19723), (2024, 1, 1));
        assert_eq!(days_to_ymd(-1), (1969, 12, 31));
        assert_eq!(ymd_to_days(2000, 3, 1), 11_017);
    }

    #[test]
    fn day_counts_agree_with_time_crate() {
        for (year, month, day) in [(1, 1, 1), (1600, 2, 29), (1999, 12, 31), (9999, 12, 31)] {
            let expected = to_time_date(year, month, day).unwrap().to_julian_day()
                - UNIX_EPOCH.to_julian_day();
            assert_eq!(ymd_to_days(year, month, day), i64::from(expected));
            assert_eq!(days_to_ymd(i64::from(expected)), (year, month, day));
        }
    }

    #[test]
    fn day_counts_beyond_time_crate_years() {
        // whole 400-year cycles later, the calendar repeats
        let base = ymd_to_days(2024, 2, 29);
        let far = ymd_to_days(2024 + 400 * 1_000_000, 2, 29);
        assert_eq!(far - base, DAYS_PER_CYCLE * 1_000_000);
        assert_eq!(days_to_ymd(far), (2024 + 400 * 1_000_000, 2, 29));
        assert_eq!(days_to_ymd(ymd_to_days(-50_000, 3, 1)), (-50_000, 3, 1));
    }

    #[test]
    fn extreme_day_counts_do_not_overflow() {
        let (year, month, day) = days_to_ymd(i64::MAX);
        assert!(year > MAX_YEAR);
        assert!((1..=12).contains(&month) && (1..=31).contains(&day));
        let (year, _, _) = days_to_ymd(i64::MIN);
        assert!(year < -MAX_YEAR);
        assert_eq!(ymd_to_days(i64::MAX, 12, 31), i64::MAX);
        assert_eq!(weekday_of(i64::MIN), weekday_of(i64::MIN.rem_euclid(DAYS_PER_CYCLE)));
    }

    // ── lenient_days ─────────────────────────────────────────

    #[test]
    fn lenient_days_rolls_day_overflow() {
        // 2023-02-31 is read as 2023-03-03
        assert_eq!(lenient_days(2023, 1, 31), ymd_to_days(2023, 3, 3));
    }

    #[test]
    fn lenient_days_rolls_month_index() {
        assert_eq!(lenient_days(2023, 12, 1), ymd_to_days(2024, 1, 1));
        assert_eq!(lenient_days(2023, -1, 1), ymd_to_days(2022, 12, 1));
    }

    // ── month lengths ────────────────────────────────────────

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(1_000_000_100));
    }

    #[test]
    fn february_length() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
        assert_eq!(days_in_month(-1_000_000_000, 2), 29);
    }

    // ── weekdays ─────────────────────────────────────────────

    #[test]
    fn weekday_of_epoch_is_thursday() {
        assert_eq!(weekday_of(0), 5);
    }

    #[test]
    fn weekday_of_known_dates() {
        // 2024-01-01 was a Monday, 1969-12-28 a Sunday
        assert_eq!(weekday_of(19723), 2);
        assert_eq!(weekday_of(-4), 1);
    }

    #[test]
    fn next_matching_weekday_is_strict() {
        let monday = 19723;
        assert_eq!(next_matching_weekday(monday, 2, Direction::Forward), monday + 7);
        assert_eq!(next_matching_weekday(monday, 6, Direction::Forward), monday + 4);
        assert_eq!(next_matching_weekday(monday, 2, Direction::Backward), monday - 7);
        assert_eq!(next_matching_weekday(monday, 1, Direction::Backward), monday - 1);
    }

    // ── month stepping ───────────────────────────────────────

    #[test]
    fn add_months_clamps_to_month_end() {
        assert_eq!(add_months(2024, 1, 31, 1), (2024, 2, 29));
        assert_eq!(add_months(2023, 1, 31, 1), (2023, 2, 28));
        assert_eq!(add_months(2023, 3, 31, -1), (2023, 2, 28));
    }

    #[test]
    fn add_months_crosses_years() {
        assert_eq!(add_months(2023, 11, 15, 3), (2024, 2, 15));
        assert_eq!(add_months(2024, 1, 15, -13), (2022, 12, 15));
    }

    #[test]
    fn add_months_saturates_at_year_limit() {
        assert_eq!(add_months(2024, 1, 31, i64::MAX), (MAX_YEAR, 12, 31));
        assert_eq!(add_months(2024, 1, 31, i64::MIN), (-MAX_YEAR, 1, 31));
    }

    // ── timestamps ───────────────────────────────────────────

    #[test]
    fn seconds_roundtrip_with_offset() {
        let offset = UtcOffset::from_hms(2, 0, 0).unwrap();
        let ts = to_seconds(19723, 3600, offset);
        // 01:00 at +02:00 is 23:00 UTC the day before
        assert_eq!(ts, 19723 * 86_400 - 3600);
        assert_eq!(from_seconds(ts, offset), (19723, 3600));
    }

    #[test]
    fn from_seconds_before_epoch() {
        assert_eq!(from_seconds(-1, UtcOffset::UTC), (-1, 86_399));
    }

    // ── time crate glue ──────────────────────────────────────

    #[test]
    fn to_time_date_valid() {
        let date = to_time_date(2024, 2, 29).unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), Month::February);
        assert_eq!(date.day(), 29);
    }

    #[test]
    fn to_time_date_rejects_out_of_range() {
        assert!(matches!(
            to_time_date(2023, 2, 29),
            Err(Error::OutOfRange { .. })
        ));
        assert!(to_time_date(5_000_000_000, 1, 1).is_err());
    }

    #[test]
    fn parse_offset_forms() {
        assert_eq!(parse_offset("UTC"), Some(UtcOffset::UTC));
        assert_eq!(parse_offset("z"), Some(UtcOffset::UTC));
        assert_eq!(
            parse_offset("+05:30"),
            Some(UtcOffset::from_hms(5, 30, 0).unwrap())
        );
        assert_eq!(
            parse_offset("-03:00"),
            Some(UtcOffset::from_hms(-3, 0, 0).unwrap())
        );
        assert_eq!(parse_offset("nowhere"), None);
        assert_eq!(parse_offset("05:00"), None);
    }
}

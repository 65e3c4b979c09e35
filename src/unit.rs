use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Granularity of a duration field.
///
/// Ordered by magnitude: `Second < Minute < Hour < Day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
}

impl TimeUnit {
    /// Units from coarsest to finest, the order fields are rendered in.
    pub const DESCENDING: [TimeUnit; 4] = [
        TimeUnit::Day,
        TimeUnit::Hour,
        TimeUnit::Minute,
        TimeUnit::Second,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
        }
    }

    /// Number of seconds in one unit.
    pub fn seconds(&self) -> i64 {
        match self {
            TimeUnit::Second => 1,
            TimeUnit::Minute => SECONDS_PER_MINUTE,
            TimeUnit::Hour => SECONDS_PER_HOUR,
            TimeUnit::Day => SECONDS_PER_DAY,
        }
    }

    /// Largest value the field may hold in a normalized duration.
    pub fn field_max(&self) -> i64 {
        match self {
            TimeUnit::Second | TimeUnit::Minute => 59,
            TimeUnit::Hour => 23,
            TimeUnit::Day => crate::duration::MAX_DAYS,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Ok(TimeUnit::Second),
            "m" | "min" | "mins" | "minute" | "minutes" => Ok(TimeUnit::Minute),
            "h" | "hr" | "hrs" | "hour" | "hours" => Ok(TimeUnit::Hour),
            "d" | "day" | "days" => Ok(TimeUnit::Day),
            _ => Err(Error::InvalidUnit(s.to_string())),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_by_magnitude() {
        assert!(TimeUnit::Second < TimeUnit::Minute);
        assert!(TimeUnit::Minute < TimeUnit::Hour);
        assert!(TimeUnit::Hour < TimeUnit::Day);
        assert_eq!(
            TimeUnit::DESCENDING.iter().max(),
            Some(&TimeUnit::Day)
        );
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("s".parse::<TimeUnit>().unwrap(), TimeUnit::Second);
        assert_eq!("Minutes".parse::<TimeUnit>().unwrap(), TimeUnit::Minute);
        assert_eq!(" hr ".parse::<TimeUnit>().unwrap(), TimeUnit::Hour);
        assert_eq!("days".parse::<TimeUnit>().unwrap(), TimeUnit::Day);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "week".parse::<TimeUnit>(),
            Err(Error::InvalidUnit(_))
        ));
    }

    #[test]
    fn test_seconds_per_unit() {
        assert_eq!(TimeUnit::Day.seconds(), 86_400);
        assert_eq!(TimeUnit::Hour.seconds(), 3_600);
        assert_eq!(TimeUnit::Minute.seconds(), 60);
        assert_eq!(TimeUnit::Second.seconds(), 1);
    }

    #[test]
    fn test_display_roundtrip() {
        for unit in TimeUnit::DESCENDING {
            assert_eq!(unit.to_string().parse::<TimeUnit>().unwrap(), unit);
        }
    }
}

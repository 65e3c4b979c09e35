//! Lightweight civil date, clock time, date-time and duration values.
//!
//! The four value types are plain `Copy` data with total ordering:
//!
//! - [`Duration`]: an unsigned span normalized into days, hours, minutes and
//!   seconds, with saturating operators and `checked_*` variants.
//! - [`ClockTime`]: a wall-clock reading that wraps at midnight.
//! - [`CalendarDate`]: a proleptic Gregorian date with a zero-based month.
//! - [`DateTime`]: a date paired with a clock time.
//!
//! Nothing here reads the system clock on its own. Functions that need "now"
//! take a [`time::OffsetDateTime`] so callers decide the instant and the offset.
//!
//! ```
//! use smdatetime::{Duration, StringFormat, TimeUnit};
//!
//! let elapsed: Duration = "1h 29m 59s".parse().unwrap();
//! assert_eq!(elapsed.rounded(TimeUnit::Minute).to_string(), "1h 30m");
//!
//! let colon: StringFormat = "colon:second-hour".parse().unwrap();
//! assert_eq!(elapsed.format(&colon), "01:29:59");
//! ```

pub mod calendar;
pub mod clock;
pub mod date;
pub mod datetime;
pub mod duration;
pub mod error;
pub mod format;
pub mod unit;

pub use clock::{ClockTime, ClockType};
pub use date::{CalendarDate, RelativeLabels, Weekday};
pub use datetime::DateTime;
pub use duration::Duration;
pub use error::{Error, Result};
pub use format::{LabelType, StringFormat};
pub use unit::TimeUnit;

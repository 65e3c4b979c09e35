//! Error types for the smdatetime crate.

/// Error type for all fallible operations in the smdatetime crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a duration is divided by a zero factor.
    #[error("cannot divide a duration by zero")]
    DivisionByZero,

    /// Returned when a checked operation exceeds the representable range.
    #[error("duration arithmetic overflowed")]
    Overflow,

    /// Returned when a string cannot be read as a duration.
    #[error("invalid duration: {0:?}")]
    InvalidDuration(String),

    /// Returned when a string does not name a time unit.
    #[error("invalid time unit: {0:?}")]
    InvalidUnit(String),

    /// Returned when a string does not match the expected textual form, such
    /// as a format spec, a clock type or an ISO date.
    #[error("invalid format: {0:?}")]
    InvalidFormat(String),

    /// Returned when a date/time format pattern cannot be compiled.
    #[error("invalid format pattern: {0}")]
    InvalidFormatDescription(#[from] time::error::InvalidFormatDescription),

    /// Returned when a value cannot be rendered with the given pattern.
    #[error("cannot format value: {0}")]
    Format(#[from] time::error::Format),

    /// Returned when a civil date falls outside what the formatter supports.
    #[error("date {year}-{month:02}-{day:02} is outside the supported range")]
    OutOfRange {
        /// Normalized year.
        year: i64,
        /// One-based month.
        month: u32,
        /// Day of month.
        day: u32,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

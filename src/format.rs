//! Rendering durations as text.
//!
//! A [`StringFormat`] has a compact string form used by the CLI and config:
//! `total:<unit>`, `colon:<min>-<max>` and `textual:<label>[+zeros]`.

use std::fmt;
use std::str::FromStr;

use crate::duration::Duration;
use crate::error::Error;
use crate::unit::TimeUnit;

/// How unit labels are spelled in [`StringFormat::Textual`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelType {
    /// `d`, `h`, `m`, `s` with no separator.
    Single,
    /// `day(s)`, `hour(s)`, `min`, `sec`.
    Short,
    /// `day(s)`, `hour(s)`, `minute(s)`, `second(s)`.
    Full,
}

impl LabelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelType::Single => "single",
            LabelType::Short => "short",
            LabelType::Full => "full",
        }
    }

    /// Label for `unit`, pluralized for any value other than one.
    pub fn label(&self, unit: TimeUnit, value: i64) -> &'static str {
        let plural = value != 1;
        match (self, unit) {
            (LabelType::Single, TimeUnit::Day) => "d",
            (LabelType::Single, TimeUnit::Hour) => "h",
            (LabelType::Single, TimeUnit::Minute) => "m",
            (LabelType::Single, TimeUnit::Second) => "s",
            (LabelType::Short, TimeUnit::Minute) => "min",
            (LabelType::Short, TimeUnit::Second) => "sec",
            (_, TimeUnit::Day) if plural => "days",
            (_, TimeUnit::Day) => "day",
            (_, TimeUnit::Hour) if plural => "hours",
            (_, TimeUnit::Hour) => "hour",
            (LabelType::Full, TimeUnit::Minute) if plural => "minutes",
            (LabelType::Full, TimeUnit::Minute) => "minute",
            (LabelType::Full, TimeUnit::Second) if plural => "seconds",
            (LabelType::Full, TimeUnit::Second) => "second",
        }
    }

    fn separator(&self) -> &'static str {
        match self {
            LabelType::Single => "",
            LabelType::Short | LabelType::Full => " ",
        }
    }
}

impl FromStr for LabelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(LabelType::Single),
            "short" => Ok(LabelType::Short),
            "full" => Ok(LabelType::Full),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringFormat {
    /// The whole duration as one decimal number in `unit`, at most two
    /// fractional digits.
    TotalValue { unit: TimeUnit },
    /// Two-digit fields from `maximal` down to `minimal`, joined by `:`.
    ColonSeparated { minimal: TimeUnit, maximal: TimeUnit },
    /// `<value><sep><label>` per field, space-joined. Zero fields are
    /// skipped unless `include_zeros` is set.
    Textual {
        label: LabelType,
        include_zeros: bool,
    },
}

impl StringFormat {
    pub fn render(&self, duration: &Duration) -> String {
        match *self {
            StringFormat::TotalValue { unit } => format_decimal(duration.total(unit)),
            StringFormat::ColonSeparated { minimal, maximal } => TimeUnit::DESCENDING
                .iter()
                .filter(|unit| (minimal..=maximal).contains(*unit))
                .map(|unit| format!("{:02}", duration.get(*unit)))
                .collect::<Vec<_>>()
                .join(":"),
            StringFormat::Textual {
                label,
                include_zeros,
            } => TimeUnit::DESCENDING
                .iter()
                .map(|unit| (*unit, duration.get(*unit)))
                .filter(|(_, value)| include_zeros || *value > 0)
                .map(|(unit, value)| {
                    format!("{}{}{}", value, label.separator(), label.label(unit, value))
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Up to two fractional digits, trailing zeros dropped, no digit grouping.
fn format_decimal(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

impl Default for StringFormat {
    fn default() -> Self {
        StringFormat::Textual {
            label: LabelType::Single,
            include_zeros: false,
        }
    }
}

impl FromStr for StringFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidFormat(s.to_string());
        let (kind, args) = s.trim().split_once(':').unwrap_or((s.trim(), ""));

        match kind.to_lowercase().as_str() {
            "total" => {
                let unit = args.parse().map_err(|_| invalid())?;
                Ok(StringFormat::TotalValue { unit })
            }
            "colon" => {
                let (min, max) = args.split_once('-').ok_or_else(invalid)?;
                let minimal: TimeUnit = min.parse().map_err(|_| invalid())?;
                let maximal: TimeUnit = max.parse().map_err(|_| invalid())?;
                if minimal > maximal {
                    return Err(invalid());
                }
                Ok(StringFormat::ColonSeparated { minimal, maximal })
            }
            "textual" => {
                let (label, include_zeros) = match args.strip_suffix("+zeros") {
                    Some(label) => (label, true),
                    None => (args, false),
                };
                let label = if label.is_empty() {
                    LabelType::Single
                } else {
                    label.parse().map_err(|_| invalid())?
                };
                Ok(StringFormat::Textual {
                    label,
                    include_zeros,
                })
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for StringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringFormat::TotalValue { unit } => write!(f, "total:{}", unit),
            StringFormat::ColonSeparated { minimal, maximal } => {
                write!(f, "colon:{}-{}", minimal, maximal)
            }
            StringFormat::Textual {
                label,
                include_zeros,
            } => {
                write!(f, "textual:{}", label.as_str())?;
                if *include_zeros {
                    write!(f, "+zeros")?;
                }
                Ok(())
            }
        }
    }
}

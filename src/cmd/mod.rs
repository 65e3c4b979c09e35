mod clock;
mod date;
mod datetime;
mod duration;

pub use self::clock::cmd_time;
pub use self::date::cmd_date;
pub use self::datetime::cmd_datetime;
pub use self::duration::cmd_duration;

use anyhow::{Context, Result};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use smdatetime::{Duration, StringFormat};

use crate::cli::Format;
use crate::config::Config;
use crate::model::DurationReport;

/// Everything a command needs besides its own arguments.
pub struct Session {
    pub config: Config,
    pub format: Format,
    pub now: OffsetDateTime,
}

impl Session {
    pub fn new(config: Config, format: Format, now: OffsetDateTime) -> Self {
        Self {
            config,
            format,
            now,
        }
    }

    /// The date pattern to use, preferring a per-command override.
    pub(crate) fn date_pattern<'a>(&'a self, pattern: Option<&'a str>) -> &'a str {
        pattern.unwrap_or(&self.config.date.pattern)
    }

    /// Render a duration with `render_as`, or the configured format.
    pub(crate) fn duration_report(
        &self,
        duration: Duration,
        render_as: Option<StringFormat>,
    ) -> Result<DurationReport> {
        let format = match render_as {
            Some(format) => format,
            None => self.config.duration_format()?,
        };
        let text = duration.format(&format);
        // An all-zero textual rendering is empty; fall back to "0s".
        let text = if text.is_empty() {
            duration.to_string()
        } else {
            text
        };
        Ok(DurationReport::new(duration, text))
    }
}

/// The current instant at `offset`, or `pinned` (RFC 3339) moved to `offset`.
pub fn resolve_now(pinned: Option<&str>, offset: UtcOffset) -> Result<OffsetDateTime> {
    let now = match pinned {
        Some(s) => OffsetDateTime::parse(s, &Rfc3339)
            .with_context(|| format!("invalid --now '{s}' (expected RFC 3339)"))?,
        None => OffsetDateTime::now_utc(),
    };
    Ok(now.to_offset(offset))
}

use anyhow::{Context, Result};

use smdatetime::DateTime;

use crate::cli::DatetimeCommand;
use crate::model::DateTimeReport;
use crate::output::{print_datetime, print_duration};

use super::Session;

const DEFAULT_TIME_PATTERN: &str = "[hour]:[minute]:[second]";

pub fn cmd_datetime(session: &Session, action: DatetimeCommand) -> Result<()> {
    let (datetime, pattern) = match action {
        DatetimeCommand::Diff {
            first,
            second,
            render_as,
        } => {
            let report = session.duration_report(first - second, render_as)?;
            return print_duration(&report, &session.format);
        }
        DatetimeCommand::Now { pattern } => (DateTime::now(session.now), pattern),
        DatetimeCommand::Add {
            datetime,
            duration,
            pattern,
        } => (datetime + duration, pattern),
        DatetimeCommand::Sub {
            datetime,
            duration,
            pattern,
        } => (datetime - duration, pattern),
    };

    let pattern = match pattern {
        Some(pattern) => pattern,
        None => format!("{} {}", session.config.date.pattern, DEFAULT_TIME_PATTERN),
    };
    let text = datetime
        .format(&pattern)
        .with_context(|| format!("cannot format date-time with '{pattern}'"))?;
    let report = DateTimeReport {
        datetime,
        weekday: datetime.weekday(),
        timestamp: datetime.timestamp(session.now.offset()),
        text,
    };
    print_datetime(&report, &session.format)
}

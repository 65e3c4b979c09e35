use anyhow::{Context, Result};
use time::UtcOffset;

use smdatetime::{CalendarDate, RelativeLabels};

use crate::cli::DateCommand;
use crate::model::{DateInfo, DateReport};
use crate::output::{print_date, print_date_info};

use super::Session;

pub fn cmd_date(session: &Session, action: DateCommand) -> Result<()> {
    let now = session.now;
    let (date, pattern) = match action {
        DateCommand::Info { date } => {
            return print_date_info(&info(session, date)?, &session.format);
        }
        DateCommand::Today { pattern } => (CalendarDate::today(now), pattern),
        DateCommand::Yesterday { pattern } => (CalendarDate::yesterday(now), pattern),
        DateCommand::Tomorrow { pattern } => (CalendarDate::tomorrow(now), pattern),
        DateCommand::Shift {
            date,
            days,
            months,
            pattern,
        } => {
            let shifted = match months {
                0 => date,
                n => date.next_month(n),
            };
            (shifted.next_day(days), pattern)
        }
        DateCommand::Next {
            weekday,
            from,
            pattern,
        } => (from.unwrap_or_else(|| CalendarDate::today(now)).next(weekday), pattern),
        DateCommand::Prev {
            weekday,
            from,
            pattern,
        } => (from.unwrap_or_else(|| CalendarDate::today(now)).prev(weekday), pattern),
    };

    let pattern = session.date_pattern(pattern.as_deref());
    let text = date
        .describe(pattern, session.config.labels(), now)
        .with_context(|| format!("cannot format date with '{pattern}'"))?;
    let report = DateReport {
        date,
        weekday: date.weekday(),
        text,
    };
    print_date(&report, &session.format)
}

fn info(session: &Session, date: CalendarDate) -> Result<DateInfo> {
    let now = session.now;
    Ok(DateInfo {
        date,
        iso: date.format("[year]-[month]-[day]")?,
        weekday: date.weekday(),
        id: date.id(),
        timestamp: date.timestamp(UtcOffset::UTC),
        relative: date.relative_label(RelativeLabels::ALL, now),
        this_month: date.is_this_month(now),
        this_year: date.is_this_year(now),
    })
}

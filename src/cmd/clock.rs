use anyhow::{Context, Result};

use smdatetime::ClockTime;

use crate::cli::{ClockArgs, TimeCommand};
use crate::model::TimeReport;
use crate::output::print_time;

use super::Session;

pub fn cmd_time(session: &Session, action: TimeCommand) -> Result<()> {
    let (time, args) = match action {
        TimeCommand::Now { clock } => (ClockTime::now(session.now), clock),
        TimeCommand::Format { time, clock } => (time, clock),
        TimeCommand::Add {
            time,
            duration,
            clock,
        } => (time + duration, clock),
        TimeCommand::Sub {
            time,
            duration,
            clock,
        } => (time - duration, clock),
    };

    let report = TimeReport {
        time,
        text: render(session, &time, &args)?,
    };
    print_time(&report, &session.format)
}

/// Pattern wins over the clock flags; flags win over config.
fn render(session: &Session, time: &ClockTime, args: &ClockArgs) -> Result<String> {
    if let Some(ref pattern) = args.pattern {
        return time
            .format_with(pattern)
            .with_context(|| format!("cannot format time with '{pattern}'"));
    }
    let clock = match args.clock {
        Some(clock) => clock,
        None => session.config.clock_type()?,
    };
    let seconds = session.config.time.seconds && !args.no_seconds;
    Ok(time.format(clock, seconds))
}

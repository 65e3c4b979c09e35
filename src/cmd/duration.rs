use anyhow::{Context, Result};

use smdatetime::Duration;

use crate::cli::DurationCommand;
use crate::output::print_duration;

use super::Session;

pub fn cmd_duration(session: &Session, action: DurationCommand) -> Result<()> {
    let (duration, render_as) = match action {
        DurationCommand::Format {
            duration,
            render_as,
        } => (duration, render_as),
        DurationCommand::Round {
            duration,
            unit,
            render_as,
        } => (duration.rounded(unit), render_as),
        DurationCommand::Add {
            durations,
            render_as,
        } => {
            let sum = durations
                .iter()
                .try_fold(Duration::ZERO, |acc, d| acc.checked_add(*d))
                .context("sum of durations is too large")?;
            (sum, render_as)
        }
        DurationCommand::Sub {
            first,
            second,
            render_as,
        } => (first.abs_diff(second), render_as),
        DurationCommand::Mul {
            duration,
            factor,
            render_as,
        } => {
            let product = duration
                .checked_mul(factor)
                .with_context(|| format!("cannot multiply {duration} by {factor}"))?;
            (product, render_as)
        }
        DurationCommand::Div {
            duration,
            factor,
            render_as,
        } => {
            let quotient = duration
                .checked_div(factor)
                .with_context(|| format!("cannot divide {duration} by {factor}"))?;
            (quotient, render_as)
        }
        DurationCommand::Between {
            start,
            finish,
            render_as,
        } => (Duration::between(&start, &finish), render_as),
    };

    let report = session.duration_report(duration, render_as)?;
    print_duration(&report, &session.format)
}

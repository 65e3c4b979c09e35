use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;

use crate::cli::Format;
use crate::model::*;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize")?;
    println!("{}", json);
    Ok(())
}

pub fn print_duration(report: &DurationReport, format: &Format) -> Result<()> {
    match format {
        Format::Text => {
            println!("{}", report.text.bold());
            Ok(())
        }
        Format::Json => print_json(report),
    }
}

pub fn print_time(report: &TimeReport, format: &Format) -> Result<()> {
    match format {
        Format::Text => {
            println!("{}", report.text.bold());
            Ok(())
        }
        Format::Json => print_json(report),
    }
}

pub fn print_date(report: &DateReport, format: &Format) -> Result<()> {
    match format {
        Format::Text => {
            println!(
                "{}  {}",
                report.text.bold(),
                report.weekday.as_str().dimmed()
            );
            Ok(())
        }
        Format::Json => print_json(report),
    }
}

pub fn print_date_info(info: &DateInfo, format: &Format) -> Result<()> {
    match format {
        Format::Text => {
            println!("{}", info.iso.bold().underline());
            println!("  {:10} {}", "weekday".dimmed(), info.weekday);
            println!("  {:10} {}", "id".dimmed(), info.id);
            println!("  {:10} {}", "timestamp".dimmed(), info.timestamp);
            if let Some(label) = info.relative {
                println!("  {:10} {}", "relative".dimmed(), label.green());
            }
            let mut scope = Vec::new();
            if info.this_year {
                scope.push("this year");
            }
            if info.this_month {
                scope.push("this month");
            }
            if !scope.is_empty() {
                println!("  {:10} {}", "within".dimmed(), scope.join(", "));
            }
            Ok(())
        }
        Format::Json => print_json(info),
    }
}

pub fn print_datetime(report: &DateTimeReport, format: &Format) -> Result<()> {
    match format {
        Format::Text => {
            println!(
                "{}  {}",
                report.text.bold(),
                report.weekday.as_str().dimmed()
            );
            Ok(())
        }
        Format::Json => print_json(report),
    }
}

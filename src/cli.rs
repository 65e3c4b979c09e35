use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use smdatetime::{
    CalendarDate, ClockTime, ClockType, DateTime, Duration, StringFormat, TimeUnit, Weekday,
};

#[derive(Parser)]
#[command(
    name = "smdatetime",
    version,
    about = "Work with durations, clock times and calendar dates"
)]
pub struct Cli {
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: Format,

    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Offset for reading the current instant: utc, local or +HH:MM
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub utc_offset: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Pin the current instant (RFC 3339)
    #[arg(long, global = true, hide = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Format, round and combine durations
    #[command(alias = "dur")]
    Duration {
        #[command(subcommand)]
        action: DurationCommand,
    },

    /// Clock times of day
    Time {
        #[command(subcommand)]
        action: TimeCommand,
    },

    /// Calendar dates
    Date {
        #[command(subcommand)]
        action: DateCommand,
    },

    /// Dates combined with clock times
    #[command(alias = "dt")]
    Datetime {
        #[command(subcommand)]
        action: DatetimeCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the JSON Schema of the configuration file
    Schema,
}

#[derive(Subcommand)]
pub enum DurationCommand {
    /// Normalize and render a duration
    Format {
        /// Seconds, HH:MM[:SS], DD:HH:MM:SS or unit tokens like "1d 2h 30m"
        duration: Duration,

        /// Output format, e.g. total:hour, colon:second-day, textual:full+zeros
        #[arg(long = "as")]
        render_as: Option<StringFormat>,
    },

    /// Round half-up to a whole unit
    Round {
        duration: Duration,

        #[arg(long, default_value = "minute")]
        unit: TimeUnit,

        #[arg(long = "as")]
        render_as: Option<StringFormat>,
    },

    /// Sum one or more durations
    Add {
        #[arg(required = true)]
        durations: Vec<Duration>,

        #[arg(long = "as")]
        render_as: Option<StringFormat>,
    },

    /// Absolute difference of two durations
    Sub {
        first: Duration,
        second: Duration,

        #[arg(long = "as")]
        render_as: Option<StringFormat>,
    },

    /// Multiply by an integer factor
    Mul {
        duration: Duration,

        #[arg(allow_negative_numbers = true)]
        factor: i64,

        #[arg(long = "as")]
        render_as: Option<StringFormat>,
    },

    /// Divide by an integer factor, rounding half-up to whole seconds
    Div {
        duration: Duration,

        #[arg(allow_negative_numbers = true)]
        factor: i64,

        #[arg(long = "as")]
        render_as: Option<StringFormat>,
    },

    /// Span between two clock times of the same day
    Between {
        start: ClockTime,
        finish: ClockTime,

        #[arg(long = "as")]
        render_as: Option<StringFormat>,
    },
}

/// Rendering flags shared by the clock time commands.
#[derive(clap::Args)]
pub struct ClockArgs {
    /// 24 or 12
    #[arg(long)]
    pub clock: Option<ClockType>,

    /// Omit seconds
    #[arg(long)]
    pub no_seconds: bool,

    /// Format description in the `time` crate syntax, overrides --clock
    #[arg(long)]
    pub pattern: Option<String>,
}

#[derive(Subcommand)]
pub enum TimeCommand {
    /// Current clock time
    Now {
        #[command(flatten)]
        clock: ClockArgs,
    },

    /// Render a clock time given as HH:MM[:SS]
    Format {
        time: ClockTime,

        #[command(flatten)]
        clock: ClockArgs,
    },

    /// Move a clock time forward, wrapping at midnight
    Add {
        time: ClockTime,
        duration: Duration,

        #[command(flatten)]
        clock: ClockArgs,
    },

    /// Move a clock time backward, wrapping at midnight
    Sub {
        time: ClockTime,
        duration: Duration,

        #[command(flatten)]
        clock: ClockArgs,
    },
}

#[derive(Subcommand)]
pub enum DateCommand {
    /// Today's date at the configured offset
    Today {
        #[arg(long)]
        pattern: Option<String>,
    },

    /// The day before today
    Yesterday {
        #[arg(long)]
        pattern: Option<String>,
    },

    /// The day after today
    Tomorrow {
        #[arg(long)]
        pattern: Option<String>,
    },

    /// Weekday, timestamp and relative position of a YYYY-MM-DD date
    Info { date: CalendarDate },

    /// Step a date by days and months
    Shift {
        date: CalendarDate,

        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        days: i64,

        /// Month steps clamp the day to the target month's length
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        months: i64,

        #[arg(long)]
        pattern: Option<String>,
    },

    /// Nearest given weekday strictly after a date (default: today)
    Next {
        weekday: Weekday,

        #[arg(long)]
        from: Option<CalendarDate>,

        #[arg(long)]
        pattern: Option<String>,
    },

    /// Nearest given weekday strictly before a date (default: today)
    Prev {
        weekday: Weekday,

        #[arg(long)]
        from: Option<CalendarDate>,

        #[arg(long)]
        pattern: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum DatetimeCommand {
    /// Current date and time at the configured offset
    Now {
        #[arg(long)]
        pattern: Option<String>,
    },

    /// Elapsed time between two date-times
    Diff {
        /// YYYY-MM-DD HH:MM[:SS] or YYYY-MM-DDTHH:MM[:SS]
        first: DateTime,
        second: DateTime,

        #[arg(long = "as")]
        render_as: Option<StringFormat>,
    },

    /// Move a date-time forward by a duration
    Add {
        datetime: DateTime,
        duration: Duration,

        #[arg(long)]
        pattern: Option<String>,
    },

    /// Move a date-time backward by a duration
    Sub {
        datetime: DateTime,
        duration: Duration,

        #[arg(long)]
        pattern: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_typed_arguments() {
        let cli = Cli::try_parse_from([
            "smdatetime",
            "duration",
            "round",
            "1h 29m 59s",
            "--unit",
            "hour",
            "--as",
            "colon:second-hour",
        ])
        .unwrap();
        match cli.command {
            Command::Duration {
                action:
                    DurationCommand::Round {
                        duration,
                        unit,
                        render_as,
                    },
            } => {
                assert_eq!(duration, Duration::new(0, 1, 29, 59));
                assert_eq!(unit, TimeUnit::Hour);
                assert!(render_as.is_some());
            }
            _ => panic!("expected duration round"),
        }
    }

    #[test]
    fn test_negative_shift() {
        let cli =
            Cli::try_parse_from(["smdatetime", "date", "shift", "2024-03-31", "--months", "-1"])
                .unwrap();
        match cli.command {
            Command::Date {
                action: DateCommand::Shift { months, days, .. },
            } => {
                assert_eq!(months, -1);
                assert_eq!(days, 0);
            }
            _ => panic!("expected date shift"),
        }
    }

    #[test]
    fn test_rejects_bad_duration() {
        assert!(Cli::try_parse_from(["smdatetime", "duration", "format", "soon"]).is_err());
    }

    #[test]
    fn test_every_subcommand_has_help() {
        fn check(cmd: &clap::Command, path: &str) {
            for sub in cmd.get_subcommands() {
                let path = format!("{path} {}", sub.get_name());
                assert!(sub.get_about().is_some(), "`{path}` has no help text");
                check(sub, &path);
            }
        }
        check(&Cli::command(), "smdatetime");
    }
}

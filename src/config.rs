use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use time::UtcOffset;

use smdatetime::calendar;
use smdatetime::{ClockType, RelativeLabels, StringFormat};

const CONFIG_FILE: &str = ".smdatetime.toml";

/// Configuration for the smdatetime command-line tool
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(deny_unknown_fields, title = "smdatetime Configuration")]
pub struct Config {
    /// Offset used to read the current instant and timestamps: "utc", "local" or "+HH:MM"
    pub utc_offset: String,
    /// Duration rendering
    pub duration: DurationConfig,
    /// Clock time rendering
    pub time: TimeConfig,
    /// Calendar date rendering
    pub date: DateConfig,
}

/// Duration rendering
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(deny_unknown_fields)]
pub struct DurationConfig {
    /// Output format: "total:<unit>", "colon:<min>-<max>" or "textual[:single|short|full][+zeros]"
    pub format: String,
}

/// Clock time rendering
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(deny_unknown_fields)]
pub struct TimeConfig {
    /// "24" or "12"
    pub clock: String,
    /// Include seconds in clock output
    pub seconds: bool,
}

/// Calendar date rendering
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(deny_unknown_fields)]
pub struct DateConfig {
    /// Format description in the `time` crate syntax, e.g. "[day].[month].[year]"
    pub pattern: String,
    /// Print Yesterday, Today or Tomorrow instead of the date when it matches
    pub labels: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            utc_offset: "local".into(),
            duration: DurationConfig::default(),
            time: TimeConfig::default(),
            date: DateConfig::default(),
        }
    }
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            format: StringFormat::default().to_string(),
        }
    }
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            clock: "24".into(),
            seconds: true,
        }
    }
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            pattern: "[year]-[month]-[day]".into(),
            labels: false,
        }
    }
}

impl Config {
    /// Load config from .smdatetime.toml, searching up from the given
    /// directory, then from the user config directory.
    pub fn load(start_dir: &Path) -> Result<Self> {
        match find_config_file(start_dir).or_else(global_config_file) {
            Some(path) => Self::from_path(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolve an offset spec, preferring `override_spec` over `utc_offset`.
    pub fn offset(&self, override_spec: Option<&str>) -> Result<UtcOffset> {
        let spec = override_spec.unwrap_or(&self.utc_offset);
        calendar::parse_offset(spec).with_context(|| {
            format!("invalid UTC offset '{spec}' (expected utc, local or +HH:MM)")
        })
    }

    pub fn duration_format(&self) -> Result<StringFormat> {
        self.duration
            .format
            .parse()
            .with_context(|| format!("invalid [duration] format '{}'", self.duration.format))
    }

    pub fn clock_type(&self) -> Result<ClockType> {
        self.time
            .clock
            .parse()
            .with_context(|| format!("invalid [time] clock '{}'", self.time.clock))
    }

    pub fn labels(&self) -> RelativeLabels {
        if self.date.labels {
            RelativeLabels::ALL
        } else {
            RelativeLabels::NONE
        }
    }
}

/// Print the JSON Schema of [`Config`].
pub fn cmd_schema() -> Result<()> {
    let schema = schemars::schema_for!(Config);
    let json = serde_json::to_string_pretty(&schema).context("failed to serialize schema")?;
    println!("{}", json);
    Ok(())
}

/// Search for .smdatetime.toml from start_dir upward
fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

fn global_config_file() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("smdatetime").join("config.toml"))
        .filter(|path| path.is_file())
}

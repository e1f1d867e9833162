use crate::error::ConfigError;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use time::{Duration, UtcOffset};

pub const DEFAULT_APP_NAME: &str = "Piket Reminder";
pub const DEFAULT_ROSTER_URL: &str =
    "https://raw.githubusercontent.com/Saaannn27/Pengingat-piket-kejari/main/piket-data.json";
pub const DEFAULT_DATA_DIR: &str = ".piket";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub roster_url: String,
    pub fetch_timeout: std::time::Duration,
    pub data_dir: PathBuf,
    /// Offset the roster's wall-clock dates and times are read in.
    pub utc_offset: UtcOffset,
    pub refresh_interval: Duration,
    pub device_capable: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            roster_url: DEFAULT_ROSTER_URL.to_string(),
            fetch_timeout: crate::roster::DEFAULT_FETCH_TIMEOUT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            utc_offset: default_utc_offset(),
            refresh_interval: Duration::hours(1),
            device_capable: true,
        }
    }
}

fn default_utc_offset() -> UtcOffset {
    time::macros::offset!(+7)
}

/// One source of settings. Unset fields fall through to the layer below,
/// and finally to [`AppConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub app_name: Option<String>,
    pub roster_url: Option<String>,
    pub fetch_timeout: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub utc_offset: Option<String>,
    pub refresh_interval: Option<String>,
    pub device_capable: Option<bool>,
}

impl ConfigLayer {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn layered_over(self, lower: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            app_name: self.app_name.or(lower.app_name),
            roster_url: self.roster_url.or(lower.roster_url),
            fetch_timeout: self.fetch_timeout.or(lower.fetch_timeout),
            data_dir: self.data_dir.or(lower.data_dir),
            utc_offset: self.utc_offset.or(lower.utc_offset),
            refresh_interval: self.refresh_interval.or(lower.refresh_interval),
            device_capable: self.device_capable.or(lower.device_capable),
        }
    }

    pub fn into_config(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();

        let app_name = match self.app_name {
            Some(name) => non_empty("app name", name)?,
            None => defaults.app_name,
        };
        let roster_url = match self.roster_url {
            Some(url) => non_empty("roster url", url)?,
            None => defaults.roster_url,
        };
        let fetch_timeout = match self.fetch_timeout.as_deref() {
            Some(raw) => {
                let timeout = parse_interval("fetch timeout", raw)?;
                std::time::Duration::try_from(timeout).map_err(|err| ConfigError::Invalid {
                    field: "fetch timeout",
                    message: err.to_string(),
                })?
            }
            None => defaults.fetch_timeout,
        };
        let utc_offset = match self.utc_offset.as_deref() {
            Some(raw) => parse_utc_offset(raw)?,
            None => defaults.utc_offset,
        };
        let refresh_interval = match self.refresh_interval.as_deref() {
            Some(raw) => parse_interval("refresh interval", raw)?,
            None => defaults.refresh_interval,
        };

        Ok(AppConfig {
            app_name,
            roster_url,
            fetch_timeout,
            data_dir: self.data_dir.unwrap_or(defaults.data_dir),
            utc_offset,
            refresh_interval,
            device_capable: self.device_capable.unwrap_or(defaults.device_capable),
        })
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid {
            field,
            message: "cannot be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Parses `<number>[s|m|h|d]`; a bare number means seconds.
pub fn parse_interval(field: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |message: String| ConfigError::Invalid { field, message };
    let value = raw.trim();
    if value.is_empty() {
        return Err(invalid("cannot be empty".to_string()));
    }

    let (amount, unit) = match value.chars().last() {
        Some(ch) if ch.is_ascii_alphabetic() => {
            (&value[..value.len() - 1], ch.to_ascii_lowercase())
        }
        _ => (value, 's'),
    };

    let amount: i64 = amount
        .parse()
        .map_err(|_| invalid(format!("'{value}'; expected <number>[s|m|h|d]")))?;

    if amount <= 0 {
        return Err(invalid("must be greater than 0".to_string()));
    }

    match unit {
        's' => Ok(Duration::seconds(amount)),
        'm' => Ok(Duration::minutes(amount)),
        'h' => Ok(Duration::hours(amount)),
        'd' => Ok(Duration::days(amount)),
        _ => Err(invalid(format!("'{value}'; expected <number>[s|m|h|d]"))),
    }
}

/// Parses `+HH:MM`, `-HH:MM`, `+H` or `Z`.
pub fn parse_utc_offset(raw: &str) -> Result<UtcOffset, ConfigError> {
    let value = raw.trim();
    let invalid = || ConfigError::Invalid {
        field: "utc offset",
        message: format!("'{value}'; expected +HH:MM"),
    };
    if value.eq_ignore_ascii_case("z") {
        return Ok(UtcOffset::UTC);
    }

    let (sign, rest) = match value.chars().next() {
        Some('+') => (1i8, &value[1..]),
        Some('-') => (-1i8, &value[1..]),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i8 = hours.parse().map_err(|_| invalid())?;
    let minutes: i8 = minutes.parse().map_err(|_| invalid())?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(invalid());
    }
    UtcOffset::from_hms(sign * hours, sign * minutes, 0).map_err(|_| invalid())
}

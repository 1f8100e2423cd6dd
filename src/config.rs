use chrono_tz::Tz;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::AppError;

const DEFAULT_FORECAST_URL: &str = "https://www.jma.go.jp/bosai/forecast/data/forecast/250000.json";
const DEFAULT_OBSERVATION_URL: &str =
    "https://www.data.jma.go.jp/obd/stats/data/mdrr/tem_rct/alltable/mxtemsadext00_rct.html";

/// Hour (local, 0-23) from which today's observed extremes are considered
/// final enough to compare against. Earlier deployments used 17.
pub const DEFAULT_COMPARISON_CUTOFF_HOUR: u32 = 15;

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub forecast_url: String,
    /// JMA office code, e.g. "250000". Used for the reference links.
    pub office_code: String,
    /// Heading used in the console report, e.g. "滋賀県".
    pub region_name: String,
    /// Index into each series' `areas` array.
    pub area_index: usize,
    pub forecast_timeout: Duration,
    pub observation_url: String,
    pub station_name: String,
    pub observation_enabled: bool,
    pub observation_timeout: Duration,
    pub comparison_cutoff_hour: u32,
    /// Replaces the wall-clock hour when deciding whether to compare.
    pub hour_override: Option<u32>,
    pub timezone: Tz,
    /// Secret. `None` disables notification even when `--notify` is given.
    pub webhook_url: Option<String>,
    pub webhook_username: String,
    pub notification_timeout: Duration,
    pub user_agent: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let comparison_cutoff_hour = match get("COMPARISON_CUTOFF_HOUR") {
            Some(v) => parse_hour("COMPARISON_CUTOFF_HOUR", &v)?,
            None => DEFAULT_COMPARISON_CUTOFF_HOUR,
        };
        let hour_override = get("COMPARISON_HOUR_OVERRIDE")
            .map(|v| parse_hour("COMPARISON_HOUR_OVERRIDE", &v))
            .transpose()?;

        let timezone_name = get_or("REPORT_TIMEZONE", "Asia/Tokyo");
        let timezone = Tz::from_str(&timezone_name).map_err(|e| {
            AppError::Config(format!("REPORT_TIMEZONE '{}' is invalid: {}", timezone_name, e))
        })?;

        let forecast_url = get_or("FORECAST_URL", DEFAULT_FORECAST_URL);
        let office_code = match get("OFFICE_CODE") {
            Some(code) => code.trim().to_string(),
            None => office_code_from_url(&forecast_url).ok_or_else(|| {
                AppError::Config(format!(
                    "OFFICE_CODE is not set and FORECAST_URL '{}' does not end in <code>.json",
                    forecast_url
                ))
            })?,
        };

        Ok(Self {
            forecast_url,
            office_code,
            region_name: get_or("REGION_NAME", "滋賀県"),
            area_index: parse_var("TARGET_AREA_INDEX", get("TARGET_AREA_INDEX"), 1)?,
            forecast_timeout: Duration::from_secs(parse_var(
                "FORECAST_TIMEOUT_SECS",
                get("FORECAST_TIMEOUT_SECS"),
                10,
            )?),
            observation_url: get_or("OBSERVATION_URL", DEFAULT_OBSERVATION_URL),
            station_name: get_or("OBSERVATION_STATION", "彦根"),
            observation_enabled: parse_var(
                "OBSERVATION_ENABLED",
                get("OBSERVATION_ENABLED"),
                true,
            )?,
            observation_timeout: Duration::from_secs(parse_var(
                "OBSERVATION_TIMEOUT_SECS",
                get("OBSERVATION_TIMEOUT_SECS"),
                10,
            )?),
            comparison_cutoff_hour,
            hour_override,
            timezone,
            webhook_url: get("DISCORD_WEBHOOK_URL"),
            webhook_username: get_or("DISCORD_USERNAME", "天気予報Bot"),
            notification_timeout: Duration::from_secs(parse_var(
                "NOTIFICATION_TIMEOUT_SECS",
                get("NOTIFICATION_TIMEOUT_SECS"),
                10,
            )?),
            user_agent: get_or(
                "HTTP_USER_AGENT",
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            ),
        })
    }
}

fn parse_var<T>(key: &str, value: Option<String>, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} '{}' is invalid: {}", key, v, e))),
        None => Ok(default),
    }
}

/// `.../forecast/250000.json` → `250000`.
fn office_code_from_url(url: &str) -> Option<String> {
    let file = url.split(['?', '#']).next()?.rsplit('/').next()?;
    let code = file.strip_suffix(".json")?;
    (!code.is_empty() && code.chars().all(|c| c.is_ascii_digit())).then(|| code.to_string())
}

fn parse_hour(key: &str, value: &str) -> Result<u32, AppError> {
    let hour: u32 = parse_var(key, Some(value.to_string()), 0)?;
    if hour > 23 {
        return Err(AppError::Config(format!("{} must be 0-23, got {}", key, hour)));
    }
    Ok(hour)
}

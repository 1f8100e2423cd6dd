//! JMA (気象庁) forecast client.
//!
//! The office forecast document (`/bosai/forecast/data/forecast/{office}.json`)
//! is an array of editions: the short-term forecast first, the weekly one
//! second. Only the first edition is consumed. Within it, series are
//! addressed by position:
//!
//! - 0: `weatherCodes`, one per day
//! - 1: `pops`, one per six-hour bucket
//! - 2: `temps`, min/max slots per day (string encoded)

use serde::Deserialize;
use std::time::Duration;

use crate::errors::AppError;

pub const WEATHER_SERIES: usize = 0;
pub const PRECIPITATION_SERIES: usize = 1;
pub const TEMPERATURE_SERIES: usize = 2;

/// Client for the JMA forecast JSON endpoint.
#[derive(Debug, Clone)]
pub struct JmaClient {
    client: reqwest::Client,
    url: String,
}

// --- JMA JSON response types ---

/// One forecast publication.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edition {
    pub publishing_office: String,
    pub report_datetime: String,
    pub time_series: Vec<SeriesBlock>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesBlock {
    pub time_defines: Vec<String>,
    pub areas: Vec<AreaSeries>,
}

/// Per-area values of a series. Which of the value arrays is present
/// depends on the series.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSeries {
    pub area: Area,
    pub weather_codes: Option<Vec<String>>,
    pub pops: Option<Vec<String>>,
    pub temps: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Area {
    pub name: String,
    #[serde(default)]
    pub code: String,
}

impl Edition {
    pub fn series(&self, index: usize) -> Result<&SeriesBlock, AppError> {
        self.time_series.get(index).ok_or_else(|| {
            AppError::DataStructure(format!(
                "timeSeries[{}] missing ({} series present)",
                index,
                self.time_series.len()
            ))
        })
    }
}

impl SeriesBlock {
    pub fn area(&self, index: usize) -> Result<&AreaSeries, AppError> {
        self.areas.get(index).ok_or_else(|| {
            AppError::DataStructure(format!(
                "areas[{}] missing ({} areas present)",
                index,
                self.areas.len()
            ))
        })
    }
}

/// Fetch a value array by key name, failing on schema drift.
///
/// Every per-area array carries exactly one value per `timeDefines` entry.
pub(crate) fn require_values<'a>(
    values: &'a Option<Vec<String>>,
    key: &str,
    area: &Area,
    time_defines: usize,
) -> Result<&'a [String], AppError> {
    let values = values.as_deref().ok_or_else(|| {
        AppError::DataStructure(format!("'{}' missing for area {}", key, area.name))
    })?;
    if values.len() != time_defines {
        return Err(AppError::DataStructure(format!(
            "'{}' has {} values for {} timeDefines (area {})",
            key,
            values.len(),
            time_defines,
            area.name
        )));
    }
    Ok(values)
}

/// Decode a forecast document and return its first edition.
///
/// Malformed JSON is a format problem; valid JSON of the wrong shape is a
/// structure problem.
pub fn parse_first_edition(body: &str) -> Result<Edition, AppError> {
    let doc: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| AppError::DataFormat(format!("forecast JSON parse error: {}", e)))?;

    let first = doc
        .as_array()
        .ok_or_else(|| AppError::DataStructure("forecast document is not an array".to_string()))?
        .first()
        .ok_or_else(|| AppError::DataStructure("forecast document has no editions".to_string()))?;

    serde_json::from_value(first.clone())
        .map_err(|e| AppError::DataStructure(format!("forecast edition structure error: {}", e)))
}

impl JmaClient {
    pub fn new(url: &str, timeout: Duration, user_agent: &str) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Fetch the forecast document and return its first edition.
    pub async fn fetch_forecast(&self) -> Result<Edition, AppError> {
        tracing::info!("Fetching forecast from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::Transport(format!(
                "forecast source returned HTTP {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let edition = parse_first_edition(&body)?;

        tracing::info!(
            "Forecast edition from {} reported at {}",
            edition.publishing_office,
            edition.report_datetime
        );
        Ok(edition)
    }
}

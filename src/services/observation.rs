//! Today's observed temperature extremes for a reference station.
//!
//! The source is an HTML table of per-station daily summaries. A station row
//! starts with a cell holding the station name and is followed by five
//! positionally fixed cells:
//!
//! | offset | field |
//! |---|---|
//! | 0 | max temperature |
//! | 1 | time of max |
//! | 2 | min temperature |
//! | 3 | time of min |
//! | 4 | mean temperature |
//!
//! Only offsets 0 and 2 are used. The comparison is an enhancement, so every
//! failure here (network, row not found, non-numeric cell) collapses to
//! `None` instead of an error.

use regex::Regex;
use rust_decimal::Decimal;
use std::time::Duration;

use crate::errors::AppError;
use crate::helpers::parse_decimal;

const FIELDS_PER_ROW: usize = 5;
const MAX_TEMP_FIELD: usize = 0;
const MIN_TEMP_FIELD: usize = 2;

/// Measured extremes for the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActualObservation {
    pub max_temp: Decimal,
    pub min_temp: Decimal,
}

/// Anything able to supply today's observation for a station.
pub trait ObservationSource {
    /// `None` means unavailable, for whatever reason.
    async fn fetch_actual(&self, station: &str) -> Option<ActualObservation>;
}

/// Scrapes the observation table over HTTP.
#[derive(Debug, Clone)]
pub struct ObservationClient {
    client: reqwest::Client,
    url: String,
}

impl ObservationClient {
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

    async fn fetch_page(&self) -> Result<String, AppError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::Transport(format!(
                "observation source returned HTTP {}",
                response.status()
            )));
        }
        Ok(response.text().await?)
    }
}

impl ObservationSource for ObservationClient {
    async fn fetch_actual(&self, station: &str) -> Option<ActualObservation> {
        tracing::info!("Fetching today's observation for {} from {}", station, self.url);

        let html = match self.fetch_page().await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Observation unavailable for {}: {}", station, e);
                return None;
            }
        };

        match parse_station_row(&html, station) {
            Ok(observation) => {
                tracing::info!(
                    "Observed today at {}: max {}℃, min {}℃",
                    station,
                    observation.max_temp,
                    observation.min_temp
                );
                Some(observation)
            }
            Err(e) => {
                tracing::warn!("Observation unavailable for {}: {}", station, e);
                None
            }
        }
    }
}

/// Build the row pattern for a station: the name cell plus five value cells.
fn station_row_pattern(station: &str) -> Result<Regex, AppError> {
    let cell = r"\s*<td[^>]*>\s*([^<]*?)\s*</td>";
    let pattern = format!(
        r"(?s)<td[^>]*>\s*{}\s*</td>{}",
        regex::escape(station),
        cell.repeat(FIELDS_PER_ROW)
    );
    Regex::new(&pattern).map_err(|e| AppError::DataFormat(format!("bad station pattern: {}", e)))
}

/// Strip JMA quality markers (`)` quasi-normal, `]` incomplete, `*` remark).
fn clean_value(raw: &str) -> &str {
    raw.trim().trim_end_matches([')', ']', '*']).trim()
}

/// Extract today's max/min for `station` from the summary table.
pub fn parse_station_row(html: &str, station: &str) -> Result<ActualObservation, AppError> {
    let re = station_row_pattern(station)?;
    let caps = re
        .captures(html)
        .ok_or_else(|| AppError::DataStructure(format!("no row for station {}", station)))?;

    let field = |offset: usize| {
        caps.get(offset + 1)
            .map(|m| clean_value(m.as_str()))
            .unwrap_or_default()
    };

    Ok(ActualObservation {
        max_temp: parse_decimal(field(MAX_TEMP_FIELD), "observed max temperature")?,
        min_temp: parse_decimal(field(MIN_TEMP_FIELD), "observed min temperature")?,
    })
}

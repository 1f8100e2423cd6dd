//! Forecast extraction for a target date.
//!
//! Three extractors share the date alignment in `timeseries` but differ in
//! how many samples they expect per day and how the values are decoded.
//! Each returns the area name of the series it read, since the temperature
//! series is keyed by station rather than by forecast area.

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use rust_decimal::Decimal;

use crate::errors::AppError;
use crate::helpers::parse_decimal;
use crate::services::jma::{
    require_values, Edition, SeriesBlock, PRECIPITATION_SERIES, TEMPERATURE_SERIES,
    WEATHER_SERIES,
};
use crate::services::timeseries::{locate_all, locate_first, parse_time_defines};
use crate::services::weather_codes;

/// Weather condition for the target date.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherExtract {
    pub area_name: String,
    pub code: String,
    pub description: String,
}

/// Precipitation probabilities for the target date, one per sub-day bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationExtract {
    pub area_name: String,
    pub percentages: Vec<u8>,
}

/// Temperature range over the target date's samples.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureExtract {
    pub min: Decimal,
    pub max: Decimal,
    pub area_name: String,
}

/// Normalized forecast for one target date, built once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRecord {
    pub target_date: NaiveDate,
    pub area_name: String,
    pub weather_code: String,
    pub weather_description: String,
    pub weather_emoji: &'static str,
    /// Conventionally 00-06, 06-12, 12-18, 18-24; fewer when data is late.
    pub precipitation: Vec<u8>,
    pub min_temp: Decimal,
    pub max_temp: Decimal,
    /// Station the temperature series belongs to.
    pub temperature_area_name: String,
    pub publishing_office: String,
    pub report_datetime: DateTime<FixedOffset>,
}

/// Value at `index`; array lengths are checked against `timeDefines` by `require_values`.
fn value_at<'a>(values: &'a [String], index: usize, key: &str) -> Result<&'a str, AppError> {
    values.get(index).map(String::as_str).ok_or_else(|| {
        AppError::DataStructure(format!(
            "'{}' has {} values, index {} requested",
            key,
            values.len(),
            index
        ))
    })
}

/// Weather code for `date` (single-match: one sample per day).
pub fn extract_weather(
    series: &SeriesBlock,
    area_index: usize,
    date: NaiveDate,
) -> Result<WeatherExtract, AppError> {
    let area = series.area(area_index)?;
    let timestamps = parse_time_defines(&series.time_defines)?;
    let codes = require_values(
        &area.weather_codes,
        "weatherCodes",
        &area.area,
        timestamps.len(),
    )?;

    let index = locate_first(&timestamps, date)?;
    tracing::debug!(area = %area.area.name, code = %area.area.code, index, "weather index for {}", date);

    let code = value_at(codes, index, "weatherCodes")?.to_string();
    let description = weather_codes::describe(&code);

    Ok(WeatherExtract {
        area_name: area.area.name.clone(),
        code,
        description,
    })
}

/// Precipitation probabilities for `date` in published bucket order.
pub fn extract_precipitation(
    series: &SeriesBlock,
    area_index: usize,
    date: NaiveDate,
) -> Result<PrecipitationExtract, AppError> {
    let area = series.area(area_index)?;
    let timestamps = parse_time_defines(&series.time_defines)?;
    let pops = require_values(&area.pops, "pops", &area.area, timestamps.len())?;

    let indices = locate_all(&timestamps, date)?;
    tracing::debug!(area = %area.area.name, ?indices, "precipitation indices for {}", date);

    let percentages = indices
        .iter()
        .map(|&i| {
            let raw = value_at(pops, i, "pops")?.trim();
            raw.parse::<u8>()
                .ok()
                .filter(|p| *p <= 100)
                .ok_or_else(|| {
                    AppError::DataFormat(format!("precipitation probability '{}' is invalid", raw))
                })
        })
        .collect::<Result<Vec<u8>, AppError>>()?;

    tracing::debug!(?percentages, "precipitation for {}", date);

    Ok(PrecipitationExtract {
        area_name: area.area.name.clone(),
        percentages,
    })
}

/// Min/max temperature over the samples of `date` only.
pub fn extract_temperature(
    series: &SeriesBlock,
    area_index: usize,
    date: NaiveDate,
) -> Result<TemperatureExtract, AppError> {
    let area = series.area(area_index)?;
    let timestamps = parse_time_defines(&series.time_defines)?;
    let temps = require_values(&area.temps, "temps", &area.area, timestamps.len())?;

    let indices = locate_all(&timestamps, date)?;
    tracing::debug!(area = %area.area.name, ?indices, "temperature indices for {}", date);

    let values = indices
        .iter()
        .map(|&i| parse_decimal(value_at(temps, i, "temps")?, "temperature"))
        .collect::<Result<Vec<Decimal>, AppError>>()?;

    // locate_all never returns an empty set
    let (min, max) = match (values.iter().min(), values.iter().max()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => return Err(AppError::DateNotFound(date)),
    };

    tracing::debug!("temperature for {}: min {}℃, max {}℃", date, min, max);

    Ok(TemperatureExtract {
        min,
        max,
        area_name: area.area.name.clone(),
    })
}

/// Build the forecast record for `date` from the first edition.
pub fn extract_forecast(
    edition: &Edition,
    area_index: usize,
    date: NaiveDate,
) -> Result<ForecastRecord, AppError> {
    let report_datetime = DateTime::parse_from_rfc3339(&edition.report_datetime).map_err(|e| {
        AppError::DataFormat(format!(
            "invalid reportDatetime '{}': {}",
            edition.report_datetime, e
        ))
    })?;

    let weather = extract_weather(edition.series(WEATHER_SERIES)?, area_index, date)?;
    tracing::info!("Weather for {} ({}): {}", date, weather.area_name, weather.description);

    let precipitation =
        extract_precipitation(edition.series(PRECIPITATION_SERIES)?, area_index, date)?;
    tracing::info!(
        "Precipitation probability for {} ({}): {:?}",
        date,
        precipitation.area_name,
        precipitation.percentages
    );

    let temperature = extract_temperature(edition.series(TEMPERATURE_SERIES)?, area_index, date)?;
    tracing::info!(
        "Temperature for {} ({}): {}..{}℃",
        date,
        temperature.area_name,
        temperature.min,
        temperature.max
    );

    Ok(ForecastRecord {
        target_date: date,
        weather_emoji: weather_codes::emoji(&weather.code),
        area_name: weather.area_name,
        weather_code: weather.code,
        weather_description: weather.description,
        precipitation: precipitation.percentages,
        min_temp: temperature.min,
        max_temp: temperature.max,
        temperature_area_name: temperature.area_name,
        publishing_office: edition.publishing_office.clone(),
        report_datetime,
    })
}

/// `2026年10月18日 17時発表`
pub fn format_report_time(report_datetime: &DateTime<FixedOffset>) -> String {
    format!(
        "{}年{}月{}日 {}時発表",
        report_datetime.format("%Y"),
        report_datetime.format("%-m"),
        report_datetime.format("%-d"),
        report_datetime.hour()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::jma::{fixtures, parse_first_edition};
    use std::str::FromStr;

    fn edition() -> Edition {
        parse_first_edition(&fixtures::shiga_forecast().to_string()).unwrap()
    }

    fn tomorrow() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn series_from(value: serde_json::Value) -> SeriesBlock {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extract_weather() {
        let e = edition();
        let weather = extract_weather(e.series(WEATHER_SERIES).unwrap(), 1, tomorrow()).unwrap();
        assert_eq!(weather.area_name, "北部");
        assert_eq!(weather.code, "100");
        assert_eq!(weather.description, "晴れ");
    }

    #[test]
    fn test_extract_weather_unknown_code() {
        let series = series_from(serde_json::json!({
            "timeDefines": ["2026-10-19T00:00:00+09:00"],
            "areas": [{ "area": { "name": "北部" }, "weatherCodes": ["999"] }]
        }));
        let weather = extract_weather(&series, 0, tomorrow()).unwrap();
        assert_eq!(weather.code, "999");
        assert!(weather.description.contains("999"));
    }

    #[test]
    fn test_extract_weather_date_not_found() {
        let e = edition();
        let later = NaiveDate::from_ymd_opt(2026, 10, 25).unwrap();
        let err = extract_weather(e.series(WEATHER_SERIES).unwrap(), 1, later).unwrap_err();
        assert!(matches!(err, AppError::DateNotFound(d) if d == later));
    }

    #[test]
    fn test_extract_weather_missing_area() {
        let e = edition();
        let err = extract_weather(e.series(WEATHER_SERIES).unwrap(), 5, tomorrow()).unwrap_err();
        assert!(matches!(err, AppError::DataStructure(_)));
    }

    #[test]
    fn test_extract_weather_wrong_series_is_structure_error() {
        // pops series has no weatherCodes key
        let e = edition();
        let err =
            extract_weather(e.series(PRECIPITATION_SERIES).unwrap(), 1, tomorrow()).unwrap_err();
        assert!(matches!(err, AppError::DataStructure(ref m) if m.contains("weatherCodes")));
    }

    #[test]
    fn test_extract_weather_short_value_array() {
        let series = series_from(serde_json::json!({
            "timeDefines": ["2026-10-18T00:00:00+09:00", "2026-10-19T00:00:00+09:00"],
            "areas": [{ "area": { "name": "北部" }, "weatherCodes": ["100"] }]
        }));
        let err = extract_weather(&series, 0, tomorrow()).unwrap_err();
        assert!(matches!(err, AppError::DataStructure(_)));
    }

    #[test]
    fn test_extract_weather_short_array_with_index_in_range() {
        // Index 1 exists but would read a value shifted from the wrong day
        let series = series_from(serde_json::json!({
            "timeDefines": [
                "2026-10-18T00:00:00+09:00",
                "2026-10-19T00:00:00+09:00",
                "2026-10-20T00:00:00+09:00"
            ],
            "areas": [{ "area": { "name": "北部" }, "weatherCodes": ["100", "200"] }]
        }));
        let err = extract_weather(&series, 0, tomorrow()).unwrap_err();
        assert!(
            matches!(err, AppError::DataStructure(ref m) if m.contains("2 values for 3 timeDefines"))
        );
    }

    #[test]
    fn test_extract_temperature_long_value_array() {
        let series = series_from(serde_json::json!({
            "timeDefines": ["2026-10-19T00:00:00+09:00", "2026-10-19T09:00:00+09:00"],
            "areas": [{ "area": { "name": "彦根" }, "temps": ["11", "21", "35"] }]
        }));
        let err = extract_temperature(&series, 0, tomorrow()).unwrap_err();
        assert!(
            matches!(err, AppError::DataStructure(ref m) if m.contains("3 values for 2 timeDefines"))
        );
    }

    #[test]
    fn test_extract_precipitation_length_mismatch() {
        let series = series_from(serde_json::json!({
            "timeDefines": ["2026-10-19T00:00:00+09:00", "2026-10-19T06:00:00+09:00"],
            "areas": [{ "area": { "name": "北部" }, "pops": ["10"] }]
        }));
        let err = extract_precipitation(&series, 0, tomorrow()).unwrap_err();
        assert!(matches!(err, AppError::DataStructure(ref m) if m.contains("'pops'")));
    }

    #[test]
    fn test_extract_precipitation_four_buckets() {
        let e = edition();
        let pops =
            extract_precipitation(e.series(PRECIPITATION_SERIES).unwrap(), 1, tomorrow()).unwrap();
        assert_eq!(pops.area_name, "北部");
        assert_eq!(pops.percentages, vec![10, 0, 20, 30]);
    }

    #[test]
    fn test_extract_precipitation_partial_day() {
        let series = series_from(serde_json::json!({
            "timeDefines": [
                "2026-10-18T12:00:00+09:00",
                "2026-10-18T18:00:00+09:00",
                "2026-10-19T00:00:00+09:00",
                "2026-10-19T06:00:00+09:00"
            ],
            "areas": [{ "area": { "name": "北部" }, "pops": ["50", "40", "30", "20"] }]
        }));
        let pops = extract_precipitation(&series, 0, tomorrow()).unwrap();
        assert_eq!(pops.percentages, vec![30, 20]);
    }

    #[test]
    fn test_extract_precipitation_non_numeric() {
        let series = series_from(serde_json::json!({
            "timeDefines": ["2026-10-19T00:00:00+09:00"],
            "areas": [{ "area": { "name": "北部" }, "pops": ["--"] }]
        }));
        let err = extract_precipitation(&series, 0, tomorrow()).unwrap_err();
        assert!(matches!(err, AppError::DataFormat(_)));
    }

    #[test]
    fn test_extract_temperature_over_matched_subset() {
        let series = series_from(serde_json::json!({
            "timeDefines": [
                "2026-10-18T09:00:00+09:00",
                "2026-10-19T00:00:00+09:00",
                "2026-10-19T09:00:00+09:00",
                "2026-10-20T00:00:00+09:00"
            ],
            "areas": [{ "area": { "name": "彦根" }, "temps": ["30", "11", "21", "-2"] }]
        }));
        let temps = extract_temperature(&series, 0, tomorrow()).unwrap();
        assert_eq!(temps.min, dec("11"));
        assert_eq!(temps.max, dec("21"));
        assert_eq!(temps.area_name, "彦根");
    }

    #[test]
    fn test_extract_temperature_decimal_and_negative() {
        let series = series_from(serde_json::json!({
            "timeDefines": ["2026-10-19T00:00:00+09:00", "2026-10-19T09:00:00+09:00"],
            "areas": [{ "area": { "name": "彦根" }, "temps": ["-1.5", "4.5"] }]
        }));
        let temps = extract_temperature(&series, 0, tomorrow()).unwrap();
        assert_eq!(temps.min, dec("-1.5"));
        assert_eq!(temps.max, dec("4.5"));
    }

    #[test]
    fn test_extract_temperature_single_sample() {
        let series = series_from(serde_json::json!({
            "timeDefines": ["2026-10-19T09:00:00+09:00"],
            "areas": [{ "area": { "name": "彦根" }, "temps": ["18"] }]
        }));
        let temps = extract_temperature(&series, 0, tomorrow()).unwrap();
        assert_eq!(temps.min, temps.max);
    }

    #[test]
    fn test_extract_temperature_non_numeric_is_format_error() {
        let series = series_from(serde_json::json!({
            "timeDefines": ["2026-10-19T00:00:00+09:00"],
            "areas": [{ "area": { "name": "彦根" }, "temps": ["N/A"] }]
        }));
        let err = extract_temperature(&series, 0, tomorrow()).unwrap_err();
        assert!(matches!(err, AppError::DataFormat(_)));
    }

    #[test]
    fn test_extract_forecast_record() {
        let record = extract_forecast(&edition(), 1, tomorrow()).unwrap();

        assert_eq!(record.target_date, tomorrow());
        assert_eq!(record.area_name, "北部");
        assert_eq!(record.weather_code, "100");
        assert_eq!(record.weather_description, "晴れ");
        assert!(!record.weather_emoji.is_empty());
        assert_eq!(record.precipitation, vec![10, 0, 20, 30]);
        assert_eq!(record.min_temp, dec("11"));
        assert_eq!(record.max_temp, dec("21"));
        assert_eq!(record.temperature_area_name, "彦根");
        assert_eq!(record.publishing_office, "彦根地方気象台");
    }

    #[test]
    fn test_extract_forecast_other_area() {
        let record = extract_forecast(&edition(), 0, tomorrow()).unwrap();
        assert_eq!(record.area_name, "南部");
        assert_eq!(record.weather_code, "101");
        assert_eq!(record.temperature_area_name, "大津");
    }

    #[test]
    fn test_extract_forecast_missing_series() {
        let mut e = edition();
        e.time_series.truncate(2);
        let err = extract_forecast(&e, 1, tomorrow()).unwrap_err();
        assert!(matches!(err, AppError::DataStructure(_)));
    }

    #[test]
    fn test_extract_forecast_date_not_published() {
        let e = edition();
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let err = extract_forecast(&e, 1, today).unwrap_err();
        assert!(matches!(err, AppError::DateNotFound(_)));
    }

    #[test]
    fn test_format_report_time() {
        let dt = DateTime::parse_from_rfc3339("2026-01-05T05:00:00+09:00").unwrap();
        assert_eq!(format_report_time(&dt), "2026年1月5日 5時発表");

        let dt = DateTime::parse_from_rfc3339("2026-10-18T17:00:00+09:00").unwrap();
        assert_eq!(format_report_time(&dt), "2026年10月18日 17時発表");
    }
}

//! Report rendering for the console and the notification channel.
//!
//! Pure formatting: no I/O, no clock. The notification text is a compact
//! subset of the console report and must never index past the precipitation
//! buckets that are actually present.

use chrono::{Datelike, NaiveDate};

use crate::services::comparison::ComparisonResult;
use crate::services::forecast::{format_report_time, ForecastRecord};
use crate::services::observation::ActualObservation;

const JMA_FORECAST_PAGE: &str = "https://www.jma.go.jp/bosai/forecast/";
const JMA_AMEDAS_PAGE: &str = "https://www.jma.go.jp/bosai/amedas/";

/// Icon used when a weather code has none.
const FALLBACK_ICON: &str = "❔";

/// Buckets shown in the notification: 06-12 and 12-18.
const MORNING_BUCKET: usize = 1;
const AFTERNOON_BUCKET: usize = 2;

const WEEKDAYS: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];

/// Run-level values the formatter needs besides the extracted data.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub region_name: String,
    pub station_name: String,
    pub observation_enabled: bool,
    pub cutoff_hour: u32,
    /// JMA office the reference links point at.
    pub office_code: String,
}

/// Final rendering, emitted to two independent sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub console: String,
    pub notification: String,
}

pub fn format_report(
    record: &ForecastRecord,
    actual: Option<&ActualObservation>,
    comparison: &ComparisonResult,
    gate: bool,
    ctx: &ReportContext,
) -> Report {
    Report {
        console: console_text(record, actual, comparison, gate, ctx),
        notification: notification_text(record, actual, comparison, gate, ctx),
    }
}

fn icon(record: &ForecastRecord) -> &'static str {
    if record.weather_emoji.is_empty() {
        FALLBACK_ICON
    } else {
        record.weather_emoji
    }
}

/// `10月19日(月)`
fn date_label(date: NaiveDate) -> String {
    format!(
        "{}月{}日({})",
        date.month(),
        date.day(),
        WEEKDAYS[date.weekday().num_days_from_monday() as usize]
    )
}

fn console_text(
    record: &ForecastRecord,
    actual: Option<&ActualObservation>,
    comparison: &ComparisonResult,
    gate: bool,
    ctx: &ReportContext,
) -> String {
    let rain = record
        .precipitation
        .iter()
        .map(|p| format!("{}%", p))
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        format!("--- {}の天気予報 ({}) ---", ctx.region_name, record.area_name),
        format!("発表: {}", record.publishing_office),
        format!("発表時刻: {}", format_report_time(&record.report_datetime)),
        format!("明日の天気: {} {}", icon(record), record.weather_description),
        format!("明日の降水確率: {}", rain),
        format!("明日の最低気温: {}℃", record.min_temp),
        format!("明日の最高気温: {}℃", record.max_temp),
        format!("気温データ提供: {}", record.temperature_area_name),
    ];

    let observed = if !ctx.observation_enabled {
        "無効".to_string()
    } else if !gate {
        format!("{}時以降に取得します", ctx.cutoff_hour)
    } else {
        match actual {
            Some(obs) => format!("最高 {}℃ / 最低 {}℃", obs.max_temp, obs.min_temp),
            None => "データなし".to_string(),
        }
    };
    lines.push(format!("今日の実測値 ({}): {}", ctx.station_name, observed));

    if let Some((max_delta, min_delta)) = comparison.rendered() {
        lines.push(format!(
            "気温差 (明日 - 今日): 最高 {} / 最低 {}",
            max_delta, min_delta
        ));
    }

    lines.join("\n")
}

fn precipitation_line(percentages: &[u8]) -> String {
    match (
        percentages.get(MORNING_BUCKET),
        percentages.get(AFTERNOON_BUCKET),
    ) {
        (Some(morning), Some(afternoon)) => {
            format!("☔ 降水確率: 午前 {}% / 午後 {}%", morning, afternoon)
        }
        _ => {
            let available = percentages
                .iter()
                .map(|p| format!("{}%", p))
                .collect::<Vec<_>>()
                .join(", ");
            if available.is_empty() {
                "☔ 降水確率: ⚠️ 一部データなし".to_string()
            } else {
                format!("☔ 降水確率: {} ⚠️ 一部データなし", available)
            }
        }
    }
}

fn notification_text(
    record: &ForecastRecord,
    actual: Option<&ActualObservation>,
    comparison: &ComparisonResult,
    gate: bool,
    ctx: &ReportContext,
) -> String {
    let (max_note, min_note) = match comparison.rendered() {
        Some((max_delta, min_delta)) => (
            format!(" (今日比 {})", max_delta),
            format!(" (今日比 {})", min_delta),
        ),
        None if gate && ctx.observation_enabled && actual.is_none() => (
            " (今日の実測: データなし)".to_string(),
            " (今日の実測: データなし)".to_string(),
        ),
        None => (String::new(), String::new()),
    };

    [
        format!("📅 {}の天気予報", date_label(record.target_date)),
        format!("📍 {} {}", ctx.region_name, record.area_name),
        format!("{} 天気: {}", icon(record), record.weather_description),
        precipitation_line(&record.precipitation),
        format!("🌡️ 最高気温: {}℃{}", record.max_temp, max_note),
        format!("🌡️ 最低気温: {}℃{}", record.min_temp, min_note),
        format!("🔗 気象庁 天気予報: {}", office_link(JMA_FORECAST_PAGE, &ctx.office_code)),
        format!("🔗 気象庁 アメダス: {}", office_link(JMA_AMEDAS_PAGE, &ctx.office_code)),
    ]
    .join("\n")
}

fn office_link(page: &str, office_code: &str) -> String {
    format!("{}#area_type=offices&area_code={}", page, office_code)
}

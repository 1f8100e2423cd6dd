//! One run, end to end.
//!
//! forecast fetch → extraction → (gated) observation fetch → comparison →
//! formatting. Each step awaits the previous one; nothing runs concurrently.
//! Only the forecast path can abort the run.

use chrono::{DateTime, NaiveDate, Timelike};
use chrono_tz::Tz;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::services::comparison::{compare, comparison_enabled};
use crate::services::discord::DiscordNotifier;
use crate::services::forecast::extract_forecast;
use crate::services::jma::JmaClient;
use crate::services::observation::ObservationSource;
use crate::services::report::{format_report, Report, ReportContext};

/// Outcome of the optional notification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No webhook configured.
    Skipped,
}

/// The date the forecast is for: tomorrow in the report timezone.
pub fn target_date(now: &DateTime<Tz>) -> Result<NaiveDate, AppError> {
    now.date_naive()
        .succ_opt()
        .ok_or_else(|| AppError::Config(format!("no date after {}", now.date_naive())))
}

/// Whether today's observation should be fetched and compared.
pub fn comparison_gate(config: &AppConfig, now: &DateTime<Tz>) -> bool {
    let hour = config.hour_override.unwrap_or_else(|| now.hour());
    config.observation_enabled && comparison_enabled(hour, config.comparison_cutoff_hour)
}

pub async fn build_report<O: ObservationSource>(
    config: &AppConfig,
    forecast_client: &JmaClient,
    observations: &O,
    now: DateTime<Tz>,
) -> Result<Report, AppError> {
    let target = target_date(&now)?;
    tracing::info!("Building forecast report for {}", target);

    let edition = forecast_client.fetch_forecast().await?;
    let record = extract_forecast(&edition, config.area_index, target)?;
    tracing::debug!(
        code = %record.weather_code,
        buckets = record.precipitation.len(),
        "Forecast record for {} built",
        target
    );

    let gate = comparison_gate(config, &now);
    let actual = if gate {
        observations.fetch_actual(&config.station_name).await
    } else {
        tracing::info!(
            "Skipping observation fetch (enabled: {}, cutoff: {}時)",
            config.observation_enabled,
            config.comparison_cutoff_hour
        );
        None
    };

    let comparison = compare(record.max_temp, record.min_temp, actual.as_ref(), gate);

    let ctx = ReportContext {
        region_name: config.region_name.clone(),
        station_name: config.station_name.clone(),
        observation_enabled: config.observation_enabled,
        cutoff_hour: config.comparison_cutoff_hour,
        office_code: config.office_code.clone(),
    };
    Ok(format_report(&record, actual.as_ref(), &comparison, gate, &ctx))
}

/// Send the notification text if a webhook is configured.
pub async fn deliver(config: &AppConfig, report: &Report) -> Result<Delivery, AppError> {
    let Some(url) = config.webhook_url.as_deref() else {
        tracing::warn!("DISCORD_WEBHOOK_URL is not set, notification skipped");
        return Ok(Delivery::Skipped);
    };

    let notifier = DiscordNotifier::new(
        url,
        &config.webhook_username,
        config.notification_timeout,
        &config.user_agent,
    )?;
    notifier.send(&report.notification).await?;
    Ok(Delivery::Sent)
}

// Weather Report v0.1
use chrono::Utc;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod errors;
mod helpers;
mod services;

use config::AppConfig;
use errors::AppError;
use services::jma::JmaClient;
use services::observation::ObservationClient;
use services::pipeline::{self, Delivery};

/// Tomorrow's weather forecast from JMA, compared against today's observed
/// temperatures once the cutoff hour has passed.
#[derive(Debug, Parser)]
#[command(name = "weather-report", version)]
struct Cli {
    /// Send the report to the Discord webhook in DISCORD_WEBHOOK_URL
    #[arg(short, long, visible_alias = "discord")]
    notify: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing; stdout is reserved for the report itself
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Invalid arguments print usage and exit with status 2
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Run aborted: {}", e);
            eprintln!("{}", e.headline());
            eprintln!("詳細: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<(), AppError> {
    let config = AppConfig::from_env()?;

    let forecast_client = JmaClient::new(
        &config.forecast_url,
        config.forecast_timeout,
        &config.user_agent,
    )?;
    let observations = ObservationClient::new(
        &config.observation_url,
        config.observation_timeout,
        &config.user_agent,
    )?;

    let now = Utc::now().with_timezone(&config.timezone);
    let report = pipeline::build_report(&config, &forecast_client, &observations, now).await?;

    println!("{}", report.console);

    if cli.notify {
        // Delivery failures are reported but never change the exit status
        match pipeline::deliver(&config, &report).await {
            Ok(Delivery::Sent) => println!("\n✅ Discordに送信しました"),
            Ok(Delivery::Skipped) => {
                eprintln!("DISCORD_WEBHOOK_URL が未設定のため通知をスキップしました")
            }
            Err(e) => {
                tracing::error!("Notification failed: {}", e);
                eprintln!("{}", e.headline());
                eprintln!("詳細: {}", e);
            }
        }
    }

    Ok(())
}

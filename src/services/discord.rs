//! Discord webhook delivery.
//!
//! Discord answers a successful webhook execution with `204 No Content`;
//! any other reply is a failed delivery. Network failures and timeouts are
//! transport errors like on every other external call.

use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

use crate::errors::AppError;

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
    username: &'a str,
}

#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    client: reqwest::Client,
    webhook_url: String,
    username: String,
}

impl DiscordNotifier {
    pub fn new(
        webhook_url: &str,
        username: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            webhook_url: webhook_url.to_string(),
            username: username.to_string(),
        })
    }

    pub async fn send(&self, content: &str) -> Result<(), AppError> {
        let body = WebhookMessage {
            content,
            username: &self.username,
        };

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&body)
            .send()
            .await?;

        if response.status() != StatusCode::NO_CONTENT {
            return Err(AppError::NotificationDelivery(format!(
                "webhook returned HTTP {}",
                response.status()
            )));
        }

        tracing::info!("Notification delivered as {}", self.username);
        Ok(())
    }
}

use std::time::Duration;

use anyhow::{bail, Context};
use landing_extern_contracts::discord::{DiscordApiService, DiscordWebhookPayload};
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct DiscordApiServiceImpl {
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct DiscordApiServiceConfig {
    /// Upper bound for a single webhook request, including the response.
    pub timeout: Duration,
}

impl DiscordApiServiceImpl {
    pub fn new(config: &DiscordApiServiceConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: HttpClient::new(config.timeout)?,
        })
    }
}

impl DiscordApiService for DiscordApiServiceImpl {
    async fn execute_webhook(
        &self,
        url: &Url,
        payload: &DiscordWebhookPayload,
    ) -> anyhow::Result<()> {
        let response = self
            .client
            .post(url.clone())
            .json(payload)
            .send()
            .await
            .context("Discord webhook request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Discord webhook failed with status {}", status.as_u16());
        }

        debug!(%status, "Discord webhook delivered");
        Ok(())
    }
}

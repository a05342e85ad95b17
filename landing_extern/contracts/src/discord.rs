use std::future::Future;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use url::Url;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait DiscordApiService: Send + Sync + 'static {
    /// Posts `payload` to the Discord webhook at `url`.
    ///
    /// Fails if the request could not be sent or the webhook did not respond
    /// with a success status.
    fn execute_webhook(
        &self,
        url: &Url,
        payload: &DiscordWebhookPayload,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Body of a Discord webhook execution.
///
/// See <https://discord.com/developers/docs/resources/webhook#execute-webhook>
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscordWebhookPayload {
    pub content: Option<String>,
    pub embeds: Vec<DiscordEmbed>,
    pub attachments: Vec<DiscordAttachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscordEmbed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<DiscordEmbedField>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscordEmbedField {
    pub name: String,
    pub value: String,
}

/// Reference to a file uploaded together with the webhook execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscordAttachment {
    pub id: u64,
    pub filename: String,
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(feature = "mock")]
impl MockDiscordApiService {
    pub fn with_execute_webhook(
        mut self,
        url: Url,
        payload: DiscordWebhookPayload,
        success: bool,
    ) -> Self {
        self.expect_execute_webhook()
            .once()
            .with(
                mockall::predicate::eq(url),
                mockall::predicate::eq(payload),
            )
            .return_once(move |_, _| {
                let result = if success {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("Discord webhook failed with status 500"))
                };
                Box::pin(std::future::ready(result))
            });
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn serialize_payload() {
        let payload = DiscordWebhookPayload {
            content: None,
            embeds: vec![DiscordEmbed {
                title: "Title".into(),
                description: "Line 1\nLine 2".into(),
                color: 8449920,
                fields: vec![DiscordEmbedField {
                    name: "Name".into(),
                    value: "Value".into(),
                }],
                timestamp: Utc.with_ymd_and_hms(2024, 7, 13, 9, 41, 7).unwrap(),
            }],
            attachments: Vec::new(),
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "content": null,
                "embeds": [{
                    "title": "Title",
                    "description": "Line 1\nLine 2",
                    "color": 8449920,
                    "fields": [{"name": "Name", "value": "Value"}],
                    "timestamp": "2024-07-13T09:41:07.000Z",
                }],
                "attachments": [],
            })
        );
    }
}

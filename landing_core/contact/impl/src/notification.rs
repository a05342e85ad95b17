use chrono::{DateTime, Utc};
use landing_core_contact_contracts::notification::ContactNotificationService;
use landing_extern_contracts::discord::{DiscordEmbed, DiscordEmbedField, DiscordWebhookPayload};
use landing_models::contact::{ContactSubmission, SubmissionMetadata};
use landing_shared_contracts::time::{iso_timestamp, TimeService};
use tracing::{info, warn};

use crate::webhook::WebhookQueue;

const EMBED_TITLE: &str = "Nový sumbission!";
const EMBED_COLOR: u32 = 0x80_EF_80;
const MISSING_METADATA: &str = "N/A";
const BANNER_WIDTH: usize = 50;

#[derive(Debug, Clone)]
pub struct ContactNotificationServiceImpl<Time> {
    time: Time,
    /// `None` if no webhook url is configured.
    webhook: Option<WebhookQueue>,
}

impl<Time> ContactNotificationServiceImpl<Time> {
    pub fn new(time: Time, webhook: Option<WebhookQueue>) -> Self {
        Self { time, webhook }
    }
}

impl<Time> ContactNotificationService for ContactNotificationServiceImpl<Time>
where
    Time: TimeService,
{
    fn notify(&self, submission: &ContactSubmission, metadata: &SubmissionMetadata) {
        let now = self.time.now();

        info!("{}", render_banner(now, submission, metadata));

        let Some(webhook) = &self.webhook else {
            warn!("Discord webhook URL not configured");
            return;
        };

        webhook.enqueue(build_payload(now, submission, metadata));
    }
}

fn render_banner(
    time: DateTime<Utc>,
    submission: &ContactSubmission,
    metadata: &SubmissionMetadata,
) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    let description = submission.description.split('\n').collect::<Vec<_>>().join("\n   ");

    let mut banner = format!(
        "\n{rule}\n\
         📧 NEW CONTACT FORM SUBMISSION\n\
         {rule}\n\
         ⏰ Timestamp:   {timestamp}\n\
         👤 Name:        {name}\n\
         📨 Email:       {email}\n\
         🏢 Company:     {company}\n\
         📝 Description:\n   {description}\n",
        timestamp = iso_timestamp(time),
        name = submission.name,
        email = submission.email,
        company = submission.company,
    );

    if let Some(user_agent) = present(&metadata.user_agent) {
        banner.push_str(&format!("🖥️  User Agent:  {user_agent}\n"));
    }
    if let Some(client_ip) = present(&metadata.client_ip) {
        banner.push_str(&format!("🌐 Client IP:   {client_ip}\n"));
    }

    banner.push_str(&rule);
    banner.push('\n');
    banner
}

fn build_payload(
    time: DateTime<Utc>,
    submission: &ContactSubmission,
    metadata: &SubmissionMetadata,
) -> DiscordWebhookPayload {
    let field = |name: &str, value: &str| DiscordEmbedField {
        name: name.into(),
        value: value.into(),
    };

    DiscordWebhookPayload {
        content: None,
        embeds: vec![DiscordEmbed {
            title: EMBED_TITLE.into(),
            description: submission.description.clone(),
            color: EMBED_COLOR,
            fields: vec![
                field("👤 Jméno", &submission.name),
                field("📨 Email", &submission.email),
                field("🏢 Společnost", &submission.company),
                field(
                    "🖥️  User Agent",
                    present(&metadata.user_agent).unwrap_or(MISSING_METADATA),
                ),
                field(
                    "🌐 Client IP",
                    present(&metadata.client_ip).unwrap_or(MISSING_METADATA),
                ),
            ],
            timestamp: time,
        }],
        attachments: Vec::new(),
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

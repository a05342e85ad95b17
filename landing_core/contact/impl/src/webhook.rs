//! Background delivery of webhook notifications
//!
//! Submissions are handed over to a [`WebhookWorker`] through a
//! [`WebhookQueue`], so a slow or failing webhook endpoint never delays or
//! fails the request that caused the notification.

use std::sync::Arc;

use anyhow::anyhow;
use landing_extern_contracts::discord::{DiscordApiService, DiscordWebhookPayload};
use landing_logging::log_error;
use tokio::{
    sync::mpsc,
    task::{JoinHandle, JoinSet},
};
use tracing::debug;
use url::Url;

/// Sending half of the webhook worker's queue.
#[derive(Debug, Clone)]
pub struct WebhookQueue {
    sender: mpsc::UnboundedSender<DiscordWebhookPayload>,
}

impl WebhookQueue {
    /// Queues `payload` for delivery. Never blocks.
    pub fn enqueue(&self, payload: DiscordWebhookPayload) {
        if self.sender.send(payload).is_err() {
            log_error(
                "Failed to queue Discord webhook",
                &anyhow!("webhook worker is not running"),
            );
        }
    }
}

/// Delivers queued payloads to a single webhook url.
///
/// Every payload is sent in its own task as soon as it is dequeued, so a
/// hanging request only holds up its own notification (for at most the
/// client timeout). The worker stops once every [`WebhookQueue`] connected to
/// it has been dropped and all started deliveries have finished.
#[derive(Debug)]
pub struct WebhookWorker<Discord> {
    discord: Arc<Discord>,
    url: Url,
    receiver: mpsc::UnboundedReceiver<DiscordWebhookPayload>,
}

impl<Discord> WebhookWorker<Discord>
where
    Discord: DiscordApiService,
{
    pub fn new(discord: Discord, url: Url) -> (Self, WebhookQueue) {
        let (queue, receiver) = channel();
        let worker = Self {
            discord: discord.into(),
            url,
            receiver,
        };
        (worker, queue)
    }

    /// Runs the worker on the current tokio runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        let mut deliveries = JoinSet::new();

        loop {
            tokio::select! {
                payload = self.receiver.recv() => match payload {
                    Some(payload) => {
                        deliveries.spawn(deliver(
                            Arc::clone(&self.discord),
                            self.url.clone(),
                            payload,
                        ));
                    }
                    None => break,
                },
                Some(result) = deliveries.join_next(), if !deliveries.is_empty() => {
                    finished(result);
                }
            }
        }

        while let Some(result) = deliveries.join_next().await {
            finished(result);
        }
        debug!("Webhook worker stopped");
    }
}

async fn deliver<Discord: DiscordApiService>(
    discord: Arc<Discord>,
    url: Url,
    payload: DiscordWebhookPayload,
) {
    match discord.execute_webhook(&url, &payload).await {
        Ok(()) => debug!("Discord webhook sent"),
        Err(err) => log_error("Failed to send Discord webhook", &err),
    }
}

fn finished(result: Result<(), tokio::task::JoinError>) {
    if let Err(err) = result {
        log_error("Discord webhook delivery task failed", &err.into());
    }
}

pub(crate) fn channel() -> (WebhookQueue, mpsc::UnboundedReceiver<DiscordWebhookPayload>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (WebhookQueue { sender }, receiver)
}

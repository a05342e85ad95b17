use landing_config::Config;
use landing_extern_impl::discord::DiscordApiServiceConfig;
use types::{ContactFeature, ContactNotification, DiscordApi, RestServer, Time, WebhookWorker};

pub mod types;

/// All services of a running instance, wired up from the config.
#[derive(Debug)]
pub struct Environment {
    pub server: RestServer,
    /// Only present if a webhook url is configured. Must be spawned for
    /// submissions to be forwarded.
    pub webhook_worker: Option<WebhookWorker>,
}

impl Environment {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let (webhook_worker, webhook_queue) = match &config.contact.webhook_url {
            Some(url) => {
                let discord = DiscordApi::new(&DiscordApiServiceConfig {
                    timeout: *config.discord.timeout,
                })?;
                let (worker, queue) = WebhookWorker::new(discord, url.clone());
                (Some(worker), Some(queue))
            }
            None => (None, None),
        };

        let notification = ContactNotification::new(Time::default(), webhook_queue);
        let contact = ContactFeature::new(notification);

        Ok(Self {
            server: RestServer::new(contact),
            webhook_worker,
        })
    }
}

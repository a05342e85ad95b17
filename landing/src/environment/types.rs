use landing_core_contact_impl::{
    notification::ContactNotificationServiceImpl, ContactFeatureServiceImpl,
};
use landing_extern_impl::discord::DiscordApiServiceImpl;
use landing_shared_impl::time::TimeServiceImpl;

// API
pub type RestServer = landing_api_rest::RestServer<ContactFeature>;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<ContactNotification>;
pub type ContactNotification = ContactNotificationServiceImpl<Time>;
pub type WebhookWorker = landing_core_contact_impl::webhook::WebhookWorker<DiscordApi>;

// Extern
pub type DiscordApi = DiscordApiServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

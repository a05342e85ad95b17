pub mod client_ip;
pub mod contact_form;
pub mod user_agent;

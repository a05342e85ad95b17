pub mod discord;
mod http;

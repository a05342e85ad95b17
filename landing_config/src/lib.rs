use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files to load instead of the default one.
pub const CONFIG_PATH_ENV: &str = "LANDING_CONFIG";

/// Overrides `contact.webhook_url`.
pub const WEBHOOK_URL_ENV: &str = "DISCORD_WEBHOOK";

/// Loads the config from the files listed in `LANDING_CONFIG` (or the default
/// config file) and applies overrides from the environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var_os(CONFIG_PATH_ENV) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };

    let webhook_url = std::env::var(WEBHOOK_URL_ENV)
        .ok()
        .filter(|url| !url.is_empty());

    build(&paths, &[], webhook_url)
}

/// Loads the config from `paths` and applies the given TOML `overrides` on
/// top. Later sources take precedence over earlier ones.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    build(paths, overrides, None)
}

fn build(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
    webhook_url: Option<String>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    overrides
        .iter()
        .fold(builder, |builder, &content| {
            builder.add_source(File::from_str(content, FileFormat::Toml))
        })
        .set_override_option("contact.webhook_url", webhook_url)?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub log: LogConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    pub discord: DiscordConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    pub development: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactConfig {
    pub webhook_url: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct DiscordConfig {
    pub timeout: Duration,
}

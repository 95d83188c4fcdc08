use std::{fs, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;
use shared::{domain::Category, protocol::CHAT_ENDPOINT_PATH};
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    /// No timeout unless configured.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".into(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file (if present), then the environment.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.server_url {
                    settings.server_url = v;
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = Some(v);
                }
            }
            Err(err) => warn!(path = %path.display(), error = %err, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    settings
}

/// Resolved URLs for the four catalog endpoints and the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    beers: Url,
    whisky: Url,
    vodka: Url,
    rum: Url,
    chat: Url,
}

impl Endpoints {
    /// A base with a path prefix (`http://host/shop`) keeps that prefix.
    pub fn from_base(raw_base: &str) -> anyhow::Result<Self> {
        let mut normalized = raw_base.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let base = Url::parse(&normalized)
            .with_context(|| format!("invalid server url '{raw_base}'"))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            bail!("server url '{raw_base}' must be an http(s) base url");
        }

        let join = |path: &str| {
            base.join(path)
                .with_context(|| format!("failed to derive endpoint '{path}' from '{raw_base}'"))
        };

        Ok(Self {
            beers: join(Category::Beer.endpoint_path())?,
            whisky: join(Category::Whisky.endpoint_path())?,
            vodka: join(Category::Vodka.endpoint_path())?,
            rum: join(Category::Rum.endpoint_path())?,
            chat: join(CHAT_ENDPOINT_PATH)?,
        })
    }

    pub fn catalog(&self, category: Category) -> &Url {
        match category {
            Category::Beer => &self.beers,
            Category::Whisky => &self.whisky,
            Category::Vodka => &self.vodka,
            Category::Rum => &self.rum,
        }
    }

    pub fn chat(&self) -> &Url {
        &self.chat
    }
}

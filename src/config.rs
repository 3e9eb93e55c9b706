use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::tags::TagSchema;

pub const DEFAULT_GEOCODER_URL: &str = "https://bev.kolmann.at/reverse-geocode.php";
pub const DEFAULT_OVERPASS_SERVER: &str = "https://overpass-api.de/api/";
pub const DEFAULT_USER_AGENT: &str = "Austria Address Helper";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub geocoder: GeocoderConfig,
    pub duplicates: DuplicateConfig,
    pub tags: TagConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DuplicateConfig {
    pub enabled: bool,
    pub overpass_server: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct TagConfig {
    pub schema: TagSchema,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            overpass_server: DEFAULT_OVERPASS_SERVER.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Overpass interpreter endpoint, tolerating a server URL without trailing slash
    pub fn overpass_interpreter_url(&self) -> String {
        let server = &self.duplicates.overpass_server;
        if server.ends_with('/') {
            format!("{}interpreter", server)
        } else {
            format!("{}/interpreter", server)
        }
    }
}

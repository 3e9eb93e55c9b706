//! Overpass API client for the duplicate check.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::duplicate_query;
use crate::config::Config;
use crate::models::GeoPoint;

const OSM_BROWSE_URL: &str = "https://www.openstreetmap.org";
pub const UNKNOWN_ELEMENT_URL: &str = "<Could not generate URL>";

/// Only `type` and `id` of each element are used. Elements are kept loose so
/// that one malformed entry does not fail the whole response.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<serde_json::Value>,
}

impl OverpassResponse {
    pub fn element_urls(&self) -> Vec<String> {
        self.elements.iter().map(element_url).collect()
    }
}

/// Browse URL of an Overpass element, or a placeholder if `type` or `id` is missing
pub fn element_url(element: &serde_json::Value) -> String {
    let osm_type = element.get("type").and_then(|t| t.as_str());
    let id = element
        .get("id")
        .and_then(|id| id.as_i64())
        .filter(|id| *id != 0);

    match (osm_type, id) {
        (Some(osm_type), Some(id)) => format!(
            "{}/{}/{}",
            OSM_BROWSE_URL,
            url::form_urlencoded::byte_serialize(osm_type.as_bytes()).collect::<String>(),
            id
        ),
        _ => UNKNOWN_ELEMENT_URL.to_string(),
    }
}

/// Looks up existing OSM objects carrying a given address
#[derive(Clone)]
pub struct OverpassClient {
    client: Client,
    interpreter_url: Url,
}

impl OverpassClient {
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = config.overpass_interpreter_url();
        let interpreter_url = Url::parse(&endpoint)
            .with_context(|| format!("Invalid Overpass server URL '{}'", endpoint))?;
        let client = Client::builder()
            .user_agent(config.geocoder.user_agent.as_str())
            .timeout(Duration::from_secs(config.duplicates.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            interpreter_url,
        })
    }

    /// URLs of all objects near `center` that match the candidate address tags
    pub async fn find_duplicates(
        &self,
        candidates: &BTreeMap<String, String>,
        center: GeoPoint,
    ) -> Result<Vec<String>, reqwest::Error> {
        let query = duplicate_query(candidates, center).to_string();
        debug!("Overpass query: {}", query);

        let mut url = self.interpreter_url.clone();
        url.query_pairs_mut().append_pair("data", &query);

        let response: OverpassResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let urls = response.element_urls();
        info!("Duplicate check found {} existing objects", urls.len());
        Ok(urls)
    }
}

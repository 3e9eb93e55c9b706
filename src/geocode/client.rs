//! HTTP client for the reverse-geocoding endpoint.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::GeocodeResponse;
use crate::config::GeocoderConfig;
use crate::error::HelperError;
use crate::models::{AddressResult, GeoPoint};

/// Search radius in meters around the lookup point
const SEARCH_DISTANCE: u32 = 30;
const RESULT_LIMIT: u32 = 1;
/// WGS 84
const EPSG: u32 = 4326;

/// Fetches the nearest official address for a point
#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: Url,
}

impl GeocodeClient {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid geocoder URL '{}'", config.base_url))?;
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// `{base}?lat=..&lon=..&distance=30&limit=1&epsg=4326`
    pub fn request_url(&self, center: GeoPoint) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("lat", &format_degrees(center.lat))
            .append_pair("lon", &format_degrees(center.lon))
            .append_pair("distance", &SEARCH_DISTANCE.to_string())
            .append_pair("limit", &RESULT_LIMIT.to_string())
            .append_pair("epsg", &EPSG.to_string());
        url
    }

    /// Look up the address for a point. Zero results is `NotFound`.
    pub async fn fetch(&self, center: GeoPoint) -> Result<AddressResult, HelperError> {
        let url = self.request_url(center);
        debug!("Geocoding request: {}", url);

        let response: GeocodeResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("Geocoder returned {} results", response.results.len());

        let address = response.into_first_address()?;
        info!(
            "Found address {} {}, {} {}",
            address.street_or_place, address.house_number, address.postcode, address.municipality
        );
        Ok(address)
    }
}

/// Decimal degrees with at most seven fractional digits, e.g. `48.2` or `16.3725042`
pub fn format_degrees(value: f64) -> String {
    let formatted = format!("{:.7}", value);
    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

//! JSON envelope of the reverse-geocoding service.

use serde::Deserialize;

use crate::error::HelperError;
use crate::models::AddressResult;

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub results: Vec<GeocodeResult>,
    pub address_date: Option<String>,
    pub copyright: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub municipality: String,
    pub locality: Option<String>,
    pub postcode: String,
    pub street: String,
    pub house_number: String,
    pub address_type: Option<String>,
    #[serde(default)]
    pub municipality_has_ambiguous_addresses: bool,
    pub distance: Option<f64>,
}

impl GeocodeResponse {
    /// Take the first result as is. The server's ordering is authoritative.
    pub fn into_first_address(self) -> Result<AddressResult, HelperError> {
        let first = self
            .results
            .into_iter()
            .next()
            .ok_or(HelperError::NotFound)?;

        let address_date = self
            .address_date
            .ok_or(HelperError::MalformedResponse("missing address_date"))?;
        let copyright = self
            .copyright
            .ok_or(HelperError::MalformedResponse("missing copyright"))?;

        Ok(AddressResult {
            locality: first
                .locality
                .unwrap_or_else(|| first.municipality.clone()),
            municipality: first.municipality,
            postcode: first.postcode,
            street_or_place: first.street,
            house_number: first.house_number,
            address_type: first.address_type,
            ambiguous_municipality: first.municipality_has_ambiguous_addresses,
            distance: first.distance,
            address_date,
            copyright,
        })
    }
}

//! Address records returned by the reverse geocoder.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Whether the name part of an address is a street or a place.
///
/// Only these two classifications exist; any other server value or operator
/// answer leaves the address unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Street,
    Place,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Street => "street",
            AddressType::Place => "place",
        }
    }

    /// The tag carrying the street or place name
    pub fn tag_key(&self) -> &'static str {
        match self {
            AddressType::Street => "addr:street",
            AddressType::Place => "addr:place",
        }
    }
}

impl std::fmt::Display for AddressType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "street" => Ok(AddressType::Street),
            "place" => Ok(AddressType::Place),
            other => Err(format!("unknown address type '{}'", other)),
        }
    }
}

/// The first result of one reverse-geocoding request.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressResult {
    pub municipality: String,
    pub locality: String,
    pub postcode: String,
    /// Street or place name, depending on the address type
    pub street_or_place: String,
    pub house_number: String,
    /// Classification as sent by the server, possibly neither "street" nor "place"
    pub address_type: Option<String>,
    /// The municipality has the same postcode/street combination in several localities
    pub ambiguous_municipality: bool,
    /// Distance in meters between the lookup point and the address coordinates
    pub distance: Option<f64>,
    pub address_date: String,
    pub copyright: String,
}

impl AddressResult {
    /// Server classification, if it is one of the two known types
    pub fn server_address_type(&self) -> Option<AddressType> {
        self.address_type.as_deref().and_then(|t| t.parse().ok())
    }
}

//! Reverse geocoding against the BEV address service.

mod client;
mod response;

pub use client::{format_degrees, GeocodeClient};
pub use response::{GeocodeResponse, GeocodeResult};

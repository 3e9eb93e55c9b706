//! Duplicate-address check against the Overpass API.

mod client;
mod query;

pub use client::{element_url, OverpassClient, OverpassResponse, UNKNOWN_ELEMENT_URL};
pub use query::{duplicate_query, BoundingBox, OverpassQuery, Statement, TagFilter};

//! Core data models for the address helper.

pub mod address;
pub mod object;

pub use address::{AddressResult, AddressType};
pub use object::{GeoPoint, MapObject, ObjectId, OsmType};

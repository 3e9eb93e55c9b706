//! Austria Address Helper - fetch official Austrian addresses for OSM objects
//!
//! This library provides the reverse-geocoding lookup, the address-type
//! resolution, the Overpass duplicate check and the tag-change commands used
//! by the `fetch-address` binary.

pub mod config;
pub mod edit;
pub mod error;
pub mod geocode;
pub mod helper;
pub mod models;
pub mod operator;
pub mod overpass;
pub mod resolve;
pub mod tags;

pub use config::Config;
pub use edit::{AddressUpdate, Document};
pub use error::HelperError;
pub use helper::AddressHelper;
pub use models::{AddressResult, AddressType, GeoPoint, MapObject, ObjectId, OsmType};
pub use operator::{AddressTypeChoice, Notification, NotificationLevel, Operator};
pub use resolve::{ChoiceKey, ChoiceStore, SessionChoices};
pub use tags::TagSchema;

//! Error kinds of a single address lookup.

use thiserror::Error;

/// Every variant is terminal for the current invocation. Nothing is retried.
#[derive(Debug, Error)]
pub enum HelperError {
    #[error("please select exactly one object (got {count})")]
    InvalidSelection { count: usize },

    #[error("object {0} has no coordinates")]
    MissingGeometry(String),

    #[error("object {0} is not part of the document")]
    UnknownObject(String),

    #[error("address lookup failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("address lookup returned a malformed response: {0}")]
    MalformedResponse(&'static str),

    #[error("no address was found for this object")]
    NotFound,

    #[error("no address type selected")]
    NoAddressTypeSelected,

    #[error("unable to check whether this address already exists in OpenStreetMap: {0}")]
    DuplicateCheckUnavailable(String),

    #[error("the address already exists in OpenStreetMap and was not added")]
    DuplicateAddressDeclined,
}

impl HelperError {
    /// Transport failures and undecodable responses both count as network errors.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::MalformedResponse(_))
    }
}

//! The person running the lookup: answers questions and receives notifications.

use crate::models::AddressType;

/// Question asked when the server could not classify a street or place name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressTypeQuestion {
    pub place_name: String,
    pub house_number: String,
    pub postcode: String,
    pub city: String,
}

impl std::fmt::Display for AddressTypeQuestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not determine whether \"{0}\" (part of the address {0} {1}, {2} {3}) is a street \
             or a place name. Choose \"street\" if {0} is an actual street, or \"place\" if it is \
             the name of a village, hamlet, territorial zone or anything other than a street.",
            self.place_name, self.house_number, self.postcode, self.city
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressTypeChoice {
    pub address_type: AddressType,
    /// Reuse this answer for the same place, postcode and city for the rest of the session
    pub remember: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Blocking interaction with the operator.
///
/// Every question may be declined; a declined question aborts the lookup
/// before anything is changed.
pub trait Operator {
    /// `None` cancels the lookup
    fn choose_address_type(&mut self, question: &AddressTypeQuestion)
        -> Option<AddressTypeChoice>;

    /// The duplicate check failed; continue without it?
    fn confirm_unverified(&mut self, cause: &str) -> bool;

    /// Objects with this address already exist; add it anyway?
    fn confirm_duplicates(&mut self, urls: &[String]) -> bool;

    fn notify(&mut self, notification: Notification);
}

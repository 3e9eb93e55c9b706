//! Street-or-place classification of an address.

use hashbrown::HashMap;
use tracing::debug;

use crate::error::HelperError;
use crate::models::{AddressResult, AddressType};
use crate::operator::{AddressTypeQuestion, Operator};

/// Remembered choices are keyed by exact place name, postcode and city
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChoiceKey {
    pub place_name: String,
    pub postcode: String,
    pub city: String,
}

impl ChoiceKey {
    pub fn for_address(address: &AddressResult) -> Self {
        Self {
            place_name: address.street_or_place.clone(),
            postcode: address.postcode.clone(),
            city: address.municipality.clone(),
        }
    }
}

/// Storage for address types the operator asked to remember
pub trait ChoiceStore {
    fn recall(&self, key: &ChoiceKey) -> Option<AddressType>;
    fn remember(&mut self, key: ChoiceKey, address_type: AddressType);
}

/// Remembered choices for the lifetime of the process. Never written to disk.
#[derive(Debug, Default)]
pub struct SessionChoices {
    choices: HashMap<ChoiceKey, AddressType>,
}

impl SessionChoices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

impl ChoiceStore for SessionChoices {
    fn recall(&self, key: &ChoiceKey) -> Option<AddressType> {
        self.choices.get(key).copied()
    }

    fn remember(&mut self, key: ChoiceKey, address_type: AddressType) {
        self.choices.insert(key, address_type);
    }
}

/// Resolve the address type: server classification first, then a remembered
/// choice, then the operator.
pub fn resolve_address_type<S, O>(
    address: &AddressResult,
    store: &mut S,
    operator: &mut O,
) -> Result<AddressType, HelperError>
where
    S: ChoiceStore + ?Sized,
    O: Operator + ?Sized,
{
    if let Some(address_type) = address.server_address_type() {
        return Ok(address_type);
    }

    let key = ChoiceKey::for_address(address);
    if let Some(address_type) = store.recall(&key) {
        debug!(
            "Using remembered address type '{}' for {} in {} {}",
            address_type, key.place_name, key.postcode, key.city
        );
        return Ok(address_type);
    }

    let question = AddressTypeQuestion {
        place_name: address.street_or_place.clone(),
        house_number: address.house_number.clone(),
        postcode: address.postcode.clone(),
        city: address.municipality.clone(),
    };
    let choice = operator
        .choose_address_type(&question)
        .ok_or(HelperError::NoAddressTypeSelected)?;

    if choice.remember {
        debug!(
            "Remembering address type '{}' for {} in {} {}",
            choice.address_type, key.place_name, key.postcode, key.city
        );
        store.remember(key, choice.address_type);
    }

    Ok(choice.address_type)
}

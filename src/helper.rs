//! One address lookup from selection to committed tag change.

use anyhow::Result;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::config::Config;
use crate::edit::{AddressUpdate, Document};
use crate::error::HelperError;
use crate::geocode::GeocodeClient;
use crate::models::{AddressResult, GeoPoint};
use crate::operator::{Notification, Operator};
use crate::overpass::OverpassClient;
use crate::resolve::{resolve_address_type, ChoiceStore, SessionChoices};
use crate::tags::{build_address_tags, duplicate_candidate_tags, source_attribution, COUNTRY};

/// Everything a lookup needs, owned by the caller and reused across lookups
pub struct AddressHelper<S: ChoiceStore = SessionChoices> {
    config: Config,
    geocoder: GeocodeClient,
    overpass: OverpassClient,
    choices: S,
}

impl AddressHelper<SessionChoices> {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_store(config, SessionChoices::new())
    }
}

impl<S: ChoiceStore> AddressHelper<S> {
    pub fn with_store(config: Config, choices: S) -> Result<Self> {
        let geocoder = GeocodeClient::new(&config.geocoder)?;
        let overpass = OverpassClient::new(&config)?;

        Ok(Self {
            config,
            geocoder,
            overpass,
            choices,
        })
    }

    pub fn choices(&self) -> &S {
        &self.choices
    }

    /// Look up the address of the single selected object.
    ///
    /// The document is only read. Every question put to the operator can abort
    /// the lookup, in which case nothing is returned to apply.
    pub async fn fetch_address<O>(
        &mut self,
        doc: &Document,
        operator: &mut O,
    ) -> Result<AddressUpdate, HelperError>
    where
        O: Operator + ?Sized,
    {
        let selected = doc.selected()?;
        let [object] = selected.as_slice() else {
            return Err(HelperError::InvalidSelection {
                count: selected.len(),
            });
        };
        let target = object.object_id();
        let center = object
            .center()
            .ok_or_else(|| HelperError::MissingGeometry(target.to_string()))?;

        info!(
            "Fetching address for {} at {}, {}",
            target, center.lat, center.lon
        );
        let address = self.geocoder.fetch(center).await?;

        let address_type = resolve_address_type(&address, &mut self.choices, operator)?;
        let tags = build_address_tags(&address, address_type, self.config.tags.schema);

        if self.config.duplicates.enabled {
            self.check_duplicates(&tags, center, operator).await?;
        }

        Ok(AddressUpdate {
            target,
            tags,
            source: source_attribution(&address.copyright),
            summary: summary(&address),
            distance: address.distance,
        })
    }

    async fn check_duplicates<O>(
        &self,
        tags: &BTreeMap<String, String>,
        center: GeoPoint,
        operator: &mut O,
    ) -> Result<(), HelperError>
    where
        O: Operator + ?Sized,
    {
        let candidates = duplicate_candidate_tags(tags);

        match self.overpass.find_duplicates(&candidates, center).await {
            Err(e) => {
                warn!("Duplicate check failed: {}", e);
                let cause = e.to_string();
                if operator.confirm_unverified(&cause) {
                    Ok(())
                } else {
                    Err(HelperError::DuplicateCheckUnavailable(cause))
                }
            }
            Ok(urls) if urls.is_empty() => Ok(()),
            Ok(urls) => {
                if operator.confirm_duplicates(&urls) {
                    Ok(())
                } else {
                    Err(HelperError::DuplicateAddressDeclined)
                }
            }
        }
    }

    /// Look up the address and apply it to the document as one undoable change.
    ///
    /// The outcome is also reported to the operator as a notification.
    pub async fn run<O>(
        &mut self,
        doc: &mut Document,
        operator: &mut O,
    ) -> Result<AddressUpdate, HelperError>
    where
        O: Operator + ?Sized,
    {
        let result = match self.fetch_address(doc, operator).await {
            Ok(update) => doc.apply(&update).map(|_| update),
            Err(e) => Err(e),
        };

        match &result {
            Ok(update) => operator.notify(Notification::info(success_message(update))),
            // The operator just said no; nothing more to tell them.
            Err(HelperError::DuplicateAddressDeclined) => {}
            Err(HelperError::NoAddressTypeSelected) => {
                operator.notify(Notification::warning("No address type selected. Aborting."))
            }
            Err(HelperError::NotFound) => {
                operator.notify(Notification::error("No address was found for this object."))
            }
            Err(e) => operator.notify(Notification::error(e.to_string())),
        }

        result
    }
}

fn summary(address: &AddressResult) -> String {
    format!(
        "{} {}, {} {} ({})",
        address.street_or_place, address.house_number, address.postcode, address.municipality, COUNTRY
    )
}

fn success_message(update: &AddressUpdate) -> String {
    match update.distance {
        Some(distance) => format!(
            "Successfully added address to selected object: {}. \
             Distance between building center and address coordinates: {} meters",
            update.summary,
            format_distance(distance)
        ),
        None => format!(
            "Successfully added address to selected object: {}",
            update.summary
        ),
    }
}

/// At most two decimals, without trailing zeros
fn format_distance(meters: f64) -> String {
    let formatted = format!("{:.2}", meters);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

//! Address tags written to the selected object and the change-set source.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::models::{AddressResult, AddressType};

pub const COUNTRY: &str = "AT";
pub const ADDR_DATE_KEY: &str = "at_bev:addr_date";
pub const SOURCE_KEY: &str = "source";

/// Tags compared when looking for existing objects with the same address
pub const DUPLICATE_CHECK_KEYS: [&str; 6] = [
    "addr:city",
    "addr:postcode",
    "addr:place",
    "addr:street",
    "addr:hamlet",
    "addr:housenumber",
];

/// Keys that may carry the street or place name of an address
pub const STREET_TYPE_KEYS: [&str; 4] = ["addr:street", "addr:place", "addr:hamlet", "addr:suburb"];

/// How municipalities with ambiguous addresses are tagged.
///
/// Some municipalities contain the same postcode and street in several
/// localities, e.g. "Feldgasse" in 2203 Großebersdorf exists in Eibesbrunn,
/// Großebersdorf, Manhartsbrunn and Putzing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagSchema {
    /// `addr:city` is the municipality, the locality goes to `addr:suburb`
    #[default]
    Suburb,
    /// No `addr:suburb`; the locality replaces the municipality in `addr:city`
    LocalityAsCity,
}

impl FromStr for TagSchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "suburb" => Ok(TagSchema::Suburb),
            "locality_as_city" => Ok(TagSchema::LocalityAsCity),
            other => Err(format!(
                "unknown tag schema '{}' (expected 'suburb' or 'locality_as_city')",
                other
            )),
        }
    }
}

/// Build the complete address tag set for a resolved address
pub fn build_address_tags(
    address: &AddressResult,
    address_type: AddressType,
    schema: TagSchema,
) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();

    tags.insert("addr:country".to_string(), COUNTRY.to_string());

    match schema {
        TagSchema::Suburb => {
            tags.insert("addr:city".to_string(), address.municipality.clone());
            if address.ambiguous_municipality {
                tags.insert("addr:suburb".to_string(), address.locality.clone());
            }
        }
        TagSchema::LocalityAsCity => {
            let city = if address.ambiguous_municipality {
                &address.locality
            } else {
                &address.municipality
            };
            tags.insert("addr:city".to_string(), city.clone());
        }
    }

    tags.insert("addr:postcode".to_string(), address.postcode.clone());
    tags.insert(
        address_type.tag_key().to_string(),
        address.street_or_place.clone(),
    );
    tags.insert("addr:housenumber".to_string(), address.house_number.clone());
    tags.insert(ADDR_DATE_KEY.to_string(), address.address_date.clone());

    tags
}

/// The subset of tags that identifies an address for the duplicate check
pub fn duplicate_candidate_tags(tags: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    tags.iter()
        .filter(|(key, _)| DUPLICATE_CHECK_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

pub fn source_attribution(copyright: &str) -> String {
    format!("Adressdaten: {}", copyright)
}

/// Add an attribution to an existing `source` value (`;`-separated), once
pub fn merge_source(existing: Option<&str>, attribution: &str) -> String {
    match existing.map(str::trim) {
        None | Some("") => attribution.to_string(),
        Some(existing) => {
            if existing.split(';').any(|part| part.trim() == attribution) {
                existing.to_string()
            } else {
                format!("{}; {}", existing, attribution)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feldgasse(ambiguous: bool) -> AddressResult {
        AddressResult {
            municipality: "Großebersdorf".to_string(),
            locality: "Eibesbrunn".to_string(),
            postcode: "2203".to_string(),
            street_or_place: "Feldgasse".to_string(),
            house_number: "3".to_string(),
            address_type: Some("street".to_string()),
            ambiguous_municipality: ambiguous,
            distance: Some(4.2),
            address_date: "2024-04-01".to_string(),
            copyright: "BEV".to_string(),
        }
    }

    fn tag<'a>(tags: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
        tags.get(key).map(String::as_str)
    }

    #[test]
    fn test_suburb_schema_ambiguous() {
        let tags = build_address_tags(&feldgasse(true), AddressType::Street, TagSchema::Suburb);

        assert_eq!(tag(&tags, "addr:country"), Some("AT"));
        assert_eq!(tag(&tags, "addr:city"), Some("Großebersdorf"));
        assert_eq!(tag(&tags, "addr:suburb"), Some("Eibesbrunn"));
        assert_eq!(tag(&tags, "addr:postcode"), Some("2203"));
        assert_eq!(tag(&tags, "addr:street"), Some("Feldgasse"));
        assert_eq!(tag(&tags, "addr:housenumber"), Some("3"));
        assert_eq!(tag(&tags, "at_bev:addr_date"), Some("2024-04-01"));
        assert_eq!(tags.len(), 7);
    }

    #[test]
    fn test_suburb_schema_unambiguous() {
        let tags = build_address_tags(&feldgasse(false), AddressType::Street, TagSchema::Suburb);

        assert_eq!(tag(&tags, "addr:city"), Some("Großebersdorf"));
        assert_eq!(tag(&tags, "addr:suburb"), None);
    }

    #[test]
    fn test_locality_as_city_schema() {
        let ambiguous = build_address_tags(
            &feldgasse(true),
            AddressType::Street,
            TagSchema::LocalityAsCity,
        );
        assert_eq!(tag(&ambiguous, "addr:city"), Some("Eibesbrunn"));
        assert_eq!(tag(&ambiguous, "addr:suburb"), None);

        let plain = build_address_tags(
            &feldgasse(false),
            AddressType::Street,
            TagSchema::LocalityAsCity,
        );
        assert_eq!(tag(&plain, "addr:city"), Some("Großebersdorf"));
    }

    #[test]
    fn test_exactly_one_of_street_or_place() {
        for address_type in [AddressType::Street, AddressType::Place] {
            let tags = build_address_tags(&feldgasse(false), address_type, TagSchema::Suburb);
            let street = tags.contains_key("addr:street");
            let place = tags.contains_key("addr:place");

            assert!(street ^ place);
            assert_eq!(street, address_type == AddressType::Street);
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let address = feldgasse(true);
        assert_eq!(
            build_address_tags(&address, AddressType::Place, TagSchema::Suburb),
            build_address_tags(&address, AddressType::Place, TagSchema::Suburb)
        );
    }

    #[test]
    fn test_duplicate_candidates() {
        let tags = build_address_tags(&feldgasse(true), AddressType::Street, TagSchema::Suburb);
        let candidates = duplicate_candidate_tags(&tags);

        let keys: Vec<&str> = candidates.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["addr:city", "addr:housenumber", "addr:postcode", "addr:street"]
        );
    }

    #[test]
    fn test_merge_source() {
        let attribution = source_attribution("BEV");
        assert_eq!(attribution, "Adressdaten: BEV");

        assert_eq!(merge_source(None, &attribution), "Adressdaten: BEV");
        assert_eq!(merge_source(Some(" "), &attribution), "Adressdaten: BEV");
        assert_eq!(
            merge_source(Some("survey"), &attribution),
            "survey; Adressdaten: BEV"
        );
        assert_eq!(
            merge_source(Some("survey; Adressdaten: BEV"), &attribution),
            "survey; Adressdaten: BEV"
        );
    }

    #[test]
    fn test_schema_from_str() {
        assert_eq!("suburb".parse::<TagSchema>(), Ok(TagSchema::Suburb));
        assert_eq!("locality_as_city".parse::<TagSchema>(), Ok(TagSchema::LocalityAsCity));
        assert!("city".parse::<TagSchema>().is_err());
    }
}

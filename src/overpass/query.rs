//! Overpass QL query builder.
//!
//! Serializes to `[out:json][timeout:10][bbox:s,w,n,e];(<statements>);out body;`

use std::collections::BTreeMap;
use std::fmt;

use crate::models::{GeoPoint, OsmType};
use crate::tags::STREET_TYPE_KEYS;

const QUERY_TIMEOUT_SECS: u32 = 10;
/// Rough search area around the object, in degrees
const LAT_MARGIN: f64 = 0.075;
const LON_MARGIN: f64 = 0.1;

const OBJECT_KINDS: [OsmType; 3] = [OsmType::Way, OsmType::Node, OsmType::Relation];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn around(center: GeoPoint, lat_margin: f64, lon_margin: f64) -> Self {
        Self {
            south: center.lat - lat_margin,
            west: center.lon - lon_margin,
            north: center.lat + lat_margin,
            east: center.lon + lon_margin,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[bbox:{},{},{},{}]",
            self.south, self.west, self.north, self.east
        )
    }
}

/// Exact tag equality: `["key"="value"]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub key: String,
    pub value: String,
}

impl TagFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        write_quoted(f, &self.key)?;
        f.write_str("=")?;
        write_quoted(f, &self.value)?;
        f.write_str("]")
    }
}

/// One object kind with all its filters: `way["k"="v"]["k2"="v2"];`
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: OsmType,
    pub filters: Vec<TagFilter>,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for filter in &self.filters {
            write!(f, "{}", filter)?;
        }
        f.write_str(";")
    }
}

/// Union of statements restricted to a bounding box, returned as JSON
#[derive(Debug, Clone, PartialEq)]
pub struct OverpassQuery {
    pub timeout_secs: u32,
    pub bbox: BoundingBox,
    pub statements: Vec<Statement>,
}

impl fmt::Display for OverpassQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[out:json][timeout:{}]{};(", self.timeout_secs, self.bbox)?;
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        f.write_str(");out body;")
    }
}

/// Query for objects carrying the same address near `center`.
///
/// It is not always clear which tag holds the street or place name, so the
/// name is matched against every street-type key in turn, for ways, nodes
/// and relations.
pub fn duplicate_query(candidates: &BTreeMap<String, String>, center: GeoPoint) -> OverpassQuery {
    let mut statements = Vec::with_capacity(STREET_TYPE_KEYS.len() * OBJECT_KINDS.len());

    for street_key in STREET_TYPE_KEYS {
        let filters: Vec<TagFilter> = candidates
            .iter()
            .map(|(key, value)| {
                if STREET_TYPE_KEYS.contains(&key.as_str()) {
                    TagFilter::new(street_key, value.as_str())
                } else {
                    TagFilter::new(key.as_str(), value.as_str())
                }
            })
            .collect();

        for kind in OBJECT_KINDS {
            statements.push(Statement {
                kind,
                filters: filters.clone(),
            });
        }
    }

    OverpassQuery {
        timeout_secs: QUERY_TIMEOUT_SECS,
        bbox: BoundingBox::around(center, LAT_MARGIN, LON_MARGIN),
        statements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> BTreeMap<String, String> {
        [
            ("addr:city", "Wien"),
            ("addr:housenumber", "1"),
            ("addr:place", "Hauptplatz"),
            ("addr:postcode", "1010"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_tag_filter_escaping() {
        let filter = TagFilter::new("name", r#"Am "Grünen" Weg \ 2"#);
        assert_eq!(
            filter.to_string(),
            r#"["name"="Am \"Grünen\" Weg \\ 2"]"#
        );
    }

    #[test]
    fn test_bbox() {
        let bbox = BoundingBox::around(GeoPoint { lat: 48.0, lon: 16.0 }, 0.5, 0.25);
        assert_eq!(bbox.to_string(), "[bbox:47.5,15.75,48.5,16.25]");
    }

    #[test]
    fn test_duplicate_query_statements() {
        let query = duplicate_query(&candidates(), GeoPoint { lat: 48.0, lon: 16.0 });
        assert_eq!(query.statements.len(), 12);

        let first = &query.statements[0];
        assert_eq!(first.kind, OsmType::Way);
        assert_eq!(
            first.to_string(),
            r#"way["addr:city"="Wien"]["addr:housenumber"="1"]["addr:street"="Hauptplatz"]["addr:postcode"="1010"];"#
        );

        let kinds: Vec<OsmType> = query.statements[..3].iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![OsmType::Way, OsmType::Node, OsmType::Relation]);

        let last = query.statements.last().unwrap();
        assert_eq!(last.kind, OsmType::Relation);
        assert!(last.to_string().contains(r#"["addr:suburb"="Hauptplatz"]"#));
    }

    #[test]
    fn test_query_grammar() {
        let mut tags = BTreeMap::new();
        tags.insert("addr:street".to_string(), "Ring".to_string());
        let mut query = duplicate_query(&tags, GeoPoint { lat: 48.0, lon: 16.0 });
        query.bbox = BoundingBox::around(GeoPoint { lat: 48.0, lon: 16.0 }, 0.5, 0.25);
        query.statements.truncate(2);

        assert_eq!(
            query.to_string(),
            r#"[out:json][timeout:10][bbox:47.5,15.75,48.5,16.25];(way["addr:street"="Ring"];node["addr:street"="Ring"];);out body;"#
        );
    }
}

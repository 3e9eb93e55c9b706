//! Map objects the operator selects and edits.

use geo::BoundingRect;
use geo_types::{MultiPoint, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Type of OSM object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsmType {
    Node,
    Way,
    Relation,
}

impl OsmType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsmType::Node => "node",
            OsmType::Way => "way",
            OsmType::Relation => "relation",
        }
    }
}

impl std::fmt::Display for OsmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsmType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "node" => Ok(OsmType::Node),
            "way" => Ok(OsmType::Way),
            "relation" => Ok(OsmType::Relation),
            other => Err(format!("unknown OSM type '{}'", other)),
        }
    }
}

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Reference to an object: "{osm_type}/{id}". Negative ids are new, unsaved objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    pub osm_type: OsmType,
    pub id: i64,
}

impl ObjectId {
    pub fn new(osm_type: OsmType, id: i64) -> Self {
        Self { osm_type, id }
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.osm_type, self.id)
    }
}

impl FromStr for ObjectId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (osm_type, id) = s
            .split_once('/')
            .ok_or_else(|| format!("expected '<type>/<id>', got '{}'", s))?;
        let id = id
            .parse::<i64>()
            .map_err(|e| format!("invalid object id '{}': {}", id, e))?;
        Ok(Self::new(osm_type.parse()?, id))
    }
}

impl Serialize for ObjectId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An editable map object with its node coordinates and tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    #[serde(rename = "type")]
    pub osm_type: OsmType,

    pub id: i64,

    /// Node coordinates as [lon, lat]; for ways and relations all member nodes
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl MapObject {
    /// Create a new, untagged node at a point
    pub fn node(id: i64, point: GeoPoint) -> Self {
        Self {
            osm_type: OsmType::Node,
            id,
            coordinates: vec![[point.lon, point.lat]],
            tags: BTreeMap::new(),
        }
    }

    pub fn object_id(&self) -> ObjectId {
        ObjectId::new(self.osm_type, self.id)
    }

    pub fn bbox(&self) -> Option<Rect<f64>> {
        MultiPoint::from(self.coordinates.clone()).bounding_rect()
    }

    /// Center of the bounding box, the point the address is looked up for
    pub fn center(&self) -> Option<GeoPoint> {
        self.bbox().map(|rect| {
            let c = rect.center();
            GeoPoint { lat: c.y, lon: c.x }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_way_center_is_bbox_center() {
        let way = MapObject {
            osm_type: OsmType::Way,
            id: 42,
            coordinates: vec![[16.0, 48.0], [16.2, 48.0], [16.2, 48.1], [16.1, 48.4]],
            tags: BTreeMap::new(),
        };

        let center = way.center().unwrap();
        assert!((center.lon - 16.1).abs() < 1e-9);
        assert!((center.lat - 48.2).abs() < 1e-9);
    }

    #[test]
    fn test_no_coordinates_no_center() {
        let relation = MapObject {
            osm_type: OsmType::Relation,
            id: 7,
            coordinates: vec![],
            tags: BTreeMap::new(),
        };
        assert_eq!(relation.center(), None);
    }

    #[test]
    fn test_object_id_parse() {
        let id: ObjectId = "way/123".parse().unwrap();
        assert_eq!(id, ObjectId::new(OsmType::Way, 123));
        assert_eq!(id.to_string(), "way/123");

        let new_node: ObjectId = "node/-1".parse().unwrap();
        assert_eq!(new_node.id, -1);

        assert!("area/1".parse::<ObjectId>().is_err());
        assert!("way".parse::<ObjectId>().is_err());
        assert!("way/abc".parse::<ObjectId>().is_err());
    }
}

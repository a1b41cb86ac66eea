//! GeoJSON wire types returned by `/api/getData`.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime,
};

use crate::error::FetchError;

/// All features returned by one fetch, in server order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Node and way ids live in separate OSM namespaces, so lookups need both.
    pub fn find(&self, target: &FeatureRef) -> Option<&Feature> {
        self.features
            .iter()
            .find(|feature| feature.kind() == target.kind && feature.id() == &target.id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: FeatureProperties,
}

impl Feature {
    pub fn id(&self) -> &FeatureId {
        &self.properties.id
    }

    pub fn kind(&self) -> FeatureKind {
        self.geometry.kind()
    }

    pub fn reference(&self) -> FeatureRef {
        FeatureRef::new(self.kind(), self.id().clone())
    }

    /// `(lon, lat)` used to place the feature on the map.
    pub fn anchor(&self) -> Option<(f64, f64)> {
        self.geometry.anchor()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureProperties {
    pub id: FeatureId,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub lastedit: OffsetDateTime,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created: OffsetDateTime,
    pub version: u64,
    pub average_update_days: f64,
}

/// OSM element identifier. The server sends it as a string, older dumps as a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(String);

impl FeatureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeatureId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for FeatureId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Node,
    Way,
}

impl FeatureKind {
    /// Path segment used by openstreetmap.org URLs.
    pub fn osm_type(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
        }
    }
}

/// An OSM element: its type plus its id within that type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureRef {
    pub kind: FeatureKind,
    pub id: FeatureId,
}

impl FeatureRef {
    pub fn new(kind: FeatureKind, id: FeatureId) -> Self {
        Self { kind, id }
    }

    pub fn node(id: impl Into<String>) -> Self {
        Self::new(FeatureKind::Node, FeatureId::new(id))
    }

    pub fn way(id: impl Into<String>) -> Self {
        Self::new(FeatureKind::Way, FeatureId::new(id))
    }
}

/// `node/42`, the form openstreetmap.org uses in its paths.
impl fmt::Display for FeatureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.osm_type(), self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

impl Geometry {
    pub fn kind(&self) -> FeatureKind {
        if self.kind == "Point" {
            FeatureKind::Node
        } else {
            FeatureKind::Way
        }
    }

    /// The point itself, or the mean of every vertex for lines and polygons.
    pub fn anchor(&self) -> Option<(f64, f64)> {
        let mut positions = Vec::new();
        collect_positions(&self.coordinates, &mut positions);
        if positions.is_empty() {
            return None;
        }
        let count = positions.len() as f64;
        let (lon, lat) = positions
            .iter()
            .fold((0.0, 0.0), |(lon, lat), (x, y)| (lon + x, lat + y));
        Some((lon / count, lat / count))
    }
}

fn collect_positions(value: &Value, out: &mut Vec<(f64, f64)>) {
    let Value::Array(items) = value else {
        return;
    };
    if let [Value::Number(x), Value::Number(y), ..] = items.as_slice() {
        if let (Some(x), Some(y)) = (x.as_f64(), y.as_f64()) {
            out.push((x, y));
        }
        return;
    }
    for item in items {
        collect_positions(item, out);
    }
}

/// Accepts RFC 3339, offset-less datetimes (taken as UTC) and bare calendar dates.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    if let Ok(ts) = PrimitiveDateTime::parse(raw, &naive) {
        return Some(ts.assume_utc());
    }
    let date_only = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &date_only)
        .ok()
        .map(|date| date.midnight().assume_utc())
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<OffsetDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`")))
}

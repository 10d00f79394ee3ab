//! Network entity types
//!
//! Typed representations of the Visum network objects the exporter reads:
//! the four queryable collections, the scalar values their attributes carry,
//! and the row shapes flowing through the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four homogeneous groups of network objects queried for export
///
/// Collections are read-only from Transect's perspective; the identifier
/// names the group on the bridge side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCollection {
    /// Intersections and junction points
    Nodes,
    /// Directed edges between nodes
    Links,
    /// Traffic analysis zones
    Zones,
    /// Public transport stop points
    StopPoints,
}

impl EntityCollection {
    /// All four collections in export order
    pub const ALL: [EntityCollection; 4] = [
        EntityCollection::Nodes,
        EntityCollection::Links,
        EntityCollection::Zones,
        EntityCollection::StopPoints,
    ];

    /// Path segment used by the automation bridge for this collection
    pub fn bridge_segment(&self) -> &'static str {
        match self {
            EntityCollection::Nodes => "nodes",
            EntityCollection::Links => "links",
            EntityCollection::Zones => "zones",
            EntityCollection::StopPoints => "stop-points",
        }
    }
}

impl fmt::Display for EntityCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityCollection::Nodes => "Nodes",
            EntityCollection::Links => "Links",
            EntityCollection::Zones => "Zones",
            EntityCollection::StopPoints => "StopPoints",
        };
        write!(f, "{name}")
    }
}

impl FromStr for EntityCollection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "nodes" => Ok(EntityCollection::Nodes),
            "links" => Ok(EntityCollection::Links),
            "zones" => Ok(EntityCollection::Zones),
            "stoppoints" => Ok(EntityCollection::StopPoints),
            _ => Err(format!(
                "Unknown collection: {s}. Must be one of: nodes, links, zones, stop-points"
            )),
        }
    }
}

/// A scalar attribute value retrieved from the bridge
///
/// Visum attributes are either numeric or textual; the bridge serializes
/// them as JSON numbers and strings respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Numeric attribute (Visum reports all numbers as doubles)
    Number(f64),
    /// Textual attribute (names, TSys sets, ...)
    Text(String),
}

impl AttrValue {
    /// Returns the numeric value if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            AttrValue::Text(_) => None,
        }
    }

    /// Returns the integer code if this is a whole number
    ///
    /// Coded fields (e.g. control type) arrive as doubles with zero
    /// fractional part.
    pub fn as_code(&self) -> Option<i64> {
        match self {
            AttrValue::Number(n) if n.fract() == 0.0 => Some(*n as i64),
            _ => None,
        }
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

/// An ordered list of attribute names requested for a collection
///
/// Order is significant: it fixes the column order of both the raw rows and
/// the output CSV.
pub type AttributeSpec = &'static [&'static str];

/// One retrieved entity row, one value per requested attribute
pub type RawRow = Vec<AttrValue>;

/// A raw row after field-level transformation, same length and order
pub type ExportRow = Vec<AttrValue>;

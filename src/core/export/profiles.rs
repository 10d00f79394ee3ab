//! Per-collection export profiles
//!
//! The attribute set, CSV header labels, field rules, and output filename
//! for each of the four entity kinds. Attribute names are the Visum
//! automation names; order is significant and fixes the column order of
//! both the raw rows and the output CSV.

use crate::core::transform::FieldRule;
use crate::domain::{AttributeSpec, EntityCollection};

/// Everything needed to export one entity kind
#[derive(Debug, Clone, Copy)]
pub struct ExportProfile {
    /// Collection this profile exports
    pub collection: EntityCollection,

    /// Output filename, created in the configured output directory
    pub filename: &'static str,

    /// Visum attribute names, in column order
    pub attributes: AttributeSpec,

    /// CSV header labels, one per attribute
    pub headers: &'static [&'static str],

    /// Per-column transformation rules, one per attribute
    pub rules: &'static [FieldRule],
}

/// The four fixed export profiles, in export order
pub const PROFILES: &[ExportProfile] = &[
    ExportProfile {
        collection: EntityCollection::Nodes,
        filename: "Nodes.csv",
        attributes: &["No", "ControlType", "TypeNo", "XCoord", "YCoord"],
        headers: &[
            "Node Number",
            "Control Type",
            "Type Number",
            "X Coordinate",
            "Y Coordinate",
        ],
        rules: &[
            FieldRule::PassThrough,
            FieldRule::control_type(),
            FieldRule::PassThrough,
            FieldRule::PassThrough,
            FieldRule::PassThrough,
        ],
    },
    ExportProfile {
        collection: EntityCollection::Links,
        filename: "Links.csv",
        attributes: &[
            "No",
            "FromNodeNo",
            "ToNodeNo",
            "Length",
            "CapPrT",
            "V0PrT",
            "VolVehPrT(AP)",
        ],
        headers: &[
            "Link Number",
            "From Node Number",
            "To Node Number",
            "Length",
            "Capacity",
            "Free Flow Speed",
            "Volume",
        ],
        rules: &[
            FieldRule::PassThrough,
            FieldRule::PassThrough,
            FieldRule::PassThrough,
            FieldRule::PassThrough,
            FieldRule::PassThrough,
            FieldRule::PassThrough,
            FieldRule::PassThrough,
        ],
    },
    ExportProfile {
        collection: EntityCollection::Zones,
        filename: "Zones.csv",
        attributes: &["No", "XCoord", "YCoord"],
        headers: &["Zone Number", "X Coordinate", "Y Coordinate"],
        rules: &[
            FieldRule::PassThrough,
            FieldRule::PassThrough,
            FieldRule::PassThrough,
        ],
    },
    ExportProfile {
        collection: EntityCollection::StopPoints,
        filename: "StopPoints.csv",
        attributes: &[
            "No", "XCoord", "YCoord", "Name", "NodeNo", "NumLines", "TSysSet",
        ],
        headers: &[
            "Stop Point Number",
            "X Coordinate",
            "Y Coordinate",
            "Name",
            "Node Number",
            "Number of Lines",
            "TSysSet",
        ],
        rules: &[
            FieldRule::PassThrough,
            FieldRule::PassThrough,
            FieldRule::PassThrough,
            FieldRule::PassThrough,
            FieldRule::PassThrough,
            FieldRule::PassThrough,
            FieldRule::PassThrough,
        ],
    },
];

/// Profile for one collection
pub fn profile_for(collection: EntityCollection) -> &'static ExportProfile {
    PROFILES
        .iter()
        .find(|p| p.collection == collection)
        .expect("every collection has a profile")
}

//! Record transformation
//!
//! Pure, deterministic mapping from raw rows to export-ready rows. The only
//! structural operation is resolving coded fields (currently the node
//! control type) to human-readable labels; everything else passes through
//! unchanged. Unknown codes never error, they degrade to the rule's default
//! label.

use crate::domain::{AttrValue, ExportRow, RawRow};

/// Label used when a code is absent from its lookup table
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Fixed control-type code table
///
/// Codes as reported by Visum's `ControlType` node attribute.
pub const CONTROL_TYPE_LABELS: &[(i64, &str)] = &[
    (0, "unknown"),
    (1, "Uncontrolled"),
    (2, "Two-way stop"),
    (3, "Signalized"),
    (4, "All-way stop"),
    (5, "Roundabout"),
    (6, "Two-way yield"),
];

/// Per-column transformation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Leave the value as retrieved
    PassThrough,

    /// Resolve a numeric code through a lookup table, falling back to
    /// `default` when the code is not present
    Lookup {
        table: &'static [(i64, &'static str)],
        default: &'static str,
    },
}

impl FieldRule {
    /// Rule resolving the Visum control-type code
    pub const fn control_type() -> Self {
        FieldRule::Lookup {
            table: CONTROL_TYPE_LABELS,
            default: UNKNOWN_LABEL,
        }
    }

    fn apply(&self, value: AttrValue) -> AttrValue {
        match self {
            FieldRule::PassThrough => value,
            FieldRule::Lookup { table, default } => {
                let label = value
                    .as_code()
                    .and_then(|code| {
                        table
                            .iter()
                            .find(|(c, _)| *c == code)
                            .map(|(_, label)| *label)
                    })
                    .unwrap_or(default);
                AttrValue::Text(label.to_string())
            }
        }
    }
}

/// Transform one raw row into an export row
///
/// Applies `rules` positionally; columns beyond the rule table pass through
/// unchanged. Output length and order always equal the input's.
pub fn transform_row(row: RawRow, rules: &[FieldRule]) -> ExportRow {
    row.into_iter()
        .enumerate()
        .map(|(i, value)| {
            rules
                .get(i)
                .copied()
                .unwrap_or(FieldRule::PassThrough)
                .apply(value)
        })
        .collect()
}

/// Resolve a control-type code to its label
pub fn control_type_label(code: i64) -> &'static str {
    CONTROL_TYPE_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_LABEL)
}

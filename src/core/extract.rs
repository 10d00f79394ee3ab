//! Attribute extraction
//!
//! Queries one network collection for an ordered attribute set and applies
//! the lenient row policy: an empty collection is a warning, not an error,
//! and rows whose value count does not match the requested attribute count
//! are dropped individually without failing the extraction.

use crate::adapters::visum::VisumProvider;
use crate::domain::{AttributeSpec, EntityCollection, RawRow, Result};
use std::time::Instant;

/// Result of extracting one collection
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Well-formed rows, in retrieval order, columns in spec order
    pub rows: Vec<RawRow>,

    /// Number of rows dropped because their arity did not match the spec
    pub dropped: usize,
}

impl Extraction {
    /// True when the collection had no entities at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.dropped == 0
    }
}

/// Extract all entities of `collection` for the attributes in `spec`
///
/// Column order of every returned row matches `spec`. Returns an empty
/// extraction (logged as a warning) when the collection legitimately has
/// zero entities.
///
/// # Errors
///
/// Returns an error on session-level failures or when an attribute is not
/// supported by the loaded model version.
pub async fn extract(
    provider: &dyn VisumProvider,
    collection: EntityCollection,
    spec: AttributeSpec,
) -> Result<Extraction> {
    let start = Instant::now();
    let raw = provider.get_multiple_attributes(collection, spec).await?;

    tracing::debug!(
        collection = %collection,
        row_count = raw.len(),
        elapsed_secs = format!("{:.2}", start.elapsed().as_secs_f64()),
        "Retrieved rows"
    );

    if raw.is_empty() {
        tracing::warn!(collection = %collection, "No entities retrieved");
        return Ok(Extraction {
            rows: Vec::new(),
            dropped: 0,
        });
    }

    let expected = spec.len();
    let mut rows = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;

    for row in raw {
        if row.len() == expected {
            rows.push(row);
        } else {
            dropped += 1;
            tracing::warn!(
                collection = %collection,
                expected = expected,
                got = row.len(),
                "Row arity mismatch, dropping row"
            );
        }
    }

    if dropped > 0 {
        tracing::warn!(
            collection = %collection,
            dropped = dropped,
            kept = rows.len(),
            "Dropped malformed rows during extraction"
        );
    }

    Ok(Extraction { rows, dropped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AttrValue, TransectError, VisumError};
    use async_trait::async_trait;

    struct FixedProvider {
        rows: Vec<RawRow>,
    }

    #[async_trait]
    impl VisumProvider for FixedProvider {
        async fn load_version(&self, _path: &str) -> Result<()> {
            Ok(())
        }

        async fn get_multiple_attributes(
            &self,
            _collection: EntityCollection,
            _attributes: &[&str],
        ) -> Result<Vec<RawRow>> {
            Ok(self.rows.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl VisumProvider for FailingProvider {
        async fn load_version(&self, _path: &str) -> Result<()> {
            Ok(())
        }

        async fn get_multiple_attributes(
            &self,
            collection: EntityCollection,
            _attributes: &[&str],
        ) -> Result<Vec<RawRow>> {
            Err(TransectError::Visum(VisumError::AttributeQueryFailed {
                collection: collection.to_string(),
                message: "unknown attribute".to_string(),
            }))
        }
    }

    fn num(n: f64) -> AttrValue {
        AttrValue::Number(n)
    }

    #[tokio::test]
    async fn test_extract_keeps_well_formed_rows() {
        let provider = FixedProvider {
            rows: vec![
                vec![num(1.0), num(10.0), num(20.0)],
                vec![num(2.0), num(11.0), num(21.0)],
            ],
        };

        let extraction = extract(
            &provider,
            EntityCollection::Zones,
            &["No", "XCoord", "YCoord"],
        )
        .await
        .unwrap();

        assert_eq!(extraction.rows.len(), 2);
        assert_eq!(extraction.dropped, 0);
    }

    #[tokio::test]
    async fn test_extract_drops_arity_mismatches() {
        let provider = FixedProvider {
            rows: vec![
                vec![num(1.0), num(10.0), num(20.0)],
                vec![num(2.0), num(11.0)], // short row
                vec![num(3.0), num(12.0), num(22.0), num(99.0)], // long row
            ],
        };

        let extraction = extract(
            &provider,
            EntityCollection::Zones,
            &["No", "XCoord", "YCoord"],
        )
        .await
        .unwrap();

        assert_eq!(extraction.rows.len(), 1);
        assert_eq!(extraction.dropped, 2);
        assert_eq!(extraction.rows[0][0], num(1.0));
    }

    #[tokio::test]
    async fn test_extract_empty_collection_is_not_an_error() {
        let provider = FixedProvider { rows: vec![] };

        let extraction = extract(&provider, EntityCollection::StopPoints, &["No"])
            .await
            .unwrap();

        assert!(extraction.is_empty());
    }

    #[tokio::test]
    async fn test_extract_propagates_query_failure() {
        let err = extract(&FailingProvider, EntityCollection::Links, &["No"])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TransectError::Visum(VisumError::AttributeQueryFailed { .. })
        ));
    }
}

//! Visum capability trait
//!
//! The entire contract the export pipeline depends on: load a model version
//! into the running instance, and query multiple attributes for one network
//! collection. Anything beyond these call shapes is out of scope, which
//! keeps the trait small enough to fake in tests without a real Visum
//! process.

use crate::domain::{EntityCollection, RawRow, Result};
use async_trait::async_trait;

/// Capability interface to a connected Visum instance
///
/// Implementations hold an open session; the session is valid for one
/// export run and is implicitly discarded when the process exits.
///
/// # Example
///
/// ```no_run
/// use transect::adapters::visum::VisumProvider;
/// use transect::domain::EntityCollection;
///
/// # async fn example(provider: &dyn VisumProvider) -> transect::domain::Result<()> {
/// provider.load_version("/models/city2030.ver").await?;
/// let rows = provider
///     .get_multiple_attributes(EntityCollection::Zones, &["No", "XCoord", "YCoord"])
///     .await?;
/// println!("retrieved {} zones", rows.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait VisumProvider: Send + Sync {
    /// Load the model version file at `path` into the instance
    ///
    /// Format validation is delegated entirely to Visum; any reported
    /// failure (missing file, corrupt file, version mismatch) surfaces as
    /// [`VisumError::LoadFailed`](crate::domain::VisumError::LoadFailed).
    async fn load_version(&self, path: &str) -> Result<()>;

    /// Query all entities of `collection` for the named attributes
    ///
    /// Returns one row per entity with one value per requested attribute,
    /// in the same order as `attributes`. An empty collection yields an
    /// empty vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error on session-level failures or when an attribute is
    /// not supported by the loaded model version.
    async fn get_multiple_attributes(
        &self,
        collection: EntityCollection,
        attributes: &[&str],
    ) -> Result<Vec<RawRow>>;
}

/// Housekeeping hook run between the two connection attempts
///
/// Dispatch failures are sometimes caused by stale interop metadata cached
/// on disk from a previous run. The connection manager invokes this hook
/// exactly once after a failed first attempt, before retrying. Failures
/// inside the hook must be logged, never propagated.
pub trait RecoveryHook: Send + Sync {
    /// Perform the recovery action
    fn recover(&self);
}

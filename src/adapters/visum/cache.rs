//! Interop manifest cache
//!
//! The bridge negotiates an automation API version when a session is
//! dispatched. The negotiated version is cached on disk between runs so a
//! reconnect can skip negotiation. A stale manifest from an older bridge or
//! Visum installation is a known cause of dispatch failures, so the
//! connection manager's recovery hook wipes the cache between its two
//! connection attempts.

use crate::adapters::visum::provider::RecoveryHook;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";

/// Cached bridge interface metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeManifest {
    /// Automation API version negotiated with the bridge
    pub api_version: String,
}

/// On-disk cache holding the bridge manifest
#[derive(Debug, Clone)]
pub struct ManifestCache {
    dir: PathBuf,
}

impl ManifestCache {
    /// Create a cache rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default cache location under the system temporary directory
    pub fn default_dir() -> PathBuf {
        std::env::temp_dir().join("transect").join("bridge-cache")
    }

    /// Cache directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the cached manifest, if one exists and parses
    ///
    /// An unreadable or corrupt manifest is treated as absent.
    pub fn load(&self) -> Option<BridgeManifest> {
        let path = self.dir.join(MANIFEST_FILE);
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Ignoring corrupt bridge manifest"
                );
                None
            }
        }
    }

    /// Persist the manifest, replacing any previous one
    ///
    /// Cache writes are best-effort; failures are logged and swallowed
    /// because a missing cache only costs a renegotiation on the next run.
    pub fn store(&self, manifest: &BridgeManifest) {
        let path = self.dir.join(MANIFEST_FILE);
        let result = fs::create_dir_all(&self.dir).and_then(|_| {
            let contents = serde_json::to_string_pretty(manifest)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            fs::write(&path, contents)
        });

        if let Err(e) = result {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to write bridge manifest cache"
            );
        }
    }
}

/// Recovery hook that deletes the manifest cache directory
///
/// Invoked by the connection manager between its two dispatch attempts.
/// Deletion failures are logged but do not prevent the retry.
#[derive(Debug)]
pub struct StaleCacheRecovery {
    cache: ManifestCache,
}

impl StaleCacheRecovery {
    /// Create a recovery hook for the given cache
    pub fn new(cache: ManifestCache) -> Self {
        Self { cache }
    }
}

impl RecoveryHook for StaleCacheRecovery {
    fn recover(&self) {
        let dir = self.cache.dir();
        if !dir.exists() {
            tracing::info!(dir = %dir.display(), "Bridge manifest cache not found, nothing to clear");
            return;
        }

        match fs::remove_dir_all(dir) {
            Ok(()) => {
                tracing::info!(dir = %dir.display(), "Cleared bridge manifest cache");
            }
            Err(e) => {
                tracing::error!(
                    dir = %dir.display(),
                    error = %e,
                    "Failed to clear bridge manifest cache"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_manifest() {
        let temp = TempDir::new().unwrap();
        let cache = ManifestCache::new(temp.path().join("cache"));
        assert!(cache.load().is_none());
    }

    #[test]
    fn test_store_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let cache = ManifestCache::new(temp.path().join("cache"));

        let manifest = BridgeManifest {
            api_version: "24.01".to_string(),
        };
        cache.store(&manifest);

        assert_eq!(cache.load(), Some(manifest));
    }

    #[test]
    fn test_corrupt_manifest_treated_as_absent() {
        let temp = TempDir::new().unwrap();
        let cache = ManifestCache::new(temp.path().to_path_buf());
        fs::write(temp.path().join(MANIFEST_FILE), "not json").unwrap();

        assert!(cache.load().is_none());
    }

    #[test]
    fn test_recovery_deletes_cache_dir() {
        let temp = TempDir::new().unwrap();
        let cache_dir = temp.path().join("cache");
        let cache = ManifestCache::new(&cache_dir);
        cache.store(&BridgeManifest {
            api_version: "24.01".to_string(),
        });
        assert!(cache_dir.exists());

        StaleCacheRecovery::new(cache).recover();
        assert!(!cache_dir.exists());
    }

    #[test]
    fn test_recovery_on_missing_dir_is_harmless() {
        let temp = TempDir::new().unwrap();
        let cache = ManifestCache::new(temp.path().join("never-created"));
        StaleCacheRecovery::new(cache).recover();
    }
}

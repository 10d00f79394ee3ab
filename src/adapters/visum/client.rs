//! Connection manager
//!
//! Opens the single session used for an export run. A failed first dispatch
//! triggers the recovery hook (by default wiping the interop manifest
//! cache), a fixed short delay, and exactly one retry; if the retry also
//! fails the run is over before it started.

use crate::adapters::visum::bridge::BridgeProvider;
use crate::adapters::visum::cache::{ManifestCache, StaleCacheRecovery};
use crate::adapters::visum::provider::{RecoveryHook, VisumProvider};
use crate::config::VisumConfig;
use crate::domain::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Handle to one connected Visum instance
///
/// Owned exclusively by the orchestrator for the duration of one export
/// run; never shared across runs.
pub struct VisumClient {
    provider: Arc<dyn VisumProvider>,
}

impl VisumClient {
    /// Connect to the Visum instance behind the configured bridge
    ///
    /// Uses [`StaleCacheRecovery`] as the hook between the two dispatch
    /// attempts.
    ///
    /// # Errors
    ///
    /// Returns the second attempt's error when both dispatches fail. This
    /// is fatal to the run.
    pub async fn connect(config: &VisumConfig) -> Result<Self> {
        let cache = match &config.cache_dir {
            Some(dir) => ManifestCache::new(dir),
            None => ManifestCache::new(ManifestCache::default_dir()),
        };
        let hook = StaleCacheRecovery::new(cache.clone());
        Self::connect_with_hook(config, cache, &hook).await
    }

    /// Connect with an explicit recovery hook
    pub async fn connect_with_hook(
        config: &VisumConfig,
        cache: ManifestCache,
        hook: &dyn RecoveryHook,
    ) -> Result<Self> {
        let retry_delay = Duration::from_millis(config.connect_retry_delay_ms);
        let start = Instant::now();

        let provider = connect_with_retry(
            || BridgeProvider::dispatch(config, &cache),
            hook,
            retry_delay,
        )
        .await?;

        tracing::info!(
            elapsed_secs = format!("{:.2}", start.elapsed().as_secs_f64()),
            "Visum connection established"
        );

        Ok(Self {
            provider: Arc::new(provider),
        })
    }

    /// The capability interface backed by this connection
    pub fn provider(&self) -> Arc<dyn VisumProvider> {
        self.provider.clone()
    }
}

/// Run `attempt` once; on failure invoke `hook`, wait, and retry exactly once
///
/// The first error is logged, the second is returned. The hook runs exactly
/// once, only between the attempts.
pub async fn connect_with_retry<T, F, Fut>(
    mut attempt: F,
    hook: &dyn RecoveryHook,
    retry_delay: Duration,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    match attempt().await {
        Ok(value) => Ok(value),
        Err(first) => {
            tracing::warn!(
                error = %first,
                "Connection attempt failed, running recovery and retrying once"
            );
            hook.recover();
            tokio::time::sleep(retry_delay).await;

            attempt().await.map_err(|second| {
                tracing::error!(error = %second, "Connection retry failed");
                second
            })
        }
    }
}

//! Visum automation bridge client
//!
//! Concrete [`VisumProvider`] talking JSON over HTTP to the automation
//! bridge that fronts a running Visum instance. The bridge exposes the COM
//! automation surface as three endpoints: dispatch a session, load a model
//! version, and query multiple attributes for one network collection.
//!
//! Every request goes through a client built with an explicit timeout; the
//! COM interface underneath has none, and a hung call would otherwise block
//! the whole run indefinitely.

use crate::adapters::visum::cache::{BridgeManifest, ManifestCache};
use crate::adapters::visum::provider::VisumProvider;
use crate::config::VisumConfig;
use crate::domain::{AttrValue, EntityCollection, RawRow, Result, TransectError, VisumError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP client for one dispatched bridge session
///
/// Created by [`BridgeProvider::dispatch`], which corresponds to
/// `Dispatch(applicationId)` on the automation side. The session is held
/// exclusively for the lifetime of one export run; there is no explicit
/// teardown contract with the bridge.
#[derive(Debug)]
pub struct BridgeProvider {
    /// Base URL of the automation bridge
    base_url: String,

    /// Session identifier returned by the dispatch call
    session_id: String,

    /// Automation API version negotiated for this session
    api_version: String,

    /// HTTP client with request timeouts applied
    client: Client,
}

#[derive(Serialize)]
struct DispatchRequest<'a> {
    application_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_version: Option<&'a str>,
}

#[derive(Deserialize)]
struct DispatchResponse {
    session_id: String,
    api_version: String,
}

#[derive(Serialize)]
struct LoadVersionRequest<'a> {
    path: &'a str,
}

#[derive(Serialize)]
struct MultiAttributesRequest<'a> {
    attributes: &'a [&'a str],
}

#[derive(Deserialize)]
struct MultiAttributesResponse {
    rows: Vec<Vec<AttrValue>>,
}

impl BridgeProvider {
    /// Dispatch a new session on the bridge
    ///
    /// Sends the cached API version when one is present so the bridge can
    /// skip negotiation; the negotiated version is written back to the
    /// cache on success.
    ///
    /// # Errors
    ///
    /// Returns [`VisumError::DispatchFailed`] if the bridge is unreachable
    /// or refuses the session, [`VisumError::Timeout`] if the request
    /// exceeds the configured timeout.
    pub async fn dispatch(config: &VisumConfig, cache: &ManifestCache) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                TransectError::Visum(VisumError::DispatchFailed(format!(
                    "Failed to build HTTP client: {e}"
                )))
            })?;

        let base_url = config.bridge_url.trim_end_matches('/').to_string();
        let cached = cache.load();

        let request = DispatchRequest {
            application_id: &config.application_id,
            api_version: cached.as_ref().map(|m| m.api_version.as_str()),
        };

        tracing::debug!(
            bridge_url = %base_url,
            application_id = %config.application_id,
            cached_api_version = ?cached.as_ref().map(|m| &m.api_version),
            "Dispatching Visum session"
        );

        let url = format!("{base_url}/api/v1/session");
        let response = client.post(&url).json(&request).send().await.map_err(|e| {
            if e.is_timeout() {
                TransectError::Visum(VisumError::Timeout(format!("dispatch: {e}")))
            } else {
                TransectError::Visum(VisumError::DispatchFailed(e.to_string()))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransectError::Visum(VisumError::DispatchFailed(format!(
                "bridge returned {status}: {body}"
            ))));
        }

        let parsed: DispatchResponse = response.json().await.map_err(|e| {
            TransectError::Visum(VisumError::InvalidResponse(format!(
                "dispatch response: {e}"
            )))
        })?;

        cache.store(&BridgeManifest {
            api_version: parsed.api_version.clone(),
        });

        tracing::info!(
            session_id = %parsed.session_id,
            api_version = %parsed.api_version,
            "Visum session dispatched"
        );

        Ok(Self {
            base_url,
            session_id: parsed.session_id,
            api_version: parsed.api_version,
            client,
        })
    }

    /// Session identifier on the bridge
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Negotiated automation API version
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    fn session_url(&self, suffix: &str) -> String {
        format!(
            "{}/api/v1/session/{}/{}",
            self.base_url, self.session_id, suffix
        )
    }

    /// Map a non-success load-version response to a domain error
    async fn load_failure(response: reqwest::Response) -> TransectError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::GONE {
            TransectError::Visum(VisumError::SessionExpired(body))
        } else {
            TransectError::Visum(VisumError::LoadFailed(format!(
                "bridge returned {status}: {body}"
            )))
        }
    }
}

#[async_trait]
impl VisumProvider for BridgeProvider {
    async fn load_version(&self, path: &str) -> Result<()> {
        let url = self.session_url("load-version");
        tracing::debug!(path = %path, "Requesting model version load");

        let response = self
            .client
            .post(&url)
            .json(&LoadVersionRequest { path })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransectError::Visum(VisumError::Timeout(format!("load-version: {e}")))
                } else {
                    TransectError::Visum(VisumError::LoadFailed(e.to_string()))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::load_failure(response).await);
        }

        Ok(())
    }

    async fn get_multiple_attributes(
        &self,
        collection: EntityCollection,
        attributes: &[&str],
    ) -> Result<Vec<RawRow>> {
        let url = self.session_url(&format!("net/{}/multi-attributes", collection.bridge_segment()));
        tracing::debug!(
            collection = %collection,
            attribute_count = attributes.len(),
            "Querying multiple attributes"
        );

        let response = self
            .client
            .post(&url)
            .json(&MultiAttributesRequest { attributes })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransectError::Visum(VisumError::Timeout(format!("multi-attributes: {e}")))
                } else {
                    TransectError::Visum(VisumError::AttributeQueryFailed {
                        collection: collection.to_string(),
                        message: e.to_string(),
                    })
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::GONE {
                return Err(TransectError::Visum(VisumError::SessionExpired(body)));
            }
            return Err(TransectError::Visum(VisumError::AttributeQueryFailed {
                collection: collection.to_string(),
                message: format!("bridge returned {status}: {body}"),
            }));
        }

        let parsed: MultiAttributesResponse = response.json().await.map_err(|e| {
            TransectError::Visum(VisumError::InvalidResponse(format!(
                "multi-attributes response for {collection}: {e}"
            )))
        })?;

        Ok(parsed.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(bridge_url: String) -> VisumConfig {
        VisumConfig {
            bridge_url,
            application_id: "Visum.Visum".to_string(),
            model_path: "/models/test.ver".to_string(),
            timeout_seconds: 5,
            connect_retry_delay_ms: 0,
            cache_dir: None,
        }
    }

    #[tokio::test]
    async fn test_dispatch_success_populates_session_and_cache() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/session")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"session_id": "s-1", "api_version": "24.01"}"#)
            .create_async()
            .await;

        let temp = TempDir::new().unwrap();
        let cache = ManifestCache::new(temp.path().join("cache"));
        let provider = BridgeProvider::dispatch(&test_config(server.url()), &cache)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(provider.session_id(), "s-1");
        assert_eq!(provider.api_version(), "24.01");
        assert_eq!(cache.load().unwrap().api_version, "24.01");
    }

    #[tokio::test]
    async fn test_dispatch_failure_maps_to_dispatch_failed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/session")
            .with_status(503)
            .with_body("no Visum instance available")
            .create_async()
            .await;

        let temp = TempDir::new().unwrap();
        let cache = ManifestCache::new(temp.path().join("cache"));
        let err = BridgeProvider::dispatch(&test_config(server.url()), &cache)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TransectError::Visum(VisumError::DispatchFailed(_))
        ));
        assert!(err.to_string().contains("no Visum instance available"));
    }

    #[tokio::test]
    async fn test_load_version_error_maps_to_load_failed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/session")
            .with_status(200)
            .with_body(r#"{"session_id": "s-1", "api_version": "24.01"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/api/v1/session/s-1/load-version")
            .with_status(422)
            .with_body("version file is corrupt")
            .create_async()
            .await;

        let temp = TempDir::new().unwrap();
        let cache = ManifestCache::new(temp.path().join("cache"));
        let provider = BridgeProvider::dispatch(&test_config(server.url()), &cache)
            .await
            .unwrap();

        let err = provider.load_version("/models/broken.ver").await.unwrap_err();
        assert!(matches!(err, TransectError::Visum(VisumError::LoadFailed(_))));
    }

    #[tokio::test]
    async fn test_get_multiple_attributes_parses_rows() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/session")
            .with_status(200)
            .with_body(r#"{"session_id": "s-1", "api_version": "24.01"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/api/v1/session/s-1/net/zones/multi-attributes")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"rows": [[1, 53.25, 10.4], [2, 53.3, 10.5]]}"#)
            .create_async()
            .await;

        let temp = TempDir::new().unwrap();
        let cache = ManifestCache::new(temp.path().join("cache"));
        let provider = BridgeProvider::dispatch(&test_config(server.url()), &cache)
            .await
            .unwrap();

        let rows = provider
            .get_multiple_attributes(EntityCollection::Zones, &["No", "XCoord", "YCoord"])
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], AttrValue::Number(1.0));
        assert_eq!(rows[1][2], AttrValue::Number(10.5));
    }

    #[tokio::test]
    async fn test_unknown_attribute_maps_to_query_failed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/session")
            .with_status(200)
            .with_body(r#"{"session_id": "s-1", "api_version": "24.01"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/api/v1/session/s-1/net/links/multi-attributes")
            .with_status(400)
            .with_body("unknown attribute: VolVehPrT(XX)")
            .create_async()
            .await;

        let temp = TempDir::new().unwrap();
        let cache = ManifestCache::new(temp.path().join("cache"));
        let provider = BridgeProvider::dispatch(&test_config(server.url()), &cache)
            .await
            .unwrap();

        let err = provider
            .get_multiple_attributes(EntityCollection::Links, &["No", "VolVehPrT(XX)"])
            .await
            .unwrap_err();

        match err {
            TransectError::Visum(VisumError::AttributeQueryFailed { collection, .. }) => {
                assert_eq!(collection, "Links");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

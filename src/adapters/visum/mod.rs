//! PTV Visum adapter
//!
//! Visum is reached through an automation bridge: a small HTTP service that
//! wraps the COM automation interface of a running Visum instance. This
//! module provides the capability trait the export pipeline consumes
//! ([`VisumProvider`]), the concrete bridge client ([`BridgeProvider`]), and
//! the connection manager ([`VisumClient`]) with its cache-invalidating
//! retry behavior.

pub mod bridge;
pub mod cache;
pub mod client;
pub mod provider;

pub use bridge::BridgeProvider;
pub use cache::{ManifestCache, StaleCacheRecovery};
pub use client::VisumClient;
pub use provider::{RecoveryHook, VisumProvider};

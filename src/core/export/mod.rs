//! Export orchestration
//!
//! Sequencing of the full run: connect, load the model version, then one
//! extract/transform/write cycle per entity kind with per-kind failure
//! isolation.

pub mod orchestrator;
pub mod profiles;
pub mod summary;

pub use orchestrator::{ExportOptions, ExportOrchestrator};
pub use profiles::{profile_for, ExportProfile, PROFILES};
pub use summary::{KindOutcome, KindReport, RunSummary};

//! Business logic
//!
//! The export pipeline: attribute extraction, field transformation, CSV
//! writing, and the orchestrator that sequences them per entity kind.

pub mod export;
pub mod extract;
pub mod transform;
pub mod write;

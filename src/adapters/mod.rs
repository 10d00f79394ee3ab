//! External integrations
//!
//! Adapters isolate the rest of the crate from the concrete mechanism used
//! to reach the external transportation-modeling application.

pub mod visum;

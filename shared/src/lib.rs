//! Shared types for the catalog aggregation pipeline
//!
//! Contains the catalog data model, the ranking inputs and the logging
//! helpers used by every component of the workspace.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;

//! Shared types and models for the Crop Advisory Platform
//!
//! This crate contains the domain types shared between the backend and other
//! components of the system: crop threshold profiles, synthetic telemetry,
//! the alert evaluator and report aggregator, and recommendation types.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;

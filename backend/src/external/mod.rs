//! External collaborators
//!
//! The classifier/scaler artifacts, the geolocation lookup, and the
//! generative-text service are modelled as capability traits so tests can
//! substitute deterministic fakes.

pub mod classifier;
pub mod generative;
pub mod geolocation;

pub use classifier::ArtifactScorer;
pub use generative::GenerativeClient;
pub use geolocation::GeoClient;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppResult;
use shared::{FieldReadings, RankedCrop, Season};

/// Ranks candidate crops for a set of soil/climate readings
pub trait CropScorer: Send + Sync {
    /// Returns (crop, probability) pairs sorted descending by probability
    fn rank_crops(&self, readings: &FieldReadings) -> AppResult<Vec<RankedCrop>>;
}

/// Country resolved from the caller's network address
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedLocation {
    pub country: String,
    pub country_code: String,
}

/// Infers the caller's location from their network address
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve(&self) -> AppResult<ResolvedLocation>;
}

/// Delegates seasonal-demand reasoning to a hosted text-generation service
#[async_trait]
pub trait SeasonalAdvisor: Send + Sync {
    /// Crops currently in demand for a location and season, lowercased
    async fn seasonal_crops(&self, location: &str, season: Season) -> AppResult<Vec<String>>;

    /// Alternative crop suggestions for raw field conditions, lowercased
    async fn alternative_crops(&self, readings: &FieldReadings) -> AppResult<Vec<String>>;
}

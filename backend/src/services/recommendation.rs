//! Recommendation service
//!
//! Pipeline: classifier ranking → seasonal-demand filter → intersected
//! final list. An empty intersection falls back to generic
//! environmental-adjustment advice derived locally from the raw readings,
//! optionally enriched with alternative-crop suggestions from the advisor.

use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::{CropScorer, SeasonalAdvisor};
use shared::{adaptation_tips, cultivation_advice, filter_by_demand, FieldReadings, Season};

/// At most this many crops are returned, mirroring the dashboard display
const MAX_RECOMMENDATIONS: usize = 10;

/// One recommended crop with its suitability and cultivation guidance
#[derive(Debug, Serialize)]
pub struct CropRecommendation {
    pub name: String,
    pub probability: f64,
    pub advice: String,
}

/// Result of one recommendation request
#[derive(Debug, Serialize)]
pub struct RecommendationOutcome {
    /// Final ranked list; empty when no crop matched seasonal demand
    pub recommendations: Vec<CropRecommendation>,
    /// Fallback adjustment advice; populated only when the list is empty
    pub adaptation_tips: Vec<String>,
    /// Advisor-suggested alternatives; populated only on the fallback path
    pub alternative_crops: Vec<String>,
    /// Inline error from the scaling step, if any
    pub error: Option<String>,
}

/// Recommendation service
#[derive(Clone)]
pub struct RecommendationService {
    scorer: Arc<dyn CropScorer>,
    advisor: Arc<dyn SeasonalAdvisor>,
}

impl RecommendationService {
    pub fn new(scorer: Arc<dyn CropScorer>, advisor: Arc<dyn SeasonalAdvisor>) -> Self {
        Self { scorer, advisor }
    }

    /// Run the full pipeline for one set of field readings
    pub async fn recommend(
        &self,
        readings: &FieldReadings,
        location: &str,
        season: Season,
    ) -> AppResult<RecommendationOutcome> {
        readings
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        // Scaling failures are reported inline with an empty ranking, not
        // propagated as a request failure.
        let (ranked, scaling_error) = match self.scorer.rank_crops(readings) {
            Ok(ranked) => (ranked, None),
            Err(AppError::ScalingError(msg)) => {
                tracing::warn!("Feature scaling failed: {}", msg);
                (Vec::new(), Some(format!("Error during scaling: {}", msg)))
            }
            Err(e) => return Err(e),
        };

        let in_demand = self.advisor.seasonal_crops(location, season).await?;
        let matched = filter_by_demand(&ranked, &in_demand);

        if !matched.is_empty() {
            let recommendations = matched
                .into_iter()
                .take(MAX_RECOMMENDATIONS)
                .map(|crop| CropRecommendation {
                    advice: cultivation_advice(&crop.name).to_string(),
                    name: crop.name,
                    probability: crop.probability,
                })
                .collect();

            return Ok(RecommendationOutcome {
                recommendations,
                adaptation_tips: Vec::new(),
                alternative_crops: Vec::new(),
                error: None,
            });
        }

        tracing::info!(
            "No ranked crop matched seasonal demand for {} ({})",
            location,
            season.as_str()
        );

        // Advisor failures here only lose the alternatives list; the local
        // adjustment advice still comes back non-empty.
        let alternative_crops = match self.advisor.alternative_crops(readings).await {
            Ok(crops) => crops,
            Err(e) => {
                tracing::warn!("Alternative-crop lookup failed: {}", e);
                Vec::new()
            }
        };

        Ok(RecommendationOutcome {
            recommendations: Vec::new(),
            adaptation_tips: adaptation_tips(readings),
            alternative_crops,
            error: scaling_error,
        })
    }
}

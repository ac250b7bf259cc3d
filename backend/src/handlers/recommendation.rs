//! Crop recommendation handlers

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::error::AppError;
use crate::middleware::CurrentSession;
use crate::services::recommendation::RecommendationOutcome;
use crate::services::RecommendationService;
use crate::AppState;
use shared::{FieldReadings, Page, Season};

#[derive(Serialize)]
pub struct RecommendationResponse {
    pub country: String,
    pub season: Season,
    #[serde(flatten)]
    pub outcome: RecommendationOutcome,
}

/// Recommendation endpoint handler. Requires a session on the dashboard
/// page with location granted.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Json(readings): Json<FieldReadings>,
) -> Result<Json<RecommendationResponse>, AppError> {
    if session.page != Page::Dashboard {
        return Err(AppError::InvalidStateTransition(
            "Recommendations are only available from the dashboard".to_string(),
        ));
    }

    let (country, season) = match (session.country.as_deref(), session.season) {
        (Some(country), Some(season)) => (country.to_string(), season),
        _ => {
            return Err(AppError::InvalidStateTransition(
                "Grant location access before requesting recommendations".to_string(),
            ));
        }
    };

    let service = RecommendationService::new(state.scorer.clone(), state.advisor.clone());
    let outcome = service.recommend(&readings, &country, season).await?;

    Ok(Json(RecommendationResponse {
        country,
        season,
        outcome,
    }))
}

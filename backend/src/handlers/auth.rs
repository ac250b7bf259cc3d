//! Authentication handlers

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::middleware::CurrentSession;
use crate::services::session::SessionView;
use crate::services::SessionService;
use crate::AppState;
use shared::{Page, Season};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub page: Page,
}

#[derive(Serialize)]
pub struct LocationResponse {
    pub country: Option<String>,
    pub season: Option<Season>,
    pub page: Page,
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let service = SessionService::new(state.sessions.clone(), state.config.clone());
    let session = service.login(&body.username, &body.password).await?;

    Ok(Json(LoginResponse {
        token: session.token.to_string(),
        page: session.page,
    }))
}

/// Location grant endpoint handler. Infers the caller's country from their
/// network address; success moves the session to the dashboard.
pub async fn grant_location(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Result<Json<LocationResponse>, AppError> {
    let service = SessionService::new(state.sessions.clone(), state.config.clone());
    let session = service
        .grant_location(session.token, state.locator.as_ref())
        .await?;

    let view = SessionView::from(&session);
    Ok(Json(LocationResponse {
        country: view.country,
        season: view.season,
        page: view.page,
    }))
}

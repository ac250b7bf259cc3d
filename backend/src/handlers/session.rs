//! Session state and navigation handlers

use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::CurrentSession;
use crate::services::session::SessionView;
use crate::services::SessionService;
use crate::AppState;
use shared::Page;

#[derive(Deserialize)]
pub struct NavigateRequest {
    pub page: Page,
}

/// Return the current session state
pub async fn get_session(
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Json<SessionView> {
    Json(SessionView::from(&session))
}

/// Explicit page navigation endpoint handler
pub async fn navigate(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Json(body): Json<NavigateRequest>,
) -> Result<Json<SessionView>, AppError> {
    let service = SessionService::new(state.sessions.clone(), state.config.clone());
    let session = service.navigate(session.token, body.page).await?;
    Ok(Json(SessionView::from(&session)))
}

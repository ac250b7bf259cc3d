//! Session authentication middleware
//!
//! Resolves the bearer session token on protected routes and injects the
//! current session into request extensions.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::error::{ErrorDetail, ErrorResponse};
use crate::services::session::Session;
use crate::AppState;

/// The session resolved for the current request
#[derive(Clone, Debug)]
pub struct CurrentSession(pub Session);

/// Middleware that resolves the session token from the Authorization header
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    let token = match Uuid::parse_str(token) {
        Ok(token) => token,
        Err(_) => return unauthorized_response("Malformed session token"),
    };

    let session = {
        let sessions = state.sessions.read().await;
        sessions.get(&token).cloned()
    };

    match session {
        Some(session) => {
            request.extensions_mut().insert(CurrentSession(session));
            next.run(request).await
        }
        None => unauthorized_response("Session not found or expired"),
    }
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
        },
    };

    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

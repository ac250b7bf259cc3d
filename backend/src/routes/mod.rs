//! Route definitions for the Crop Advisory Platform

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::session_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .route("/auth/login", post(handlers::login))
        // Protected routes - session-scoped views
        .merge(protected_routes(state))
}

/// Session-protected routes
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/location", post(handlers::grant_location))
        .route("/session", get(handlers::get_session))
        .route("/session/navigate", post(handlers::navigate))
        .route("/recommendations", post(handlers::recommend))
        .route("/monitoring/:crop", get(handlers::monitoring_view))
        .route_layer(middleware::from_fn_with_state(state, session_middleware))
}

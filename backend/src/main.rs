//! Crop Advisory Platform - Backend Server
//!
//! An interactive advisory service: users log in, location is inferred from
//! their network address, a pre-trained classifier suggests crops for their
//! soil and climate readings, a hosted language model filters those by
//! seasonal demand, and a monitoring view simulates sensor readings against
//! crop-specific thresholds to raise alerts.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{routing::get, Router};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::RwLock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

mod config;
mod error;
mod external;
mod handlers;
mod middleware;
mod routes;
mod services;

pub use config::Config;

use external::{ArtifactScorer, CropScorer, GenerativeClient, GeoClient, LocationResolver, SeasonalAdvisor};
use services::session::Session;

/// Shared handle to the in-memory session table
pub type SessionStore = Arc<RwLock<HashMap<Uuid, Session>>>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionStore,
    pub scorer: Arc<dyn CropScorer>,
    pub locator: Arc<dyn LocationResolver>,
    pub advisor: Arc<dyn SeasonalAdvisor>,
    /// Process-wide telemetry random source, seeded once at startup
    pub telemetry_rng: Arc<Mutex<StdRng>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "advisor_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Crop Advisory Server");
    tracing::info!("Environment: {}", config.environment);

    // Sanity-check the built-in threshold table before serving
    for (name, thresholds) in shared::all_crop_thresholds() {
        shared::validate_threshold_profile(thresholds)
            .map_err(|e| anyhow::anyhow!("invalid threshold profile for {}: {}", name, e))?;
    }

    // Load the pre-trained classifier and scaler artifacts
    tracing::info!("Loading classifier artifacts...");
    let scorer = ArtifactScorer::load(
        &config.artifacts.scaler_path,
        &config.artifacts.model_path,
    )?;
    tracing::info!("Classifier loaded ({} classes)", scorer.class_count());

    let locator = GeoClient::new(config.geolocation.base_url.clone());
    let advisor = GenerativeClient::new(
        config.generative.api_endpoint.clone(),
        config.generative.api_key.clone(),
        config.generative.model.clone(),
    );

    // Create application state
    let state = AppState {
        sessions: Arc::new(RwLock::new(HashMap::new())),
        scorer: Arc::new(scorer),
        locator: Arc::new(locator),
        advisor: Arc::new(advisor),
        telemetry_rng: Arc::new(Mutex::new(StdRng::seed_from_u64(config.monitoring.seed))),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Crop Advisory Platform API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

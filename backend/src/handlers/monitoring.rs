//! Monitoring view handlers

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::CurrentSession;
use crate::services::monitoring::ALERT_REPORT_FILENAME;
use crate::services::MonitoringService;
use crate::AppState;
use shared::Page;

#[derive(Deserialize)]
pub struct MonitoringQuery {
    /// "json" (default) or "csv"
    pub format: Option<String>,
}

/// Monitoring view endpoint handler. Generates a fresh telemetry series
/// for the crop, evaluates alerts, and returns the view as JSON or the
/// alert report as a CSV download.
pub async fn monitoring_view(
    State(state): State<AppState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    Path(crop): Path<String>,
    Query(query): Query<MonitoringQuery>,
) -> Result<Response, AppError> {
    if session.page != Page::Monitoring {
        return Err(AppError::InvalidStateTransition(
            "Navigate to the monitoring page first".to_string(),
        ));
    }

    let report = {
        let mut rng = state
            .telemetry_rng
            .lock()
            .map_err(|_| AppError::Internal("telemetry random source poisoned".to_string()))?;
        MonitoringService::render(&crop, &mut *rng)?
    };

    if query.format.as_deref() == Some("csv") {
        let csv = MonitoringService::export_to_csv(&report.report)?;
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", ALERT_REPORT_FILENAME),
                ),
            ],
            csv,
        )
            .into_response());
    }

    Ok(Json(report).into_response())
}

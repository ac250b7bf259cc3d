//! Monitoring service: telemetry simulation, alert evaluation, CSV export
//!
//! Each render generates a fresh 24-hour telemetry series for the selected
//! crop, evaluates it against the crop's thresholds, and aggregates the
//! fired alerts into a downloadable report. Nothing is cached across
//! renders.

use rand::Rng;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use shared::{alert_log, build_report, crop_thresholds, AlertRow, HourlyAlerts, TelemetrySeries};

/// Filename offered for the downloadable alert report
pub const ALERT_REPORT_FILENAME: &str = "crop_alert_report.csv";

/// One monitoring-view render for a crop
#[derive(Debug, Serialize)]
pub struct MonitoringReport {
    pub crop: String,
    pub series: TelemetrySeries,
    pub alert_log: Vec<HourlyAlerts>,
    pub report: Vec<AlertRow>,
}

/// Monitoring service
pub struct MonitoringService;

impl MonitoringService {
    /// Render the monitoring view for a crop, drawing telemetry from the
    /// supplied random source.
    pub fn render<R: Rng>(crop: &str, rng: &mut R) -> AppResult<MonitoringReport> {
        let thresholds =
            crop_thresholds(crop).ok_or_else(|| AppError::UnknownCrop(crop.to_string()))?;

        let series = TelemetrySeries::generate(thresholds, rng)?;
        let log = alert_log(&series, thresholds);
        let report = build_report(&log);

        tracing::debug!(
            "Monitoring render for {}: {} alert rows over 24 hours",
            crop,
            report.len()
        );

        Ok(MonitoringReport {
            crop: crop.to_string(),
            series,
            alert_log: log,
            report,
        })
    }

    /// Export report rows as CSV with the stable `Hour,Alert,Treatment`
    /// header, present even when no alert fired.
    pub fn export_to_csv(rows: &[AlertRow]) -> AppResult<String> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        wtr.write_record(["Hour", "Alert", "Treatment"])
            .map_err(|e| AppError::Internal(format!("CSV header error: {}", e)))?;
        for row in rows {
            wtr.serialize(row)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

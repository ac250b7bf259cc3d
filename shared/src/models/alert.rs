//! Threshold alert evaluation and report aggregation
//!
//! Seven independent predicates are checked per hourly sample, in a fixed
//! order. Each fired predicate contributes one (alert, treatment) pair.
//! The aggregator flattens the per-hour results into a chronological report.

use serde::{Deserialize, Serialize};

use super::crop::CropThresholds;
use super::telemetry::{TelemetrySeries, HOURS_PER_DAY};

/// One row of the exported alert report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertRow {
    #[serde(rename = "Hour")]
    pub hour: u32,
    #[serde(rename = "Alert")]
    pub alert: String,
    #[serde(rename = "Treatment")]
    pub treatment: String,
}

/// Alerts raised at one hour, in predicate-evaluation order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyAlerts {
    /// 1-based hour of day
    pub hour: u32,
    pub alerts: Vec<String>,
    pub treatments: Vec<String>,
}

/// Evaluate the seven threshold predicates for one hourly sample.
///
/// `hour` is the 0-based sample index (0..23). Predicates are stateless and
/// independent; any subset may fire. Returns parallel (alerts, treatments)
/// sequences of equal length, in predicate-evaluation order.
pub fn evaluate_hour(
    hour: usize,
    series: &TelemetrySeries,
    thresholds: &CropThresholds,
) -> (Vec<String>, Vec<String>) {
    let mut alerts = Vec::new();
    let mut treatments = Vec::new();

    if series.temperature[hour] > thresholds.temp_max {
        alerts.push(format!("🔥 High Temp ({:.1}°C)", series.temperature[hour]));
        treatments.push("✅ Shade crops and use cooling systems.".to_string());
    }
    if series.humidity[hour] < thresholds.humidity_min {
        alerts.push(format!("💧 Low Humidity ({:.1}%)", series.humidity[hour]));
        treatments
            .push("✅ Irrigate plants or increase humidity with misting systems.".to_string());
    }
    if series.ph[hour] < thresholds.ph_min {
        alerts.push(format!("⚠️ pH too low ({:.2})", series.ph[hour]));
        treatments.push("✅ Apply pH-raising amendments like lime.".to_string());
    }
    if series.ph[hour] > thresholds.ph_max {
        alerts.push(format!("⚠️ pH too high ({:.2})", series.ph[hour]));
        treatments.push("✅ Apply pH-lowering amendments like sulfur.".to_string());
    }
    if series.nitrogen[hour] < thresholds.n_min {
        alerts.push(format!("🌱 Low Nitrogen ({})", series.nitrogen[hour] as i64));
        treatments.push("✅ Apply nitrogen-rich fertilizers.".to_string());
    }
    if series.potassium[hour] < thresholds.k_min {
        alerts.push(format!("🌿 Low Potassium ({})", series.potassium[hour] as i64));
        treatments.push("✅ Apply potassium fertilizers.".to_string());
    }
    if series.rainfall[hour] < thresholds.rain_min {
        alerts.push(format!("🌧 Low Rainfall ({:.1} mm)", series.rainfall[hour]));
        treatments.push("✅ Increase irrigation or use water-saving techniques.".to_string());
    }

    (alerts, treatments)
}

/// Build the per-hour alert log for a full day. Hours with no fired
/// predicate contribute nothing.
pub fn alert_log(series: &TelemetrySeries, thresholds: &CropThresholds) -> Vec<HourlyAlerts> {
    (0..HOURS_PER_DAY)
        .filter_map(|hour| {
            let (alerts, treatments) = evaluate_hour(hour, series, thresholds);
            if alerts.is_empty() {
                None
            } else {
                Some(HourlyAlerts {
                    hour: hour as u32 + 1,
                    alerts,
                    treatments,
                })
            }
        })
        .collect()
}

/// Flatten an alert log into report rows: hours ascending 1..=24, and
/// within an hour, predicate-evaluation order.
pub fn build_report(log: &[HourlyAlerts]) -> Vec<AlertRow> {
    log.iter()
        .flat_map(|entry| {
            entry
                .alerts
                .iter()
                .zip(entry.treatments.iter())
                .map(|(alert, treatment)| AlertRow {
                    hour: entry.hour,
                    alert: alert.clone(),
                    treatment: treatment.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::crop::crop_thresholds;

    /// A series where every factor sits at the crop's safe midpoint
    fn safe_series(t: &CropThresholds) -> TelemetrySeries {
        TelemetrySeries {
            nitrogen: vec![t.n_min + 20.0; HOURS_PER_DAY],
            phosphorus: vec![70.0; HOURS_PER_DAY],
            potassium: vec![t.k_min + 20.0; HOURS_PER_DAY],
            temperature: vec![t.temp_max - 3.0; HOURS_PER_DAY],
            humidity: vec![t.humidity_min + 10.0; HOURS_PER_DAY],
            ph: vec![(t.ph_min + t.ph_max) / 2.0; HOURS_PER_DAY],
            rainfall: vec![t.rain_min + 30.0; HOURS_PER_DAY],
        }
    }

    /// A series violating every threshold at once (pH below its window,
    /// which also keeps the pH-too-high predicate from firing)
    fn extreme_series(t: &CropThresholds) -> TelemetrySeries {
        TelemetrySeries {
            nitrogen: vec![t.n_min - 5.0; HOURS_PER_DAY],
            phosphorus: vec![70.0; HOURS_PER_DAY],
            potassium: vec![t.k_min - 5.0; HOURS_PER_DAY],
            temperature: vec![t.temp_max + 5.0; HOURS_PER_DAY],
            humidity: vec![t.humidity_min - 10.0; HOURS_PER_DAY],
            ph: vec![t.ph_min - 0.5; HOURS_PER_DAY],
            rainfall: vec![t.rain_min - 30.0; HOURS_PER_DAY],
        }
    }

    #[test]
    fn test_safe_midpoint_fires_nothing() {
        for crop in ["Rice", "Wheat", "Maize", "Barley"] {
            let t = crop_thresholds(crop).unwrap();
            let series = safe_series(t);
            for hour in 0..HOURS_PER_DAY {
                let (alerts, treatments) = evaluate_hour(hour, &series, t);
                assert!(alerts.is_empty(), "{crop} hour {hour}: {alerts:?}");
                assert!(treatments.is_empty());
            }
        }
    }

    #[test]
    fn test_all_extreme_fires_six_with_low_ph() {
        // pH cannot be both below and above its window, so an all-violating
        // sample with low pH fires six of the seven predicates.
        let t = crop_thresholds("Wheat").unwrap();
        let series = extreme_series(t);
        let (alerts, treatments) = evaluate_hour(0, &series, t);
        assert_eq!(alerts.len(), 6);
        assert_eq!(treatments.len(), 6);
        assert!(alerts[0].starts_with("🔥 High Temp"));
        assert!(alerts[1].starts_with("💧 Low Humidity"));
        assert!(alerts[2].starts_with("⚠️ pH too low"));
        assert!(alerts[3].starts_with("🌱 Low Nitrogen"));
        assert!(alerts[4].starts_with("🌿 Low Potassium"));
        assert!(alerts[5].starts_with("🌧 Low Rainfall"));
    }

    #[test]
    fn test_high_ph_fires_the_other_window_edge() {
        let t = crop_thresholds("Wheat").unwrap();
        let mut series = safe_series(t);
        series.ph[3] = t.ph_max + 0.4;
        let (alerts, _) = evaluate_hour(3, &series, t);
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].starts_with("⚠️ pH too high"));
    }

    #[test]
    fn test_wheat_hour_five_temperature_only() {
        // Temperature 31 > 30, pH 7.2 inside [6, 7.5], everything else safe:
        // exactly one pair, for temperature.
        let t = crop_thresholds("Wheat").unwrap();
        let mut series = safe_series(t);
        series.temperature[4] = 31.0;
        series.ph[4] = 7.2;
        let (alerts, treatments) = evaluate_hour(4, &series, t);
        assert_eq!(alerts, vec!["🔥 High Temp (31.0°C)".to_string()]);
        assert_eq!(
            treatments,
            vec!["✅ Shade crops and use cooling systems.".to_string()]
        );
    }

    #[test]
    fn test_message_precision() {
        let t = crop_thresholds("Wheat").unwrap();
        let mut series = safe_series(t);
        series.ph[0] = 5.4321;
        series.nitrogen[0] = 12.9;
        series.rainfall[0] = 42.46;
        let (alerts, _) = evaluate_hour(0, &series, t);
        assert!(alerts.contains(&"⚠️ pH too low (5.43)".to_string()));
        assert!(alerts.contains(&"🌱 Low Nitrogen (12)".to_string()));
        assert!(alerts.contains(&"🌧 Low Rainfall (42.5 mm)".to_string()));
    }

    #[test]
    fn test_report_preserves_hour_order_and_skips_quiet_hours() {
        let t = crop_thresholds("Maize").unwrap();
        let mut series = safe_series(t);
        // Alerts only at hours 3 and 17 (1-based)
        series.temperature[2] = t.temp_max + 2.0;
        series.humidity[16] = t.humidity_min - 5.0;

        let log = alert_log(&series, t);
        let rows = build_report(&log);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].hour, 3);
        assert!(rows[0].alert.starts_with("🔥 High Temp"));
        assert_eq!(rows[1].hour, 17);
        assert!(rows[1].alert.starts_with("💧 Low Humidity"));
    }

    #[test]
    fn test_report_repeats_hour_for_multiple_alerts() {
        let t = crop_thresholds("Rice").unwrap();
        let mut series = safe_series(t);
        series.temperature[7] = t.temp_max + 1.0;
        series.rainfall[7] = t.rain_min - 10.0;

        let rows = build_report(&alert_log(&series, t));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].hour, 8);
        assert_eq!(rows[1].hour, 8);
        // Within an hour, rows follow predicate-evaluation order
        assert!(rows[0].alert.starts_with("🔥"));
        assert!(rows[1].alert.starts_with("🌧"));
    }

    #[test]
    fn test_quiet_day_produces_empty_report() {
        let t = crop_thresholds("Barley").unwrap();
        let series = safe_series(t);
        assert!(alert_log(&series, t).is_empty());
        assert!(build_report(&[]).is_empty());
    }
}

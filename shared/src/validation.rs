//! Validation utilities for the Crop Advisory Platform

use crate::models::CropThresholds;

/// Validate a threshold profile's internal consistency
pub fn validate_threshold_profile(thresholds: &CropThresholds) -> Result<(), &'static str> {
    if thresholds.ph_min > thresholds.ph_max {
        return Err("pH window is inverted (ph_min > ph_max)");
    }
    if thresholds.ph_min < 0.0 || thresholds.ph_max > 14.0 {
        return Err("pH window must lie within 0-14");
    }
    if thresholds.humidity_min < 0.0 || thresholds.humidity_min > 100.0 {
        return Err("Humidity minimum must lie within 0-100%");
    }
    if thresholds.n_min < 0.0 || thresholds.k_min < 0.0 || thresholds.rain_min < 0.0 {
        return Err("Nutrient and rainfall minimums cannot be negative");
    }
    Ok(())
}

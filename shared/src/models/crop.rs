//! Crop threshold profiles
//!
//! Static per-crop acceptable ranges for the monitored environmental
//! factors. Populated once at process start and never mutated.

use serde::{Deserialize, Serialize};

/// Acceptable environmental ranges for one crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CropThresholds {
    /// Maximum tolerable temperature (°C)
    pub temp_max: f64,
    /// Minimum required relative humidity (%)
    pub humidity_min: f64,
    /// Lower bound of the acceptable soil pH window
    pub ph_min: f64,
    /// Upper bound of the acceptable soil pH window
    pub ph_max: f64,
    /// Minimum soil nitrogen level
    pub n_min: f64,
    /// Minimum soil potassium level
    pub k_min: f64,
    /// Minimum rainfall (mm)
    pub rain_min: f64,
}

/// Crops covered by the monitoring dashboard
pub const MONITORED_CROPS: [&str; 4] = ["Rice", "Wheat", "Maize", "Barley"];

static CROP_THRESHOLD_TABLE: [(&str, CropThresholds); 4] = [
    (
        "Rice",
        CropThresholds {
            temp_max: 35.0,
            humidity_min: 60.0,
            ph_min: 5.5,
            ph_max: 7.0,
            n_min: 40.0,
            k_min: 40.0,
            rain_min: 150.0,
        },
    ),
    (
        "Wheat",
        CropThresholds {
            temp_max: 30.0,
            humidity_min: 50.0,
            ph_min: 6.0,
            ph_max: 7.5,
            n_min: 35.0,
            k_min: 38.0,
            rain_min: 100.0,
        },
    ),
    (
        "Maize",
        CropThresholds {
            temp_max: 32.0,
            humidity_min: 55.0,
            ph_min: 5.8,
            ph_max: 7.0,
            n_min: 50.0,
            k_min: 45.0,
            rain_min: 120.0,
        },
    ),
    (
        "Barley",
        CropThresholds {
            temp_max: 28.0,
            humidity_min: 40.0,
            ph_min: 6.0,
            ph_max: 7.5,
            n_min: 30.0,
            k_min: 35.0,
            rain_min: 80.0,
        },
    ),
];

/// Look up the threshold profile for a crop (case-insensitive)
pub fn crop_thresholds(crop: &str) -> Option<&'static CropThresholds> {
    CROP_THRESHOLD_TABLE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(crop))
        .map(|(_, thresholds)| thresholds)
}

/// Iterate over all (name, thresholds) pairs in the table
pub fn all_crop_thresholds() -> impl Iterator<Item = (&'static str, &'static CropThresholds)> {
    CROP_THRESHOLD_TABLE.iter().map(|(name, t)| (*name, t))
}

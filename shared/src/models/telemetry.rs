//! Synthetic telemetry generation
//!
//! Produces a 24-sample hourly series per environmental factor for a crop.
//! Each factor is drawn from a normal distribution centred near the crop's
//! threshold boundary, then clipped to its physical bounds. The random
//! source is injected so callers control determinism.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::crop::{crop_thresholds, CropThresholds};

/// Fixed monitoring horizon: one sample per hour over a day
pub const HOURS_PER_DAY: usize = 24;

/// Errors raised while generating telemetry
#[derive(Debug, Error, PartialEq)]
pub enum TelemetryError {
    #[error("no threshold profile for crop '{0}'")]
    UnknownCrop(String),

    #[error("invalid sampling distribution: {0}")]
    Distribution(String),
}

/// One day of simulated sensor readings for a single crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetrySeries {
    pub nitrogen: Vec<f64>,
    pub phosphorus: Vec<f64>,
    pub potassium: Vec<f64>,
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub ph: Vec<f64>,
    pub rainfall: Vec<f64>,
}

impl TelemetrySeries {
    /// Generate telemetry for a crop by name, failing fast when the crop
    /// has no threshold profile.
    pub fn for_crop<R: Rng>(crop: &str, rng: &mut R) -> Result<Self, TelemetryError> {
        let thresholds =
            crop_thresholds(crop).ok_or_else(|| TelemetryError::UnknownCrop(crop.to_string()))?;
        Self::generate(thresholds, rng)
    }

    /// Generate telemetry against an explicit threshold profile.
    ///
    /// Sampling order is fixed (N, P, K, temperature, humidity, pH,
    /// rainfall) so a given RNG state always yields the same series.
    pub fn generate<R: Rng>(
        thresholds: &CropThresholds,
        rng: &mut R,
    ) -> Result<Self, TelemetryError> {
        Ok(Self {
            nitrogen: sample_series(rng, thresholds.n_min + 20.0, 10.0, thresholds.n_min - 5.0, 140.0)?,
            phosphorus: sample_series(rng, 70.0, 15.0, 5.0, 150.0)?,
            potassium: sample_series(rng, thresholds.k_min + 20.0, 6.0, thresholds.k_min - 5.0, 210.0)?,
            temperature: sample_series(rng, thresholds.temp_max - 3.0, 2.0, 15.0, 40.0)?,
            humidity: sample_series(rng, thresholds.humidity_min + 10.0, 7.0, 30.0, 90.0)?,
            ph: sample_series(
                rng,
                (thresholds.ph_min + thresholds.ph_max) / 2.0,
                0.3,
                4.5,
                8.0,
            )?,
            rainfall: sample_series(rng, thresholds.rain_min + 30.0, 20.0, 20.0, 300.0)?,
        })
    }
}

/// Draw 24 clipped samples from a normal distribution
fn sample_series<R: Rng>(
    rng: &mut R,
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
) -> Result<Vec<f64>, TelemetryError> {
    let normal =
        Normal::new(mean, std_dev).map_err(|e| TelemetryError::Distribution(e.to_string()))?;
    Ok((0..HOURS_PER_DAY)
        .map(|_| normal.sample(rng).clamp(min, max))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::crop::all_crop_thresholds;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_unknown_crop_fails_fast() {
        let mut rng = StdRng::seed_from_u64(42);
        let err = TelemetrySeries::for_crop("Durian", &mut rng).unwrap_err();
        assert_eq!(err, TelemetryError::UnknownCrop("Durian".to_string()));
    }

    #[test]
    fn test_series_has_24_samples_per_factor() {
        let mut rng = StdRng::seed_from_u64(42);
        let series = TelemetrySeries::for_crop("Rice", &mut rng).unwrap();
        assert_eq!(series.nitrogen.len(), HOURS_PER_DAY);
        assert_eq!(series.phosphorus.len(), HOURS_PER_DAY);
        assert_eq!(series.potassium.len(), HOURS_PER_DAY);
        assert_eq!(series.temperature.len(), HOURS_PER_DAY);
        assert_eq!(series.humidity.len(), HOURS_PER_DAY);
        assert_eq!(series.ph.len(), HOURS_PER_DAY);
        assert_eq!(series.rainfall.len(), HOURS_PER_DAY);
    }

    #[test]
    fn test_same_seed_yields_identical_series() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first = TelemetrySeries::for_crop("Wheat", &mut a).unwrap();
        let second = TelemetrySeries::for_crop("Wheat", &mut b).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(43);
        let first = TelemetrySeries::for_crop("Wheat", &mut a).unwrap();
        let second = TelemetrySeries::for_crop("Wheat", &mut b).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_all_samples_within_clip_bounds_for_every_crop() {
        let mut rng = StdRng::seed_from_u64(42);
        for (name, t) in all_crop_thresholds() {
            let series = TelemetrySeries::generate(t, &mut rng).unwrap();
            for hour in 0..HOURS_PER_DAY {
                let in_bounds = |v: f64, lo: f64, hi: f64| v >= lo && v <= hi;
                assert!(in_bounds(series.nitrogen[hour], t.n_min - 5.0, 140.0), "{name} N");
                assert!(in_bounds(series.phosphorus[hour], 5.0, 150.0), "{name} P");
                assert!(in_bounds(series.potassium[hour], t.k_min - 5.0, 210.0), "{name} K");
                assert!(in_bounds(series.temperature[hour], 15.0, 40.0), "{name} temp");
                assert!(in_bounds(series.humidity[hour], 30.0, 90.0), "{name} humidity");
                assert!(in_bounds(series.ph[hour], 4.5, 8.0), "{name} pH");
                assert!(in_bounds(series.rainfall[hour], 20.0, 300.0), "{name} rainfall");
            }
        }
    }
}

//! Pre-trained classifier and feature scaler
//!
//! Two opaque artifacts loaded from disk at startup. The scaler carries
//! per-feature means and standard deviations (`transform`); the classifier
//! carries class labels with per-class weight vectors and intercepts
//! (`predict_proba` as a softmax over linear scores). Their training is out
//! of scope; this module only honours the predict/transform contract.

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::external::CropScorer;
use shared::{FieldReadings, RankedCrop};

/// Number of input features (N, P, K, temperature, humidity, pH, rainfall)
pub const FEATURE_COUNT: usize = 7;

/// Feature-scaler artifact: standardization parameters per feature
#[derive(Debug, Clone, Deserialize)]
pub struct ScalerArtifact {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Classifier artifact: class labels plus linear weights and intercepts
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub classes: Vec<String>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

/// Scorer backed by the loaded scaler/classifier artifact pair
pub struct ArtifactScorer {
    scaler: ScalerArtifact,
    model: ModelArtifact,
}

impl ArtifactScorer {
    /// Load and validate the artifact pair from disk
    pub fn load(scaler_path: &str, model_path: &str) -> AppResult<Self> {
        let scaler: ScalerArtifact = read_artifact(scaler_path)?;
        let model: ModelArtifact = read_artifact(model_path)?;
        Self::from_parts(scaler, model)
    }

    /// Build a scorer from already-parsed artifacts, validating shapes
    pub fn from_parts(scaler: ScalerArtifact, model: ModelArtifact) -> AppResult<Self> {
        if scaler.mean.len() != FEATURE_COUNT || scaler.scale.len() != FEATURE_COUNT {
            return Err(AppError::Configuration(format!(
                "scaler artifact must carry {} means and scales",
                FEATURE_COUNT
            )));
        }
        if scaler.scale.iter().any(|s| *s <= 0.0 || !s.is_finite()) {
            return Err(AppError::Configuration(
                "scaler standard deviations must be positive and finite".to_string(),
            ));
        }
        if model.classes.is_empty() {
            return Err(AppError::Configuration(
                "classifier artifact carries no classes".to_string(),
            ));
        }
        if model.coefficients.len() != model.classes.len()
            || model.intercepts.len() != model.classes.len()
        {
            return Err(AppError::Configuration(
                "classifier weight rows must match class labels".to_string(),
            ));
        }
        if model.coefficients.iter().any(|row| row.len() != FEATURE_COUNT) {
            return Err(AppError::Configuration(format!(
                "classifier weight rows must have {} features",
                FEATURE_COUNT
            )));
        }

        Ok(Self { scaler, model })
    }

    /// Number of classes the classifier can emit
    pub fn class_count(&self) -> usize {
        self.model.classes.len()
    }

    /// Standardize a raw feature vector
    fn transform(&self, features: &[f64; FEATURE_COUNT]) -> AppResult<[f64; FEATURE_COUNT]> {
        if features.iter().any(|f| !f.is_finite()) {
            return Err(AppError::ScalingError(
                "input features must be finite".to_string(),
            ));
        }

        let mut scaled = [0.0; FEATURE_COUNT];
        for (i, value) in features.iter().enumerate() {
            scaled[i] = (value - self.scaler.mean[i]) / self.scaler.scale[i];
        }
        Ok(scaled)
    }

    /// Per-class probabilities: softmax over the linear scores
    fn predict_proba(&self, scaled: &[f64; FEATURE_COUNT]) -> Vec<f64> {
        let scores: Vec<f64> = self
            .model
            .coefficients
            .iter()
            .zip(self.model.intercepts.iter())
            .map(|(row, intercept)| {
                row.iter().zip(scaled.iter()).map(|(w, x)| w * x).sum::<f64>() + intercept
            })
            .collect();

        // Subtract the max score for numerical stability
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        exps.iter().map(|e| e / total).collect()
    }
}

impl CropScorer for ArtifactScorer {
    fn rank_crops(&self, readings: &FieldReadings) -> AppResult<Vec<RankedCrop>> {
        let scaled = self.transform(&readings.as_features())?;
        let probabilities = self.predict_proba(&scaled);

        let mut ranked: Vec<RankedCrop> = self
            .model
            .classes
            .iter()
            .zip(probabilities.iter())
            .map(|(name, probability)| RankedCrop {
                name: name.clone(),
                probability: *probability,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(ranked)
    }
}

fn read_artifact<T: for<'de> Deserialize<'de>>(path: &str) -> AppResult<T> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Configuration(format!("failed to read artifact {}: {}", path, e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Configuration(format!("failed to parse artifact {}: {}", path, e)))
}

//! Frozen GHI model and its persisted artifacts
//!
//! The pipeline treats the model as an opaque single-row, single-output
//! callable. The shipped artifact is a linear regression exported from the
//! offline training run (coefficients + intercept), but nothing downstream
//! depends on that form.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;

/// Opaque GHI regression model. Given an ordered feature vector of the width
/// it was trained with, returns one scalar (Wh/m² per hour, unclamped).
#[cfg_attr(test, mockall::automock)]
pub trait GhiModel: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64>;
}

/// Linear GHI model loaded from a JSON artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearGhiModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearGhiModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Load the frozen model artifact from disk. Done once at startup; the
    /// loaded model is read-only for the life of the process.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading model artifact {}", path.display()))?;
        let model: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing model artifact {}", path.display()))?;
        Ok(model)
    }
}

impl GhiModel for LinearGhiModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            anyhow::bail!(
                "feature count mismatch: expected {}, got {}",
                self.coefficients.len(),
                features.len()
            );
        }

        let prediction: f64 = features
            .values
            .iter()
            .zip(self.coefficients.iter())
            .map(|(f, c)| f * c)
            .sum::<f64>()
            + self.intercept;

        Ok(prediction)
    }
}

/// Load the expected feature-name list (a JSON array of strings). Defines
/// both the valid feature set and the column order for the model call.
pub fn load_feature_names(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading feature name list {}", path.display()))?;
    let names: Vec<String> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing feature name list {}", path.display()))?;
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(values: Vec<f64>) -> FeatureVector {
        let names = (0..values.len()).map(|i| format!("f{i}")).collect();
        FeatureVector { values, names }
    }

    #[test]
    fn linear_model_predicts_dot_product_plus_intercept() {
        let model = LinearGhiModel::new(vec![2.0, 3.0, 1.0], 5.0);
        let prediction = model.predict(&vector(vec![1.0, 2.0, 3.0])).unwrap();
        // 2*1 + 3*2 + 1*3 + 5 = 16
        assert_eq!(prediction, 16.0);
    }

    #[test]
    fn width_mismatch_is_an_error() {
        let model = LinearGhiModel::new(vec![1.0, 1.0], 0.0);
        let err = model.predict(&vector(vec![1.0, 2.0, 3.0])).unwrap_err();
        assert!(err.to_string().contains("feature count mismatch"));
    }

    #[test]
    fn model_artifact_round_trips_through_json() {
        let model = LinearGhiModel::new(vec![0.5, -0.25], 10.0);
        let json = serde_json::to_string(&model).unwrap();
        let parsed: LinearGhiModel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.coefficients, model.coefficients);
        assert_eq!(parsed.intercept, model.intercept);
    }

    #[test]
    fn feature_name_list_parses_json_array() {
        let dir = std::env::temp_dir().join("solar-harvest-test-features");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("names.json");
        std::fs::write(&path, r#"["Temperature", "hour_sin"]"#).unwrap();

        let names = load_feature_names(&path).unwrap();
        assert_eq!(names, vec!["Temperature", "hour_sin"]);
    }

    #[test]
    fn missing_artifact_reports_path() {
        let err = LinearGhiModel::load("/nonexistent/ghi_model.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ghi_model.json"));
    }
}

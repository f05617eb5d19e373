//! Prediction pipeline: feature assembly, model invocation, postprocessing
//!
//! One estimate per call, no shared mutable state. The model and the expected
//! feature-name list are injected read-only, so concurrent callers are safe.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{HarvestableEnergy, RawInputs};
use crate::features::{assemble, AssemblyError, FeatureVector};
use crate::model::GhiModel;

#[derive(Debug, Error)]
pub enum PredictorError {
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    /// Model-internal failure, propagated untranslated.
    #[error(transparent)]
    Model(#[from] anyhow::Error),
}

/// Invoke the model on an assembled vector and postprocess its output.
///
/// The raw prediction is floored at zero (GHI cannot be negative; the model
/// may emit small negatives near zero irradiance) and scaled by the fixed PV
/// efficiency.
pub fn predict_energy(
    vector: &FeatureVector,
    model: &dyn GhiModel,
) -> Result<HarvestableEnergy, PredictorError> {
    let raw = model.predict(vector)?;
    let ghi = raw.max(0.0);
    Ok(HarvestableEnergy::from_ghi(ghi))
}

/// Full pipeline with its collaborators injected: raw inputs in, harvestable
/// energy out.
pub struct Predictor {
    model: Arc<dyn GhiModel>,
    feature_names: Vec<String>,
}

impl Predictor {
    pub fn new(model: Arc<dyn GhiModel>, feature_names: Vec<String>) -> Self {
        Self {
            model,
            feature_names,
        }
    }

    /// Names the model expects, in column order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Run one estimate. Fails fast on unresolvable feature names; model
    /// errors pass through unchanged.
    pub fn estimate(&self, raw: &RawInputs) -> Result<HarvestableEnergy, PredictorError> {
        let vector = assemble(raw, &self.feature_names)?;
        predict_energy(&vector, self.model.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::canonical_feature_names;
    use crate::model::MockGhiModel;
    use rstest::rstest;

    fn predictor_returning(value: f64) -> Predictor {
        let mut model = MockGhiModel::new();
        model.expect_predict().returning(move |_| Ok(value));
        Predictor::new(Arc::new(model), canonical_feature_names())
    }

    #[test]
    fn negative_prediction_is_floored_to_zero() {
        let predictor = predictor_returning(-5.0);
        let energy = predictor.estimate(&RawInputs::default()).unwrap();
        assert_eq!(energy.ghi_wh_m2, 0.0);
        assert_eq!(energy.energy_wh_m2, 0.0);
    }

    #[test]
    fn prediction_is_scaled_by_pv_efficiency() {
        let predictor = predictor_returning(100.0);
        let energy = predictor.estimate(&RawInputs::default()).unwrap();
        assert_eq!(energy.ghi_wh_m2, 100.0);
        assert_eq!(energy.energy_wh_m2, 16.0);
        assert_eq!(energy.display(), "16.00");
    }

    #[test]
    fn end_to_end_with_stub_model() {
        // Default form inputs, stub returning 250.0 => 40.00 Wh/m²
        let predictor = predictor_returning(250.0);
        let energy = predictor.estimate(&RawInputs::default()).unwrap();
        assert_eq!(energy.energy_wh_m2, 40.0);
        assert_eq!(energy.display(), "40.00");
    }

    #[test]
    fn repeated_estimates_are_bit_identical() {
        let predictor = predictor_returning(123.456);
        let raw = RawInputs::default();
        let first = predictor.estimate(&raw).unwrap();
        let second = predictor.estimate(&raw).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unresolvable_feature_name_fails_the_request() {
        let mut model = MockGhiModel::new();
        model.expect_predict().never();
        let predictor = Predictor::new(
            Arc::new(model),
            vec!["Temperature".to_string(), "Cloud Cover".to_string()],
        );

        let err = predictor.estimate(&RawInputs::default()).unwrap_err();
        match err {
            PredictorError::Assembly(AssemblyError::MissingFeatures(missing)) => {
                assert!(missing.contains("Cloud Cover"));
                assert_eq!(missing.len(), 1);
            }
            other => panic!("expected assembly error, got {other:?}"),
        }
    }

    #[test]
    fn model_errors_propagate_unchanged() {
        let mut model = MockGhiModel::new();
        model
            .expect_predict()
            .returning(|_| Err(anyhow::anyhow!("booster exploded")));
        let predictor = Predictor::new(Arc::new(model), canonical_feature_names());

        let err = predictor.estimate(&RawInputs::default()).unwrap_err();
        assert!(matches!(err, PredictorError::Model(_)));
        assert!(err.to_string().contains("booster exploded"));
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(250.0, 40.0)]
    #[case(1000.0, 160.0)]
    fn efficiency_conversion(#[case] ghi: f64, #[case] expected: f64) {
        let predictor = predictor_returning(ghi);
        let energy = predictor.estimate(&RawInputs::default()).unwrap();
        assert_eq!(energy.energy_wh_m2, expected);
    }
}

//! Price-range inference on top of the loaded model

use crate::error::PredictError;
use crate::models::classifier::Classifier;
use crate::types::prediction::PriceRange;
use crate::types::record::FeatureRecord;
use tracing::{debug, error, warn};

/// Outcome of the startup model load.
pub enum ModelState {
    Loaded(Box<dyn Classifier>),
    Unavailable { reason: String },
}

/// Runs the classifier on one row and maps its label to a [`PriceRange`].
///
/// Owns the model for the life of the process; the model is never mutated.
pub struct Predictor {
    model: ModelState,
}

impl Predictor {
    pub fn new(model: ModelState) -> Self {
        Self { model }
    }

    /// Predictor around an already loaded classifier.
    pub fn with_classifier(model: Box<dyn Classifier>) -> Self {
        Self::new(ModelState::Loaded(model))
    }

    /// Predictor whose model failed to load.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(ModelState::Unavailable {
            reason: reason.into(),
        })
    }

    pub fn is_available(&self) -> bool {
        matches!(self.model, ModelState::Loaded(_))
    }

    /// Name of the loaded model, if any.
    pub fn model_name(&self) -> Option<&str> {
        match &self.model {
            ModelState::Loaded(model) => Some(model.name()),
            ModelState::Unavailable { .. } => None,
        }
    }

    /// Why the model is missing, if it is.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.model {
            ModelState::Loaded(_) => None,
            ModelState::Unavailable { reason } => Some(reason.as_str()),
        }
    }

    /// Run inference on a single row.
    pub fn predict(&self, record: &FeatureRecord) -> Result<PriceRange, PredictError> {
        let model = match &self.model {
            ModelState::Loaded(model) => model,
            ModelState::Unavailable { reason } => {
                warn!(reason = %reason, "Predict requested without a model");
                return Err(PredictError::model_unavailable(reason.clone()));
            }
        };

        let label = model.predict(record).map_err(|e| {
            error!(model = %model.name(), error = %e, "Model inference failed");
            PredictError::prediction(format!("{:#}", e))
        })?;

        let range = PriceRange::try_from(label).map_err(|label| {
            error!(model = %model.name(), label = label, "Model returned unknown class");
            PredictError::prediction(format!(
                "model returned class {}, expected one of 0, 1, 2, 3",
                label
            ))
        })?;

        debug!(
            model = %model.name(),
            label = label,
            range = %range,
            "Inference complete"
        );

        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classifier::mock::MockClassifier;
    use crate::types::features::FEATURE_COUNT;
    use std::sync::atomic::Ordering;

    fn record() -> FeatureRecord {
        FeatureRecord::new([1.0; FEATURE_COUNT])
    }

    #[test]
    fn test_every_label_maps_to_range() {
        for label in 0..4 {
            let predictor = Predictor::with_classifier(Box::new(MockClassifier::returning(label)));
            let range = predictor.predict(&record()).unwrap();
            assert_eq!(range.class_id(), label);
        }
    }

    #[test]
    fn test_out_of_range_label_is_prediction_error() {
        let predictor = Predictor::with_classifier(Box::new(MockClassifier::returning(7)));
        let err = predictor.predict(&record()).unwrap_err();
        assert!(matches!(err, PredictError::Prediction { ref cause } if cause.contains("class 7")));
    }

    #[test]
    fn test_inference_failure_carries_cause() {
        let predictor = Predictor::with_classifier(Box::new(MockClassifier::failing(
            "incompatible dtype",
        )));
        let err = predictor.predict(&record()).unwrap_err();
        assert_eq!(err, PredictError::prediction("incompatible dtype"));
    }

    #[test]
    fn test_unavailable_model() {
        let predictor = Predictor::unavailable("models/best_model.json not found");
        assert!(!predictor.is_available());
        assert_eq!(predictor.model_name(), None);

        let err = predictor.predict(&record()).unwrap_err();
        assert!(matches!(err, PredictError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_model_called_once_per_predict() {
        let mock = MockClassifier::returning(2);
        let calls = mock.calls();
        let predictor = Predictor::with_classifier(Box::new(mock));

        predictor.predict(&record()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(predictor.model_name(), Some("mock"));
    }
}

//! Predict action and the last displayed outcome

use crate::error::PredictError;
use crate::feature_extractor::FeatureExtractor;
use crate::models::inference::Predictor;
use crate::types::features::PhoneSpecs;
use crate::types::prediction::PriceRange;
use chrono::{DateTime, Utc};
use tracing::info;

/// Where the pipeline stands between user actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a predict action (also where a failed action lands)
    Idle,
    /// The last action produced a verdict
    Predicted,
}

/// A successful prediction as shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub range: PriceRange,
    pub specs: PhoneSpecs,
    pub predicted_at: DateTime<Utc>,
}

/// Couples the extractor and predictor with the display state of one user.
pub struct PredictionSession {
    extractor: FeatureExtractor,
    predictor: Predictor,
    state: SessionState,
    verdict: Option<Verdict>,
    last_error: Option<PredictError>,
}

impl PredictionSession {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            predictor,
            state: SessionState::Idle,
            verdict: None,
            last_error: None,
        }
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Last successful verdict. A failed action leaves it untouched.
    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    /// Error from the most recent action, cleared by the next success.
    pub fn last_error(&self) -> Option<&PredictError> {
        self.last_error.as_ref()
    }

    /// Run the predict action on the current form values.
    pub fn predict(&mut self, specs: &PhoneSpecs) -> Result<PriceRange, PredictError> {
        let record = self.extractor.extract(specs);

        match self.predictor.predict(&record) {
            Ok(range) => {
                let (label, tier) = range.presentation();
                info!(label = label, tier = %tier, "Price range predicted");

                self.verdict = Some(Verdict {
                    range,
                    specs: specs.clone(),
                    predicted_at: Utc::now(),
                });
                self.last_error = None;
                self.state = SessionState::Predicted;
                Ok(range)
            }
            Err(e) => {
                self.last_error = Some(e.clone());
                self.state = SessionState::Idle;
                Err(e)
            }
        }
    }

    /// Drop the shown verdict and error, e.g. after the form is reset.
    pub fn clear(&mut self) {
        self.verdict = None;
        self.last_error = None;
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classifier::mock::MockClassifier;
    use crate::types::prediction::SeverityTier;
    use std::sync::atomic::Ordering;

    fn scenario_specs() -> PhoneSpecs {
        PhoneSpecs {
            battery_power: 3000,
            blue: true,
            clock_speed: 1.8,
            dual_sim: true,
            fc: 5,
            four_g: true,
            int_memory: 32,
            m_dep: 0.5,
            mobile_wt: 150,
            n_cores: 4,
            pc: 13,
            px_height: 800,
            px_width: 1200,
            ram: 4000,
            sc_h: 12,
            sc_w: 7,
            talk_time: 10,
            three_g: true,
            touch_screen: true,
            wifi: true,
        }
    }

    #[test]
    fn test_end_to_end_medium_cost() {
        let model = MockClassifier::returning(1);
        let mut session = PredictionSession::new(Predictor::with_classifier(Box::new(model)));
        assert_eq!(session.state(), SessionState::Idle);

        let range = session.predict(&scenario_specs()).unwrap();

        assert_eq!(range.presentation(), ("Medium Cost", SeverityTier::Info));
        assert_eq!(session.state(), SessionState::Predicted);
        assert_eq!(session.verdict().map(|v| v.range), Some(PriceRange::Medium));
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_unavailable_model_yields_error_without_verdict() {
        let mut session =
            PredictionSession::new(Predictor::unavailable("models/best_model.json not found"));

        let err = session.predict(&scenario_specs()).unwrap_err();

        assert!(matches!(err, PredictError::ModelUnavailable { .. }));
        assert!(session.verdict().is_none());
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.last_error(), Some(&err));
    }

    #[test]
    fn test_failure_keeps_prior_verdict() {
        let model = MockClassifier::returning(2);
        let mut session = PredictionSession::new(Predictor::with_classifier(Box::new(model)));
        session.predict(&scenario_specs()).unwrap();
        let shown = session.verdict().cloned().unwrap();

        // swap in a failing model behind the same displayed state
        let failing = MockClassifier::failing("bad shape");
        session.predictor = Predictor::with_classifier(Box::new(failing));
        let mut other = scenario_specs();
        other.ram = 512;
        let err = session.predict(&other).unwrap_err();

        assert_eq!(err, PredictError::prediction("bad shape"));
        assert_eq!(session.verdict(), Some(&shown));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.last_error(), Some(&err));
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mock = MockClassifier::returning(0);
        let calls = mock.calls();
        let mut session = PredictionSession::new(Predictor::with_classifier(Box::new(mock)));
        session.last_error = Some(PredictError::prediction("earlier"));

        session.predict(&PhoneSpecs::default()).unwrap();

        assert!(session.last_error().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        session.clear();
        assert!(session.verdict().is_none());
        assert_eq!(session.state(), SessionState::Idle);
    }
}

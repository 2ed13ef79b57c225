//! Churn Prediction Front-End

use crate::classifier::Classifier;
use crate::InferenceError;
use feature_encoder::FeatureVector;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Churn risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    /// Customer predicted to stay
    Low,
    /// Customer predicted to churn
    High,
}

impl RiskLabel {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "low",
            RiskLabel::High => "high",
        }
    }
}

/// Prediction result
///
/// `probability` is always P(churn), also for `Low` predictions: the
/// reported number is the chance of churning, not confidence in the label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub risk: RiskLabel,
    pub probability: f64,
}

/// Stateless request/response front-end over an injected classifier.
///
/// Holds nothing but a shared handle to the immutable classifier, so it is
/// freely callable from concurrent requests. A failed prediction is
/// terminal for its request; there are no retries and no partial results.
#[derive(Clone)]
pub struct Predictor {
    classifier: Arc<dyn Classifier>,
}

impl Predictor {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Feature width the underlying classifier expects
    pub fn feature_count(&self) -> usize {
        self.classifier.feature_count()
    }

    /// Run the classifier on an encoded profile.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        let expected = self.classifier.feature_count();
        if features.len() != expected {
            return Err(InferenceError::FeatureShapeMismatch {
                expected,
                actual: features.len(),
            });
        }

        let label = self.classifier.predict_label(features.as_slice())?;
        let risk = match label {
            0 => RiskLabel::Low,
            1 => RiskLabel::High,
            other => {
                return Err(InferenceError::ClassifierOutput(format!(
                    "non-binary label {other}"
                )))
            }
        };

        let probabilities = self.classifier.predict_probabilities(features.as_slice())?;
        if probabilities.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return Err(InferenceError::ClassifierOutput(format!(
                "probabilities {probabilities:?} outside [0, 1]"
            )));
        }

        let probability = probabilities[1];
        debug!(
            "Predicted {} risk, churn probability {:.4}",
            risk.as_str(),
            probability
        );

        Ok(Prediction { risk, probability })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClassifier {
        feature_count: usize,
        label: u8,
        probabilities: [f64; 2],
    }

    impl Classifier for FixedClassifier {
        fn feature_count(&self) -> usize {
            self.feature_count
        }

        fn predict_label(&self, _features: &[f64]) -> Result<u8, InferenceError> {
            Ok(self.label)
        }

        fn predict_probabilities(&self, _features: &[f64]) -> Result<[f64; 2], InferenceError> {
            Ok(self.probabilities)
        }
    }

    fn predictor(label: u8, probabilities: [f64; 2]) -> Predictor {
        Predictor::new(Arc::new(FixedClassifier {
            feature_count: 50,
            label,
            probabilities,
        }))
    }

    fn vector_of(len: usize) -> FeatureVector {
        FeatureVector {
            values: vec![0.0; len],
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let result = predictor(0, [0.9, 0.1]).predict(&vector_of(49));
        assert!(matches!(
            result,
            Err(InferenceError::FeatureShapeMismatch {
                expected: 50,
                actual: 49,
            })
        ));
    }

    #[test]
    fn test_label_maps_to_risk() {
        let prediction = predictor(1, [0.2, 0.8]).predict(&vector_of(50)).unwrap();
        assert_eq!(prediction.risk, RiskLabel::High);

        let prediction = predictor(0, [0.8, 0.2]).predict(&vector_of(50)).unwrap();
        assert_eq!(prediction.risk, RiskLabel::Low);
    }

    #[test]
    fn test_probability_is_churn_chance_for_low_risk() {
        let prediction = predictor(0, [0.55, 0.45]).predict(&vector_of(50)).unwrap();
        assert_eq!(prediction.risk, RiskLabel::Low);
        assert_eq!(prediction.probability, 0.45);
    }

    #[test]
    fn test_rejects_non_binary_label() {
        let result = predictor(7, [0.5, 0.5]).predict(&vector_of(50));
        assert!(matches!(result, Err(InferenceError::ClassifierOutput(_))));
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        let result = predictor(1, [-0.4, 1.4]).predict(&vector_of(50));
        assert!(matches!(result, Err(InferenceError::ClassifierOutput(_))));
    }

    #[test]
    fn test_rejects_non_finite_probability() {
        let result = predictor(1, [0.5, f64::NAN]).predict(&vector_of(50));
        assert!(matches!(result, Err(InferenceError::ClassifierOutput(_))));
    }
}

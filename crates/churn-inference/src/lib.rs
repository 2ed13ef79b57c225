//! Churn Inference Engine
//!
//! Classifier capability seam and prediction front-end for the churn model
//! artifact, with a tract-onnx backed implementation.

mod classifier;
mod onnx;
mod predictor;

pub use classifier::Classifier;
pub use onnx::OnnxClassifier;
pub use predictor::{Prediction, Predictor, RiskLabel};

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The artifact could not be loaded; fatal at startup
    #[error("Model load failed: {0}")]
    ModelLoad(String),
    /// Encoder/classifier schema drift
    #[error("Feature shape mismatch: expected {expected}, got {actual}")]
    FeatureShapeMismatch { expected: usize, actual: usize },
    /// Malformed or unexpected classifier response
    #[error("Malformed classifier output: {0}")]
    ClassifierOutput(String),
}

//! ONNX Classifier Backend

use crate::classifier::Classifier;
use crate::InferenceError;
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::info;

type OnnxModel = TypedRunnableModel<TypedModel>;

/// Churn classifier backed by a tract-onnx model artifact.
///
/// Loaded once at startup and immutable afterwards. Expects the sklearn
/// export convention: output 0 is the int64 label tensor, output 1 the
/// float32 probability tensor of shape `[1, 2]`.
pub struct OnnxClassifier {
    model: OnnxModel,
    feature_count: usize,
}

impl OnnxClassifier {
    /// Load the model artifact, pinning its input to `[1, feature_count]`.
    ///
    /// An artifact that disagrees on the feature width fails here rather
    /// than mispredicting later.
    pub fn load(path: impl AsRef<Path>, feature_count: usize) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let model = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| InferenceError::ModelLoad(e.to_string()))?
            .with_input_fact(0, f32::fact([1, feature_count]).into())
            .map_err(|e| InferenceError::ModelLoad(e.to_string()))?
            .into_optimized()
            .map_err(|e| InferenceError::ModelLoad(e.to_string()))?
            .into_runnable()
            .map_err(|e| InferenceError::ModelLoad(e.to_string()))?;

        info!(
            "Loaded churn classifier from {} ({} features)",
            path.display(),
            feature_count
        );

        Ok(Self {
            model,
            feature_count,
        })
    }

    fn run(&self, features: &[f64]) -> Result<TVec<TValue>, InferenceError> {
        let cast: Vec<f32> = features.iter().map(|&v| v as f32).collect();
        let input = Tensor::from_shape(&[1, self.feature_count], &cast)
            .map_err(|e| InferenceError::ClassifierOutput(e.to_string()))?;
        self.model
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::ClassifierOutput(e.to_string()))
    }
}

impl Classifier for OnnxClassifier {
    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn predict_label(&self, features: &[f64]) -> Result<u8, InferenceError> {
        let outputs = self.run(features)?;
        let labels = outputs
            .first()
            .ok_or_else(|| InferenceError::ClassifierOutput("label output missing".to_string()))?
            .to_array_view::<i64>()
            .map_err(|e| InferenceError::ClassifierOutput(e.to_string()))?;
        let label = labels
            .iter()
            .next()
            .copied()
            .ok_or_else(|| InferenceError::ClassifierOutput("empty label tensor".to_string()))?;
        u8::try_from(label).map_err(|_| {
            InferenceError::ClassifierOutput(format!("label {label} outside the binary range"))
        })
    }

    fn predict_probabilities(&self, features: &[f64]) -> Result<[f64; 2], InferenceError> {
        let outputs = self.run(features)?;
        let probabilities = outputs
            .get(1)
            .ok_or_else(|| {
                InferenceError::ClassifierOutput("probability output missing".to_string())
            })?
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::ClassifierOutput(e.to_string()))?;
        let row: Vec<f64> = probabilities.iter().map(|&p| f64::from(p)).collect();
        match row.as_slice() {
            [stays, churns] => Ok([*stays, *churns]),
            other => Err(InferenceError::ClassifierOutput(format!(
                "expected two class probabilities, got {}",
                other.len()
            ))),
        }
    }
}

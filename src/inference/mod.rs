pub mod error;
pub mod model;
pub mod sample;
pub mod tensor;

use std::path::{Path, PathBuf};

use tokio::sync::OnceCell;
use tracing::{debug, error, info};

pub use error::{InferenceError, InferenceResult};
pub use model::{DenseClassifier, ModelHandle};
pub use sample::load_sample;

use crate::model::activity::ActivityLabel;
use crate::model::prediction::{PredictionResult, Probabilities};

pub const DEFAULT_MODEL_PATH: &str = "public/model/model.json";

/// Outcome of one real-sample classification.
#[derive(Debug, Clone)]
pub struct RealClassification {
    pub prediction: PredictionResult,
    pub ground_truth: Option<ActivityLabel>,
}

/// Owns the pretrained classifier. The model is loaded at most once: the
/// first `load` call performs the attempt, concurrent callers wait on it, and
/// a failure is remembered rather than retried.
#[derive(Debug)]
pub struct InferenceProvider {
    model_path: PathBuf,
    slot: OnceCell<Result<ModelHandle, String>>,
}

impl InferenceProvider {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            slot: OnceCell::new(),
        }
    }

    /// Provider wrapping an already constructed model.
    #[cfg(test)]
    pub fn with_model(model: DenseClassifier) -> Self {
        Self {
            model_path: PathBuf::new(),
            slot: OnceCell::new_with(Some(Ok(ModelHandle::new(model)))),
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub async fn load(&self) -> InferenceResult<ModelHandle> {
        let outcome = self
            .slot
            .get_or_init(|| async {
                info!("attempting to load model from {}", self.model_path.display());
                match DenseClassifier::load(&self.model_path).await {
                    Ok(model) => {
                        info!(
                            "model loaded: input_shape={:?}, classes={}",
                            model.input_shape(),
                            model.num_classes()
                        );
                        Ok(ModelHandle::new(model))
                    }
                    Err(err) => {
                        error!("failed to load model: {err}");
                        Err(err.to_string())
                    }
                }
            })
            .await;
        match outcome {
            Ok(handle) => Ok(handle.clone()),
            Err(msg) => Err(InferenceError::ModelLoad(msg.clone())),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.slot.get(), Some(Ok(_)))
    }

    /// The loaded model, without triggering a load.
    pub fn handle(&self) -> InferenceResult<ModelHandle> {
        match self.slot.get() {
            Some(Ok(handle)) => Ok(handle.clone()),
            Some(Err(msg)) => Err(InferenceError::ModelLoad(msg.clone())),
            None => Err(InferenceError::NotLoaded),
        }
    }

    /// Loads the sample at `sample_path` and classifies it. Refuses to run
    /// until the model has loaded successfully.
    pub async fn classify_sample(&self, sample_path: &Path) -> InferenceResult<RealClassification> {
        let handle = self.handle()?;
        let sample = load_sample(sample_path).await?;
        info!(
            "classifying {} (shape {:?})",
            sample.path.display(),
            sample.tensor.shape()
        );
        tokio::task::yield_now().await;
        let prediction = classify(&handle, sample.tensor)?;
        Ok(RealClassification {
            prediction,
            ground_truth: sample.ground_truth,
        })
    }
}

/// Runs `handle` on `tensor` and shapes the output like a mock prediction.
pub fn classify(handle: &ModelHandle, tensor: tensor::Tensor) -> InferenceResult<PredictionResult> {
    let output = handle.predict(tensor)?;
    debug!("raw probabilities: {:?}", output);
    Ok(PredictionResult::from_probabilities(
        Probabilities::from_model_output(&output),
    ))
}

#[cfg(test)]
#[path = "../../tests/src_inline/inference/provider.rs"]
mod tests;

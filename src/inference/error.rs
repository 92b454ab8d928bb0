use thiserror::Error;

pub type InferenceResult<T> = Result<T, InferenceError>;

/// Recoverable failures of the real-sample path. None of these abort the
/// session loop; the caller reports them and keeps its state.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("model not loaded")]
    NotLoaded,

    #[error("failed to load model: {0}")]
    ModelLoad(String),

    #[error("failed to load sample: {0}")]
    SampleLoad(String),

    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("classification task failed: {0}")]
    TaskFailed(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InferenceError {
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        InferenceError::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        InferenceError::InvalidInput(msg.into())
    }
}

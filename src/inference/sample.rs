use std::path::{Path, PathBuf};

use tracing::info;

use crate::inference::error::{InferenceError, InferenceResult};
use crate::inference::tensor::Tensor;
use crate::model::activity::ActivityLabel;

pub const DEFAULT_SAMPLE_PATH: &str = "public/data/test_sample.json";

/// One pre-recorded radar sample.
#[derive(Debug, Clone)]
pub struct RadarSample {
    pub path: PathBuf,
    pub tensor: Tensor,
    pub ground_truth: Option<ActivityLabel>,
}

pub async fn load_sample(path: &Path) -> InferenceResult<RadarSample> {
    info!("loading sample from {}", path.display());
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| InferenceError::SampleLoad(format!("{}: {}", path.display(), e)))?;
    parse_sample(path, &text)
}

pub fn parse_sample(path: &Path, text: &str) -> InferenceResult<RadarSample> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| InferenceError::SampleLoad(format!("{}: {}", path.display(), e)))?;
    let tensor = Tensor::from_json(&value)?;
    Ok(RadarSample {
        path: path.to_path_buf(),
        tensor,
        ground_truth: ground_truth_from_path(path),
    })
}

/// Samples exported from the training set sit under a folder named after
/// their class, e.g. `.../walk/person7_walk_1.json`.
pub fn ground_truth_from_path(path: &Path) -> Option<ActivityLabel> {
    let parent = path.parent()?.file_name()?.to_str()?;
    ActivityLabel::from_key(&parent.to_ascii_lowercase())
}

#[cfg(test)]
#[path = "../../tests/src_inline/inference/sample.rs"]
mod tests;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;
use tracing::debug;

use crate::inference::error::{InferenceError, InferenceResult};
use crate::inference::tensor::{Tensor, element_count, normalize_rank};

/// On-disk classifier graph: one dense layer over the flattened input,
/// followed by softmax.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelGraph {
    pub input_shape: Vec<usize>,
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

#[derive(Debug)]
pub struct DenseClassifier {
    input_shape: Vec<usize>,
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

impl DenseClassifier {
    pub fn from_graph(graph: ModelGraph) -> InferenceResult<Self> {
        if graph.input_shape.is_empty() || graph.input_shape.contains(&0) {
            return Err(InferenceError::ModelLoad(format!(
                "invalid input_shape {:?}",
                graph.input_shape
            )));
        }
        if graph.weights.is_empty() {
            return Err(InferenceError::ModelLoad("model has no output classes".to_string()));
        }
        if graph.weights.len() != graph.bias.len() {
            return Err(InferenceError::ModelLoad(format!(
                "weights have {} rows but bias has {} entries",
                graph.weights.len(),
                graph.bias.len()
            )));
        }
        let input_len = element_count(&graph.input_shape).map_err(|_| {
            InferenceError::ModelLoad(format!("input_shape {:?} is too large", graph.input_shape))
        })?;
        for (row_idx, row) in graph.weights.iter().enumerate() {
            if row.len() != input_len {
                return Err(InferenceError::ModelLoad(format!(
                    "weight row {} has {} entries, expected {}",
                    row_idx,
                    row.len(),
                    input_len
                )));
            }
        }
        Ok(Self {
            input_shape: graph.input_shape,
            weights: graph.weights,
            bias: graph.bias,
        })
    }

    pub fn from_json_str(text: &str) -> InferenceResult<Self> {
        let graph: ModelGraph = serde_json::from_str(text)
            .map_err(|e| InferenceError::ModelLoad(format!("malformed model graph: {e}")))?;
        Self::from_graph(graph)
    }

    pub async fn load(path: &Path) -> InferenceResult<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| InferenceError::ModelLoad(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    pub fn input_shape(&self) -> &[usize] {
        &self.input_shape
    }

    pub fn num_classes(&self) -> usize {
        self.bias.len()
    }

    fn forward(&self, input: &[f32], logits: &mut Vec<f32>) {
        logits.clear();
        for (row, b) in self.weights.iter().zip(self.bias.iter()) {
            let mut acc = *b;
            for (w, x) in row.iter().zip(input.iter()) {
                acc += w * x;
            }
            logits.push(acc);
        }
        softmax_in_place(logits);
    }
}

pub fn softmax_in_place(values: &mut [f32]) {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if !max.is_finite() {
        return;
    }
    let mut sum = 0.0f32;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    if sum > 0.0 {
        for v in values.iter_mut() {
            *v /= sum;
        }
    }
}

/// Counts compute buffers currently alive across all classify calls.
#[derive(Debug, Clone, Default)]
pub struct BufferLedger(Arc<AtomicUsize>);

impl BufferLedger {
    pub fn live(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Buffers owned by a single classify call. Released on drop, on both the
/// success and the error path.
struct Workspace {
    ledger: BufferLedger,
    input: Option<Tensor>,
    logits: Vec<f32>,
}

impl Workspace {
    fn acquire(ledger: &BufferLedger, classes: usize) -> Self {
        ledger.0.fetch_add(1, Ordering::SeqCst);
        Self {
            ledger: ledger.clone(),
            input: None,
            logits: Vec::with_capacity(classes),
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.ledger.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Capability returned by a successful model load. Cheap to clone; all
/// clones share the same read-only weights.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    model: Arc<DenseClassifier>,
    ledger: BufferLedger,
}

impl ModelHandle {
    pub fn new(model: DenseClassifier) -> Self {
        Self {
            model: Arc::new(model),
            ledger: BufferLedger::default(),
        }
    }

    pub fn input_shape(&self) -> &[usize] {
        self.model.input_shape()
    }

    pub fn ledger(&self) -> &BufferLedger {
        &self.ledger
    }

    /// Runs the classifier on one raw sample and returns the probability
    /// vector in model class order. The sample's rank is normalized first.
    pub fn predict(&self, sample: Tensor) -> InferenceResult<Vec<f32>> {
        let mut ws = Workspace::acquire(&self.ledger, self.model.num_classes());
        let input = normalize_rank(sample, self.model.input_shape())?;
        debug!("input tensor shape: {:?}", input.shape());
        let input = ws.input.insert(input);
        self.model.forward(input.data(), &mut ws.logits);
        Ok(std::mem::take(&mut ws.logits))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/inference/model.rs"]
mod tests;

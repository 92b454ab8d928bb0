use serde_json::Value;

use crate::inference::error::{InferenceError, InferenceResult};

/// Dense row-major f32 tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl Tensor {
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> InferenceResult<Self> {
        let numel = element_count(&shape)?;
        if numel != data.len() {
            return Err(InferenceError::invalid_input(format!(
                "shape {:?} needs {} elements, got {}",
                shape,
                numel,
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Inserts a unit axis at `axis`; `axis == rank` appends.
    pub fn expand_dims(mut self, axis: usize) -> Self {
        let axis = axis.min(self.shape.len());
        self.shape.insert(axis, 1);
        self
    }

    /// Parses a nested JSON array of numbers. Every sub-array at a given
    /// depth must have the same length.
    pub fn from_json(value: &Value) -> InferenceResult<Self> {
        let mut shape = Vec::new();
        let mut cursor = value;
        while let Value::Array(items) = cursor {
            shape.push(items.len());
            match items.first() {
                Some(first) => cursor = first,
                None => break,
            }
        }
        if shape.is_empty() {
            return Err(InferenceError::invalid_input("sample is not an array"));
        }

        let mut data = Vec::new();
        flatten_into(value, &shape, 0, &mut data)?;
        Tensor::new(shape, data)
    }
}

/// Number of elements a tensor of `shape` holds, or an error when the product
/// does not fit in `usize`.
pub fn element_count(shape: &[usize]) -> InferenceResult<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| InferenceError::invalid_input(format!("shape {shape:?} is too large")))
}

fn flatten_into(
    value: &Value,
    shape: &[usize],
    depth: usize,
    out: &mut Vec<f32>,
) -> InferenceResult<()> {
    if depth == shape.len() {
        let v = value.as_f64().ok_or_else(|| {
            InferenceError::invalid_input(format!("non-numeric element at depth {depth}"))
        })?;
        out.push(v as f32);
        return Ok(());
    }
    let items = value.as_array().ok_or_else(|| {
        InferenceError::invalid_input(format!("expected array at depth {depth}"))
    })?;
    if items.len() != shape[depth] {
        return Err(InferenceError::invalid_input(format!(
            "ragged array at depth {}: expected {} items, got {}",
            depth,
            shape[depth],
            items.len()
        )));
    }
    for item in items {
        flatten_into(item, shape, depth + 1, out)?;
    }
    Ok(())
}

/// Pads `tensor` to the model's batched input rank: a tensor two axes short
/// gains a trailing channel axis, then one axis short gains a leading batch
/// axis. The result must match `[1, input_shape...]` exactly.
pub fn normalize_rank(tensor: Tensor, input_shape: &[usize]) -> InferenceResult<Tensor> {
    let expected_rank = input_shape.len() + 1;
    let mut tensor = tensor;
    if expected_rank >= 2 && tensor.rank() == expected_rank - 2 {
        let rank = tensor.rank();
        tensor = tensor.expand_dims(rank);
    }
    if tensor.rank() == expected_rank - 1 {
        tensor = tensor.expand_dims(0);
    }

    let mut expected = Vec::with_capacity(expected_rank);
    expected.push(1);
    expected.extend_from_slice(input_shape);
    if tensor.shape() != expected.as_slice() {
        return Err(InferenceError::shape_mismatch(&expected, tensor.shape()));
    }
    Ok(tensor)
}

#[cfg(test)]
#[path = "../../tests/src_inline/inference/tensor.rs"]
mod tests;

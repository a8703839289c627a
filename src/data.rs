//! Training data.
//!
//! A `Dataset` pairs N input vectors with N expected-output vectors. Both sides are stored
//! as contiguous row-major buffers and never change after construction.

use std::slice::ChunksExact;

use crate::{Error, Result};

/// A supervised dataset: inputs and the outputs expected for them.
///
/// Stored as contiguous buffers with row-major layout:
/// - `inputs.len() == len * input_dim`
/// - `expected.len() == len * expected_dim`
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    inputs: Vec<f64>,
    expected: Vec<f64>,
    len: usize,
    input_dim: usize,
    expected_dim: usize,
}

impl Dataset {
    /// Build a dataset from flat buffers.
    ///
    /// `inputs` is `(len, input_dim)` and `expected` is `(len, expected_dim)`.
    pub fn from_flat(
        inputs: Vec<f64>,
        expected: Vec<f64>,
        input_dim: usize,
        expected_dim: usize,
    ) -> Result<Self> {
        if input_dim == 0 {
            return Err(Error::InvalidData("input_dim must be > 0".to_owned()));
        }
        if expected_dim == 0 {
            return Err(Error::InvalidData("expected_dim must be > 0".to_owned()));
        }
        if inputs.is_empty() {
            return Err(Error::InvalidData("inputs must not be empty".to_owned()));
        }
        if inputs.len() % input_dim != 0 {
            return Err(Error::InvalidData(format!(
                "inputs length {} is not divisible by input_dim {}",
                inputs.len(),
                input_dim
            )));
        }

        let len = inputs.len() / input_dim;
        if expected.len() != len * expected_dim {
            return Err(Error::InvalidData(format!(
                "expected length {} does not match len * expected_dim ({} * {})",
                expected.len(),
                len,
                expected_dim
            )));
        }

        Ok(Self {
            inputs,
            expected,
            len,
            input_dim,
            expected_dim,
        })
    }

    /// Build a dataset from per-sample rows.
    ///
    /// `inputs[i]` pairs with `expected[i]`. This copies into contiguous storage.
    pub fn from_rows(inputs: &[Vec<f64>], expected: &[Vec<f64>]) -> Result<Self> {
        if inputs.len() != expected.len() {
            return Err(Error::InvalidData(format!(
                "inputs/expected length mismatch: {} vs {}",
                inputs.len(),
                expected.len()
            )));
        }
        if inputs.is_empty() {
            return Err(Error::InvalidData("inputs must not be empty".to_owned()));
        }

        let input_dim = inputs[0].len();
        let expected_dim = expected[0].len();
        let inputs = flatten("input", inputs, input_dim)?;
        let expected = flatten("expected", expected, expected_dim)?;

        Self::from_flat(inputs, expected, input_dim, expected_dim)
    }

    #[inline]
    /// Returns the number of samples.
    pub fn size(&self) -> usize {
        self.len
    }

    #[inline]
    /// Returns true if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    #[inline]
    pub fn expected_dim(&self) -> usize {
        self.expected_dim
    }

    #[inline]
    /// Returns the `idx`-th input row.
    ///
    /// Panics if `idx >= size()`.
    pub fn input(&self, idx: usize) -> &[f64] {
        let start = idx * self.input_dim;
        &self.inputs[start..start + self.input_dim]
    }

    #[inline]
    /// Returns the `idx`-th expected row.
    ///
    /// Panics if `idx >= size()`.
    pub fn expected(&self, idx: usize) -> &[f64] {
        let start = idx * self.expected_dim;
        &self.expected[start..start + self.expected_dim]
    }

    /// Input rows in order.
    pub fn inputs(&self) -> ChunksExact<'_, f64> {
        self.inputs.chunks_exact(self.input_dim)
    }

    /// Expected rows in order.
    pub fn expected_rows(&self) -> ChunksExact<'_, f64> {
        self.expected.chunks_exact(self.expected_dim)
    }

    /// `(input, expected)` pairs in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&[f64], &[f64])> + '_ {
        self.inputs().zip(self.expected_rows())
    }
}

fn flatten(what: &str, rows: &[Vec<f64>], dim: usize) -> Result<Vec<f64>> {
    if dim == 0 {
        return Err(Error::InvalidData(format!("{what} rows must not be empty")));
    }
    let mut flat = Vec::with_capacity(rows.len() * dim);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != dim {
            return Err(Error::InvalidData(format!(
                "{what} row {i} has len {}, expected {dim}",
                row.len()
            )));
        }
        flat.extend_from_slice(row);
    }
    Ok(flat)
}

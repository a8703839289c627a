//! Error measures used by the trainer.
//!
//! Training minimizes the per-example sum-of-squares error
//! `E = 0.5 * Σ_j (output[j] - expected[j])^2`, whose derivative with respect to an output is
//! simply `output[j] - expected[j]`. A batch is summarized by one number chosen through
//! [`BatchError`].

use serde::Deserialize;

/// Sum-of-squares error of one example: `0.5 * Σ (output - expected)^2`.
///
/// Not averaged over units.
#[inline]
pub fn squared_error(output: &[f64], expected: &[f64]) -> f64 {
    assert_eq!(
        output.len(),
        expected.len(),
        "output len {} does not match expected len {}",
        output.len(),
        expected.len()
    );

    let mut sum_sq = 0.0_f64;
    for (&o, &e) in output.iter().zip(expected) {
        let diff = o - e;
        sum_sq = diff.mul_add(diff, sum_sq);
    }
    0.5 * sum_sq
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
/// How the example errors of one pass over a dataset are reduced to a batch error.
pub enum BatchError {
    /// Largest example error. Converging under this rule bounds every example.
    #[default]
    Max,
    /// Mean example error.
    Mean,
}

impl BatchError {
    /// Reduce example errors to one batch error. Returns 0.0 for no errors.
    pub fn reduce<I: IntoIterator<Item = f64>>(self, errors: I) -> f64 {
        let mut acc = BatchAccumulator::new(self);
        for e in errors {
            acc.push(e);
        }
        acc.finish()
    }
}

/// Streaming form of [`BatchError::reduce`], used inside the training loop.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BatchAccumulator {
    rule: BatchError,
    value: f64,
    count: usize,
}

impl BatchAccumulator {
    pub(crate) fn new(rule: BatchError) -> Self {
        Self {
            rule,
            value: 0.0,
            count: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, error: f64) {
        match self.rule {
            // NaN sticks once seen.
            BatchError::Max => {
                if error.is_nan() || error > self.value {
                    self.value = error;
                }
            }
            BatchError::Mean => self.value += error,
        }
        self.count += 1;
    }

    pub(crate) fn finish(self) -> f64 {
        match self.rule {
            BatchError::Max => self.value,
            BatchError::Mean if self.count == 0 => 0.0,
            BatchError::Mean => self.value / self.count as f64,
        }
    }
}

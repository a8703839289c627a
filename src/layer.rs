use rand::Rng;
use rayon::prelude::*;

use crate::Activation;

/// One layer of units.
///
/// The input layer only holds `values`. Every other layer also owns its bias vector and the
/// matrix of weights coming in from the previous layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    units: usize,
    previous_units: usize,
    values: Vec<f64>,
    bias: Vec<f64>,
    /// Row-major matrix with shape (previous_units, units): `weights[source * units + dest]`.
    weights: Vec<f64>,
}

impl Layer {
    /// Layer 0. Has no bias and no weights.
    pub fn input(units: usize) -> Self {
        Self {
            units,
            previous_units: 0,
            values: vec![0.0; units],
            bias: Vec::new(),
            weights: Vec::new(),
        }
    }

    /// Fully-connected layer of `units` units wired from `previous_units` units.
    ///
    /// Biases start at 1.0, weights at 0.0.
    pub fn dense(previous_units: usize, units: usize) -> Self {
        Self {
            units,
            previous_units,
            values: vec![0.0; units],
            bias: vec![1.0; units],
            weights: vec![0.0; previous_units * units],
        }
    }

    /// Overwrites every weight with a uniform sample in `[-1, 1)`, in index order.
    pub fn randomize_weights<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for w in &mut self.weights {
            *w = rng.gen_range(-1.0..1.0);
        }
    }

    #[inline]
    pub fn units(&self) -> usize {
        self.units
    }

    #[inline]
    pub fn previous_units(&self) -> usize {
        self.previous_units
    }

    #[inline]
    pub fn is_input(&self) -> bool {
        self.weights.is_empty() && self.bias.is_empty()
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn bias(&self) -> &[f64] {
        &self.bias
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Position of the weight connecting `source` (previous layer) to `dest` (this layer).
    #[inline]
    pub fn weight_index(&self, source: usize, dest: usize) -> usize {
        source * self.units + dest
    }

    #[cfg(test)]
    pub(crate) fn bias_mut(&mut self) -> &mut [f64] {
        &mut self.bias
    }

    #[cfg(test)]
    pub(crate) fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    /// Copies an external input vector into this layer's values.
    #[inline]
    pub(crate) fn set_values(&mut self, input: &[f64]) {
        debug_assert_eq!(input.len(), self.units);
        self.values.copy_from_slice(input);
    }

    /// Forward pass for a single sample.
    ///
    /// Computes `values[j] = f(bias[j] + Σ_i precursor[i] * weights[i * units + j])`.
    ///
    /// Shape contract: `precursor.len() == self.previous_units`.
    #[inline]
    pub(crate) fn forward(&mut self, precursor: &[f64], activation: Activation) {
        debug_assert_eq!(precursor.len(), self.previous_units);

        let Layer {
            units,
            values,
            bias,
            weights,
            ..
        } = self;
        for (j, out) in values.iter_mut().enumerate() {
            *out = activation.apply(net_input(precursor, bias, weights, *units, j));
        }
    }

    /// Same as [`Layer::forward`], fanning the units out over the rayon pool.
    ///
    /// Each unit reads the shared precursor and writes only its own slot.
    pub(crate) fn forward_parallel(&mut self, precursor: &[f64], activation: Activation) {
        debug_assert_eq!(precursor.len(), self.previous_units);

        let Layer {
            units,
            values,
            bias,
            weights,
            ..
        } = self;
        let units = *units;
        let bias = &*bias;
        let weights = &*weights;
        values.par_iter_mut().enumerate().for_each(|(j, out)| {
            *out = activation.apply(net_input(precursor, bias, weights, units, j));
        });
    }

    /// Gradient-descent step for this layer.
    ///
    /// `delta` holds this layer's fully computed deltas and `precursor` the previous layer's
    /// values from the same forward pass.
    pub(crate) fn update(&mut self, delta: &[f64], precursor: &[f64], rate: f64) {
        debug_assert_eq!(delta.len(), self.units);
        debug_assert_eq!(precursor.len(), self.previous_units);

        let units = self.units;
        for (j, &d) in delta.iter().enumerate() {
            let step = -rate * d;
            for (i, &x) in precursor.iter().enumerate() {
                self.weights[i * units + j] += step * x;
            }
            self.bias[j] += step;
        }
    }
}

#[inline]
fn net_input(precursor: &[f64], bias: &[f64], weights: &[f64], units: usize, j: usize) -> f64 {
    let mut sum = bias[j];
    for (i, &x) in precursor.iter().enumerate() {
        sum = x.mul_add(weights[i * units + j], sum);
    }
    sum
}

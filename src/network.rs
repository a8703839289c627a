use crate::{Activation, Error, Layer, Result};

/// A feed-forward network: an input layer, zero or more hidden layers and an output layer.
///
/// Built by [`crate::NetworkBuilder`]. The layer count and unit counts never change after
/// construction; only activations, weights and biases are mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layers: Vec<Layer>,
    activation: Activation,
}

impl Network {
    pub(crate) fn from_layers(layers: Vec<Layer>, activation: Activation) -> Self {
        debug_assert!(layers.len() >= 2, "network needs an input and an output layer");
        debug_assert!(layers[0].is_input());
        Self { layers, activation }
    }

    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn num_hidden_layers(&self) -> usize {
        self.layers.len() - 2
    }

    #[inline]
    pub fn input_units(&self) -> usize {
        self.layers[0].units()
    }

    #[inline]
    pub fn output_units(&self) -> usize {
        self.layers[self.layers.len() - 1].units()
    }

    #[inline]
    pub fn activation(&self) -> Activation {
        self.activation
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Panics if `layer >= num_layers()`.
    #[inline]
    pub fn layer(&self, layer: usize) -> &Layer {
        &self.layers[layer]
    }

    #[inline]
    pub fn units(&self, layer: usize) -> usize {
        self.layers[layer].units()
    }

    /// Output of the most recent forward pass for `layer`.
    #[inline]
    pub fn values(&self, layer: usize) -> &[f64] {
        self.layers[layer].values()
    }

    #[inline]
    pub fn bias(&self, layer: usize) -> &[f64] {
        self.layers[layer].bias()
    }

    #[inline]
    pub fn weights(&self, layer: usize) -> &[f64] {
        self.layers[layer].weights()
    }

    /// Output of the most recent forward pass.
    #[inline]
    pub fn output(&self) -> &[f64] {
        self.values(self.layers.len() - 1)
    }

    /// Forward pass for a single sample.
    ///
    /// Every layer's values are overwritten; they stay queryable through [`Network::values`]
    /// until the next call.
    pub fn propagate(&mut self, input: &[f64]) -> Result<&[f64]> {
        self.propagate_with(input, false)
    }

    /// Forward pass that computes the units of each layer in parallel.
    ///
    /// Layers are still evaluated one after another. The result is identical to
    /// [`Network::propagate`].
    pub fn propagate_parallel(&mut self, input: &[f64]) -> Result<&[f64]> {
        self.propagate_with(input, true)
    }

    pub(crate) fn propagate_with(&mut self, input: &[f64], parallel: bool) -> Result<&[f64]> {
        Error::check_len("input", self.input_units(), input.len())?;
        self.forward(input, parallel);
        Ok(self.output())
    }

    /// Unchecked forward pass. `input.len()` must equal `input_units()`.
    pub(crate) fn forward(&mut self, input: &[f64], parallel: bool) {
        self.layers[0].set_values(input);

        let activation = self.activation;
        for idx in 1..self.layers.len() {
            // Borrow the previous layer immutably and the current layer mutably.
            let (left, right) = self.layers.split_at_mut(idx);
            let precursor = left[idx - 1].values();
            let layer = &mut right[0];
            if parallel {
                layer.forward_parallel(precursor, activation);
            } else {
                layer.forward(precursor, activation);
            }
        }
    }

    #[inline]
    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn tiny() -> Network {
        // 2 -> 1, weights 0.5 and -0.25, bias 1.0 from construction.
        let mut out = Layer::dense(2, 1);
        out.weights_mut().copy_from_slice(&[0.5, -0.25]);
        Network::from_layers(vec![Layer::input(2), out], Activation::Sigmoid)
    }

    #[test]
    fn propagate_computes_output_layer() {
        let mut net = tiny();
        let y = net.propagate(&[1.0, 2.0]).unwrap().to_vec();
        let z: f64 = 1.0 + 0.5 - 0.5;
        assert_relative_eq!(y[0], 1.0 / (1.0 + (-z).exp()), epsilon = 1e-12);
        assert_eq!(net.values(0), &[1.0, 2.0]);
        assert_eq!(net.output(), y.as_slice());
    }

    #[test]
    fn propagate_rejects_wrong_input_len() {
        let mut net = tiny();
        let before = net.clone();
        let err = net.propagate(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                expected: 2,
                actual: 3,
                ..
            }
        ));
        assert_eq!(net, before);
    }

    #[test]
    fn counts_layers() {
        let net = tiny();
        assert_eq!(net.num_layers(), 2);
        assert_eq!(net.num_hidden_layers(), 0);
        assert_eq!(net.input_units(), 2);
        assert_eq!(net.output_units(), 1);
        assert_eq!(net.units(1), 1);
    }
}

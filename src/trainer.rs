//! Backpropagation training.
//!
//! A [`Trainer`] owns a [`Network`] together with the learning rate and one reusable delta
//! buffer per layer. Each training example runs four phases in a fixed order:
//!
//! 1. forward pass with the example input
//! 2. output deltas: `f'(out[j]) * (out[j] - expected[j])`
//! 3. hidden deltas, last hidden layer first:
//!    `f'(values[l][j]) * Σ_i delta[l+1][i] * w[l+1](j -> i)`
//! 4. in-place update of every weight and bias, only after all deltas are known
//!
//! `f'` is the derivative carried by the network's [`crate::Activation`].

use log::{debug, trace, warn};

use crate::loss::{BatchAccumulator, squared_error};
use crate::{BatchError, Dataset, Error, Network, Result, TrainConfig};

/// Outcome of a converged [`Trainer::train`] run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainReport {
    /// Full passes over the dataset, including the converging one.
    pub iterations: usize,
    /// Batch error of the converging pass.
    pub error: f64,
}

/// A network plus everything needed to train it by gradient descent.
#[derive(Debug, Clone)]
pub struct Trainer {
    network: Network,
    learning_rate: f64,
    // One buffer per layer, overwritten by every backward pass. Layer 0 is never written.
    deltas: Vec<Vec<f64>>,
    iterations: Option<usize>,
}

impl Trainer {
    pub fn new(network: Network, learning_rate: f64) -> Self {
        let deltas = network
            .layers()
            .iter()
            .map(|layer| vec![0.0; layer.units()])
            .collect();
        Self {
            network,
            learning_rate,
            deltas,
            iterations: None,
        }
    }

    #[inline]
    pub fn network(&self) -> &Network {
        &self.network
    }

    #[inline]
    pub fn into_network(self) -> Network {
        self.network
    }

    #[inline]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Passes run by the most recent [`Trainer::train`] call, `None` if it never ran.
    #[inline]
    pub fn iterations(&self) -> Option<usize> {
        self.iterations
    }

    /// Deltas of `layer` from the most recent training example.
    #[inline]
    pub fn deltas(&self, layer: usize) -> &[f64] {
        &self.deltas[layer]
    }

    /// See [`Network::propagate`].
    pub fn propagate(&mut self, input: &[f64]) -> Result<&[f64]> {
        self.network.propagate(input)
    }

    /// See [`Network::propagate_parallel`].
    pub fn propagate_parallel(&mut self, input: &[f64]) -> Result<&[f64]> {
        self.network.propagate_parallel(input)
    }

    /// Train on a single example.
    ///
    /// Returns the example's error `0.5 * Σ (output - expected)^2`, measured on the forward
    /// pass that preceded the update. Nothing is mutated when a length check fails.
    pub fn train_example(&mut self, input: &[f64], expected: &[f64]) -> Result<f64> {
        Error::check_len("input", self.network.input_units(), input.len())?;
        Error::check_len("expected", self.network.output_units(), expected.len())?;
        Ok(self.step(input, expected, false))
    }

    /// One pass over `data`, training on every example in order.
    ///
    /// Returns the batch error reduced by `rule`.
    pub fn train_batch(&mut self, data: &Dataset, rule: BatchError) -> Result<f64> {
        self.check_dataset(data)?;
        Ok(self.batch(data, rule, false))
    }

    /// Repeat [`Trainer::train_batch`] until the batch error drops to
    /// `cfg.convergence_threshold` or `cfg.max_iterations` passes have run.
    ///
    /// Running out of passes is [`Error::NonConvergence`], carrying the last batch error and
    /// the number of passes. A NaN or infinite batch error stops training at once with the
    /// same error. The network keeps whatever it learned in both cases.
    pub fn train(&mut self, data: &Dataset, cfg: &TrainConfig) -> Result<TrainReport> {
        cfg.validate()?;
        self.check_dataset(data)?;

        let mut error = f64::INFINITY;
        for iteration in 1..=cfg.max_iterations {
            error = self.batch(data, cfg.batch_error, cfg.parallel);
            trace!("iteration {iteration}: error = {error}");

            if !error.is_finite() {
                self.iterations = Some(iteration);
                warn!("training diverged at iteration {iteration}, error {error}");
                return Err(Error::NonConvergence {
                    error,
                    iterations: iteration,
                });
            }

            if error <= cfg.convergence_threshold {
                self.iterations = Some(iteration);
                debug!("converged after {iteration} iterations with error {error}");
                return Ok(TrainReport {
                    iterations: iteration,
                    error,
                });
            }
        }

        self.iterations = Some(cfg.max_iterations);
        warn!(
            "no convergence within {} iterations, last error {error}",
            cfg.max_iterations
        );
        Err(Error::NonConvergence {
            error,
            iterations: cfg.max_iterations,
        })
    }

    fn check_dataset(&self, data: &Dataset) -> Result<()> {
        Error::check_len("dataset input", self.network.input_units(), data.input_dim())?;
        Error::check_len(
            "dataset expected",
            self.network.output_units(),
            data.expected_dim(),
        )
    }

    fn batch(&mut self, data: &Dataset, rule: BatchError, parallel: bool) -> f64 {
        let mut acc = BatchAccumulator::new(rule);
        for (input, expected) in data.iter() {
            acc.push(self.step(input, expected, parallel));
        }
        acc.finish()
    }

    /// Unchecked training step. Lengths were validated by the caller.
    fn step(&mut self, input: &[f64], expected: &[f64], parallel: bool) -> f64 {
        self.network.forward(input, parallel);
        let error = squared_error(self.network.output(), expected);
        self.output_deltas(expected);
        self.hidden_deltas();
        self.update();
        error
    }

    fn output_deltas(&mut self, expected: &[f64]) {
        let activation = self.network.activation();
        let last = self.network.num_layers() - 1;
        let out = self.network.values(last);

        for ((d, &o), &e) in self.deltas[last].iter_mut().zip(out).zip(expected) {
            *d = activation.derivative_from_output(o) * (o - e);
        }
    }

    fn hidden_deltas(&mut self) {
        let activation = self.network.activation();
        let last = self.network.num_layers() - 1;

        for l in (1..last).rev() {
            let values = self.network.values(l);
            let next = self.network.layer(l + 1);
            let next_weights = next.weights();

            let (head, tail) = self.deltas.split_at_mut(l + 1);
            let delta = &mut head[l];
            let next_delta = &tail[0];

            for (j, d) in delta.iter_mut().enumerate() {
                let mut blame = 0.0_f64;
                for (i, &nd) in next_delta.iter().enumerate() {
                    blame = nd.mul_add(next_weights[next.weight_index(j, i)], blame);
                }
                *d = activation.derivative_from_output(values[j]) * blame;
            }
        }
    }

    fn update(&mut self) {
        let rate = self.learning_rate;
        let layers = self.network.layers_mut();

        for l in 1..layers.len() {
            let (left, right) = layers.split_at_mut(l);
            right[0].update(&self.deltas[l], left[l - 1].values(), rate);
        }
    }
}

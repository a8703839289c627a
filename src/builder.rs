//! Network builder.
//!
//! `NetworkBuilder` is the way to define a network. It starts from the input and output
//! sizes, accepts hidden layers in order and appends the output layer when one of the
//! `build*` methods consumes it:
//!
//! - biases always start at 1.0
//! - weights are drawn uniformly from `[-1, 1)` by a seeded `StdRng`, so the same seed and
//!   topology always give bit-identical parameters
//!
//! The result is a [`Trainer`] wrapping the new [`crate::Network`].

use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Activation, Error, Layer, Network, Result, Trainer};

/// Default gradient-descent step size.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// How the weights of a freshly built network are initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Init {
    /// Deterministic initialization from the given seed.
    Seed(u64),
    /// Seed derived from the system clock. Not reproducible.
    FromTime,
    /// Leave all weights at 0.0.
    Skip,
}

#[derive(Debug, Clone)]
/// Builder for a [`Network`] and its [`Trainer`].
///
/// Example:
///
/// ```rust
/// use rust_fnn::NetworkBuilder;
///
/// # fn main() -> rust_fnn::Result<()> {
/// let mut trainer = NetworkBuilder::new(2, 1)?
///     .add_hidden_layer(3)?
///     .with_learning_rate(0.3)
///     .build_with_seed(42)?;
/// let out = trainer.propagate(&[1.0, 0.0])?;
/// assert_eq!(out.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct NetworkBuilder {
    layers: Vec<Layer>,
    // Units of the most recently added layer.
    last_units: usize,
    output_units: usize,
    learning_rate: f64,
    activation: Activation,
}

impl NetworkBuilder {
    /// Start a topology with `input_units` inputs and `output_units` outputs.
    pub fn new(input_units: usize, output_units: usize) -> Result<Self> {
        if input_units == 0 {
            return Err(Error::InvalidConfig("input units must be > 0".to_owned()));
        }
        if output_units == 0 {
            return Err(Error::InvalidConfig("output units must be > 0".to_owned()));
        }
        Ok(Self {
            layers: vec![Layer::input(input_units)],
            last_units: input_units,
            output_units,
            learning_rate: DEFAULT_LEARNING_RATE,
            activation: Activation::default(),
        })
    }

    /// Append a fully-connected hidden layer of `units` units.
    pub fn add_hidden_layer(mut self, units: usize) -> Result<Self> {
        if units == 0 {
            return Err(Error::InvalidConfig(
                "hidden layer units must be > 0".to_owned(),
            ));
        }
        self.layers.push(Layer::dense(self.last_units, units));
        self.last_units = units;
        Ok(self)
    }

    /// Set the gradient-descent step size.
    ///
    /// The value is used as given; choosing a stable rate is up to the caller.
    pub fn with_learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    /// Set the activation used by every hidden and output unit.
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Build with a clock-derived seed.
    ///
    /// Every call produces different weights. Use [`NetworkBuilder::build_with_seed`] when
    /// results must be reproducible.
    pub fn build(self) -> Result<Trainer> {
        self.build_with_init(Init::FromTime)
    }

    /// Build using a deterministic seed.
    pub fn build_with_seed(self, seed: u64) -> Result<Trainer> {
        self.build_with_init(Init::Seed(seed))
    }

    pub fn build_with_init(self, init: Init) -> Result<Trainer> {
        match init {
            Init::Seed(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                self.build_with_rng(&mut rng)
            }
            Init::FromTime => {
                let seed = time_seed();
                debug!("initializing weights from time-derived seed {seed}");
                let mut rng = StdRng::seed_from_u64(seed);
                self.build_with_rng(&mut rng)
            }
            Init::Skip => self.finish(|_| {}),
        }
    }

    /// Build using the provided RNG.
    ///
    /// Layers are initialized front to back, each one in weight-index order.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Trainer> {
        self.finish(|layers| {
            for layer in layers.iter_mut().skip(1) {
                layer.randomize_weights(rng);
            }
        })
    }

    fn finish(mut self, init: impl FnOnce(&mut [Layer])) -> Result<Trainer> {
        self.activation.validate()?;

        self.layers
            .push(Layer::dense(self.last_units, self.output_units));
        init(&mut self.layers);

        debug!(
            "built network with units {:?}, activation {:?}, learning rate {}",
            self.layers.iter().map(Layer::units).collect::<Vec<_>>(),
            self.activation,
            self.learning_rate
        );

        let network = Network::from_layers(self.layers, self.activation);
        Ok(Trainer::new(network, self.learning_rate))
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

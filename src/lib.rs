//! A small feed-forward neural network crate.
//!
//! `rust-fnn` builds a stack of fully-connected layers, runs forward inference and trains
//! the network by backpropagation with plain gradient descent until a convergence threshold
//! or an iteration cap is reached.
//!
//! # Design goals
//!
//! - Plain data: every layer is three flat `Vec<f64>`s (values, bias, weights).
//! - Reproducible: a seed fully determines the initial weights.
//! - Explicit failures: shape problems and non-convergence are typed [`Error`]s.
//!
//! # Data layout
//!
//! - Scalars are `f64`.
//! - Layer 0 is the input layer. It has no bias and no weights.
//! - The weights of layer `l` form a `(units[l-1], units[l])` row-major matrix: the weight
//!   from unit `i` of the previous layer to unit `j` of this layer is at
//!   `weights[i * units[l] + j]`. Forward and backward passes use the same layout.
//! - Biases start at 1.0; weights are uniform in `[-1, 1)`.
//!
//! # Quick start
//!
//! ```rust
//! use rust_fnn::{Dataset, NetworkBuilder, TrainConfig};
//!
//! # fn main() -> rust_fnn::Result<()> {
//! let xs = vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![1.0, 0.0],
//!     vec![1.0, 1.0],
//! ];
//! let ys = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
//! let xor = Dataset::from_rows(&xs, &ys)?;
//!
//! let mut trainer = NetworkBuilder::new(2, 1)?
//!     .add_hidden_layer(3)?
//!     .with_learning_rate(0.3)
//!     .build_with_seed(42)?;
//!
//! let report = trainer.train(&xor, &TrainConfig::new(0.1, 2_000))?;
//! assert!(report.error <= 0.1);
//!
//! let out = trainer.propagate(&[1.0, 0.0])?;
//! assert!(out[0] > 0.5);
//! # Ok(())
//! # }
//! ```
//!
//! # Non-convergence
//!
//! [`Trainer::train`] never silently returns a network that missed the threshold. It
//! returns [`Error::NonConvergence`] with the last batch error and the number of passes,
//! and the caller decides whether the partially trained network is good enough:
//!
//! ```rust
//! use rust_fnn::{Dataset, Error, NetworkBuilder, TrainConfig};
//!
//! # fn main() -> rust_fnn::Result<()> {
//! let xor = Dataset::from_rows(
//!     &[vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]],
//!     &[vec![0.0], vec![1.0], vec![1.0], vec![0.0]],
//! )?;
//!
//! // No hidden layer: XOR is not linearly separable.
//! let mut trainer = NetworkBuilder::new(2, 1)?.build_with_seed(42)?;
//! match trainer.train(&xor, &TrainConfig::new(0.1, 200)) {
//!     Err(Error::NonConvergence { iterations, .. }) => assert_eq!(iterations, 200),
//!     other => panic!("unexpected {other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod builder;
pub mod config;
pub mod data;
pub mod error;
pub mod layer;
pub mod loss;
pub mod mnist;
pub mod network;
pub mod scale;
pub mod trainer;

pub use activation::Activation;
pub use builder::{Init, NetworkBuilder};
pub use config::{TrainConfig, load_config};
pub use data::Dataset;
pub use error::{Error, Result};
pub use layer::Layer;
pub use loss::BatchError;
pub use network::Network;
pub use scale::{rescale_in_place, rescale_into, rescale_to_new};
pub use trainer::{TrainReport, Trainer};

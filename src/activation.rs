//! Activation functions.
//!
//! Every non-input unit computes a pre-activation value `z = bias + Σ w x` and then applies
//! the network's activation: `y = activation(z)`.
//!
//! Layers only keep the *post-activation* outputs `y`. Backpropagation therefore needs the
//! derivative expressed through `y`, and each variant carries both halves so the forward
//! function and the derivative used by the trainer can never disagree.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Element-wise activation function shared by all non-input layers.
pub enum Activation {
    /// Logistic sigmoid `1 / (1 + e^-x)`.
    #[default]
    Sigmoid,
    Tanh,
    ReLU,
    LeakyReLU { alpha: f64 },
}

impl Activation {
    /// Validate activation parameters.
    pub fn validate(self) -> Result<()> {
        match self {
            Activation::LeakyReLU { alpha } => {
                if !(alpha.is_finite() && alpha >= 0.0) {
                    return Err(Error::InvalidConfig(format!(
                        "leaky ReLU alpha must be finite and >= 0, got {alpha}"
                    )));
                }
            }
            Activation::Sigmoid | Activation::Tanh | Activation::ReLU => {}
        }

        Ok(())
    }

    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid(x),
            Activation::Tanh => x.tanh(),
            Activation::ReLU => x.max(0.0),
            Activation::LeakyReLU { alpha } => {
                if x > 0.0 {
                    x
                } else {
                    alpha * x
                }
            }
        }
    }

    /// Derivative of the activation with respect to its input, expressed in terms
    /// of the cached post-activation output `y`.
    #[inline]
    pub fn derivative_from_output(self, y: f64) -> f64 {
        match self {
            Activation::Sigmoid => y * (1.0 - y),
            Activation::Tanh => 1.0 - y * y,
            Activation::ReLU => {
                if y > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::LeakyReLU { alpha } => {
                if y > 0.0 {
                    1.0
                } else {
                    alpha
                }
            }
        }
    }
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    // Numerically stable sigmoid.
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

//! Training configuration.
//!
//! `TrainConfig` controls the iteration loop of [`crate::Trainer::train`]. It can be built
//! in code or parsed from JSON; missing fields fall back to the defaults.
//!
//! ```json
//! {
//!   "convergence_threshold": 0.01,
//!   "max_iterations": 1000,
//!   "batch_error": "max",
//!   "parallel": false
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{BatchError, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainConfig {
    /// Training stops successfully once the batch error is at or below this value.
    pub convergence_threshold: f64,
    /// Upper bound on full passes over the dataset.
    pub max_iterations: usize,
    /// How example errors are reduced to the batch error.
    pub batch_error: BatchError,
    /// Use the parallel forward pass.
    pub parallel: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            convergence_threshold: 0.01,
            max_iterations: 1000,
            batch_error: BatchError::Max,
            parallel: false,
        }
    }
}

impl TrainConfig {
    pub fn new(convergence_threshold: f64, max_iterations: usize) -> Self {
        Self {
            convergence_threshold,
            max_iterations,
            ..Self::default()
        }
    }

    pub fn with_batch_error(mut self, batch_error: BatchError) -> Self {
        self.batch_error = batch_error;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.convergence_threshold.is_finite() && self.convergence_threshold >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "convergence_threshold must be finite and >= 0, got {}",
                self.convergence_threshold
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig(
                "max_iterations must be > 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TrainConfig =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Loads a training configuration from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrainConfig> {
    let contents = fs::read_to_string(path)?;
    TrainConfig::from_json_str(&contents)
}

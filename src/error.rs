//! Error types for PELiNN.
//!
//! Every fallible operation in the crate returns one of the enums defined
//! here:
//!
//! ```text
//! PelinnError (top-level)
//! ├── ConfigError      (config validation / file loading)
//! └── MitigationError  (baseline CDR / PEC collaborators)
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Convenient `Result` alias for model and loss operations.
pub type PelinnResult<T> = Result<T, PelinnError>;

/// Convenient `Result` alias for the baseline mitigation wrappers.
pub type MitigationResult<T> = Result<T, MitigationError>;

/// Top-level error type for the forward pass and the physics loss.
#[derive(Debug, Error)]
pub enum PelinnError {
    /// A configuration validation or loading error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A tensor did not have the shape the model was configured for.
    #[error("Shape mismatch for `{tensor}`: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Which argument was malformed.
        tensor: &'static str,
        /// Expected shape.
        expected: Vec<usize>,
        /// Actual shape.
        actual: Vec<usize>,
    },

    /// Predictions and targets have different lengths.
    #[error("Length mismatch: {pred} predictions but {target} targets")]
    LengthMismatch {
        /// Number of predictions.
        pred: usize,
        /// Number of targets.
        target: usize,
    },

    /// A forward pass or loss was given zero samples.
    #[error("Batch is empty")]
    EmptyBatch,

    /// A group referenced a sample outside the batch.
    #[error("Group index {index} is out of bounds for batch of length {len}")]
    IndexOutOfBounds {
        /// The out-of-range index.
        index: usize,
        /// The batch length.
        len: usize,
    },

    /// The Euler step size was not a finite positive number.
    #[error("Invalid time step {0}: dt must be finite and > 0")]
    InvalidTimeStep(f64),
}

impl PelinnError {
    /// Construct a [`PelinnError::ShapeMismatch`].
    pub fn shape_mismatch(tensor: &'static str, expected: Vec<usize>, actual: Vec<usize>) -> Self {
        PelinnError::ShapeMismatch {
            tensor,
            expected,
            actual,
        }
    }
}

/// Errors produced when loading or validating a [`PelinnConfig`].
///
/// [`PelinnConfig`]: crate::config::PelinnConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field has an invalid value.
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Name of the field.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// A configuration file could not be read or written.
    #[error("Cannot access config file `{path}`: {source}")]
    File {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for [`PelinnConfig`].
    ///
    /// [`PelinnConfig`]: crate::config::PelinnConfig
    #[error("Malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Construct a [`ConfigError::InvalidValue`].
    pub fn invalid_value<S: Into<String>>(field: &'static str, reason: S) -> Self {
        ConfigError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the CDR / PEC baseline wrappers.
#[derive(Debug, Error)]
pub enum MitigationError {
    /// PEC was called without a calibrated quasiprobability representation.
    #[error(
        "PEC requires a noise-model-specific quasiprobability representation; \
         provide one built from calibration"
    )]
    MissingRepresentation,

    /// A mitigation parameter is out of range.
    #[error("Invalid mitigation config `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the parameter.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// The executor failed to evaluate a circuit.
    #[error("Executor failed: {0}")]
    Executor(String),

    /// The external mitigation library reported a failure.
    #[error("Mitigation backend failed: {0}")]
    Backend(String),
}

impl MitigationError {
    /// Construct a [`MitigationError::InvalidConfig`].
    pub fn invalid_config<S: Into<String>>(field: &'static str, reason: S) -> Self {
        MitigationError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

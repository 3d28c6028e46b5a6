//! Model and loss configuration for PELiNN.
//!
//! [`PelinnConfig`] holds every hyper-parameter that fixes the shape and
//! numerics of a model instance, plus the invariance weight of the loss. It
//! is serializable via [`serde`] so it can be kept next to experiment data
//! as JSON.
//!
//! # Example
//!
//! ```rust
//! use burn::backend::NdArray;
//! use pelinn::config::PelinnConfig;
//!
//! let cfg = PelinnConfig::new(12).with_hid_dim(32);
//! cfg.validate().expect("config is valid");
//!
//! let model = cfg.init::<NdArray<f32>>(&Default::default()).unwrap();
//! assert_eq!(model.hid_dim(), 32);
//! assert_eq!(model.steps(), 5);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::cells::{DEFAULT_DT, DEFAULT_EPSILON};
use crate::error::{ConfigError, PelinnResult};
use crate::loss::{PhysicsLoss, DEFAULT_ALPHA_INV};
use crate::rnn::{PELiNNQEM, DEFAULT_HID_DIM, DEFAULT_STEPS};
use burn::tensor::backend::Backend;

/// Complete configuration of a PELiNN model and its training objective.
///
/// Shape fields are fixed for the lifetime of a model built from this
/// config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PelinnConfig {
    /// Number of circuit features per sample. Required, no default.
    pub in_dim: usize,

    /// Hidden state size. Default: **64**.
    #[serde(default = "default_hid_dim")]
    pub hid_dim: usize,

    /// Number of liquid cell applications per forward pass. `0` is allowed
    /// and makes the prediction independent of the input. Default: **5**.
    #[serde(default = "default_steps")]
    pub steps: usize,

    /// Euler step size. Default: **0.1**.
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// Lower bound added to the time constant. Default: **1e-3**.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Weight of the invariance term in the physics loss. Default: **0.1**.
    #[serde(default = "default_alpha_inv")]
    pub alpha_inv: f64,
}

fn default_hid_dim() -> usize {
    DEFAULT_HID_DIM
}

fn default_steps() -> usize {
    DEFAULT_STEPS
}

fn default_dt() -> f64 {
    DEFAULT_DT
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_alpha_inv() -> f64 {
    DEFAULT_ALPHA_INV
}

impl PelinnConfig {
    /// Default configuration for `in_dim` input features.
    pub fn new(in_dim: usize) -> Self {
        PelinnConfig {
            in_dim,
            hid_dim: DEFAULT_HID_DIM,
            steps: DEFAULT_STEPS,
            dt: DEFAULT_DT,
            epsilon: DEFAULT_EPSILON,
            alpha_inv: DEFAULT_ALPHA_INV,
        }
    }

    pub fn with_hid_dim(mut self, hid_dim: usize) -> Self {
        self.hid_dim = hid_dim;
        self
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_alpha_inv(mut self, alpha_inv: f64) -> Self {
        self.alpha_inv = alpha_inv;
        self
    }

    /// Load a [`PelinnConfig`] from a JSON file at `path`.
    ///
    /// `in_dim` must be present; every other missing field takes its
    /// default. The result is validated.
    ///
    /// # Errors
    ///
    /// [`ConfigError::File`] if the file cannot be read,
    /// [`ConfigError::Json`] if it is malformed and
    /// [`ConfigError::InvalidValue`] if a field is out of range.
    pub fn from_json(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: PelinnConfig = serde_json::from_str(&contents)?;
        cfg.validate()?;
        debug!(path = %path.display(), in_dim = cfg.in_dim, "loaded PELiNN config");
        Ok(cfg)
    }

    /// Write this configuration as pretty-printed JSON to `path`, creating
    /// parent directories if necessary.
    pub fn to_json(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::File {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::File {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate all fields and return the first problem found.
    ///
    /// # Validated invariants
    ///
    /// - `in_dim` and `hid_dim` must be non-zero.
    /// - `dt` and `epsilon` must be finite and strictly positive.
    /// - `alpha_inv` must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.in_dim == 0 {
            return Err(ConfigError::invalid_value("in_dim", "must be > 0"));
        }
        if self.hid_dim == 0 {
            return Err(ConfigError::invalid_value("hid_dim", "must be > 0"));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::invalid_value(
                "dt",
                format!("must be finite and > 0, got {}", self.dt),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ConfigError::invalid_value(
                "epsilon",
                format!("must be finite and > 0, got {}", self.epsilon),
            ));
        }
        PhysicsLoss::new(self.alpha_inv)?;
        Ok(())
    }

    /// Build a freshly initialised model.
    pub fn init<B: Backend>(&self, device: &B::Device) -> PelinnResult<PELiNNQEM<B>> {
        self.validate()?;
        debug!(
            in_dim = self.in_dim,
            hid_dim = self.hid_dim,
            steps = self.steps,
            dt = self.dt,
            "initialising PELiNN model"
        );
        Ok(PELiNNQEM::new(self.in_dim, self.hid_dim, self.steps, device)
            .with_dt(self.dt)
            .with_epsilon(self.epsilon))
    }

    /// The physics loss weighted by `alpha_inv`.
    pub fn loss(&self) -> Result<PhysicsLoss, ConfigError> {
        PhysicsLoss::new(self.alpha_inv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let cfg = PelinnConfig::new(1);
        cfg.validate().unwrap();
        assert_eq!(cfg.in_dim, 1);
        assert_eq!(cfg.hid_dim, 64);
        assert_eq!(cfg.steps, 5);
        assert!((cfg.dt - 0.1).abs() < 1e-12);
        assert!((cfg.epsilon - 1e-3).abs() < 1e-12);
        assert!((cfg.alpha_inv - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_zero_steps_is_valid() {
        PelinnConfig::new(3).with_steps(0).validate().unwrap();
    }

    #[test]
    fn test_invalid_fields() {
        let cases = [
            (PelinnConfig::new(0), "in_dim"),
            (PelinnConfig::new(2).with_hid_dim(0), "hid_dim"),
            (PelinnConfig::new(2).with_dt(0.0), "dt"),
            (PelinnConfig::new(2).with_dt(-1.0), "dt"),
            (PelinnConfig::new(2).with_epsilon(0.0), "epsilon"),
            (PelinnConfig::new(2).with_alpha_inv(-0.1), "alpha_inv"),
        ];
        for (cfg, expected) in cases {
            match cfg.validate() {
                Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected InvalidValue for {}, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: PelinnConfig = serde_json::from_str(r#"{"in_dim": 7, "steps": 2}"#).unwrap();
        assert_eq!(cfg.in_dim, 7);
        assert_eq!(cfg.steps, 2);
        assert_eq!(cfg.hid_dim, 64);
    }

    #[test]
    fn test_missing_in_dim_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pelinn.json");
        std::fs::write(&path, r#"{"hid_dim": 8}"#).unwrap();

        let err = PelinnConfig::from_json(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pelinn.json");

        let cfg = PelinnConfig::new(9).with_hid_dim(16).with_alpha_inv(0.5);
        cfg.to_json(&path).unwrap();

        assert_eq!(PelinnConfig::from_json(&path).unwrap(), cfg);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PelinnConfig::from_json(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::File { .. }));
    }
}

//! Clifford Data Regression baseline.

use super::{Executor, Mitigator};
use crate::error::{MitigationError, MitigationResult};
use std::fmt;
use tracing::debug;

/// Produces `n` training circuits for a target circuit.
pub type TrainingCircuitGenerator<C> = Box<dyn Fn(&C, usize) -> Vec<C> + Send + Sync>;

/// Seam to the external CDR implementation.
pub trait CdrBackend<C> {
    /// The library's default near-Clifford training set generator.
    fn generate_training_circuits(&self, circuit: &C, n: usize) -> MitigationResult<Vec<C>>;

    /// Run CDR on `circuit` with the given training circuits.
    fn execute_with_cdr(
        &self,
        circuit: &C,
        executor: &dyn Executor<C>,
        training_circuits: &[C],
    ) -> MitigationResult<f64>;
}

/// CDR settings.
pub struct CdrConfig<C> {
    /// Number of training circuits. Default: **30**.
    pub num_training_circuits: usize,
    /// Custom training set generator; the backend's default when `None`.
    pub generator: Option<TrainingCircuitGenerator<C>>,
}

impl<C> Default for CdrConfig<C> {
    fn default() -> Self {
        Self {
            num_training_circuits: 30,
            generator: None,
        }
    }
}

impl<C> fmt::Debug for CdrConfig<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CdrConfig")
            .field("num_training_circuits", &self.num_training_circuits)
            .field("custom_generator", &self.generator.is_some())
            .finish()
    }
}

impl<C> CdrConfig<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_training_circuits(mut self, n: usize) -> Self {
        self.num_training_circuits = n;
        self
    }

    pub fn with_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn(&C, usize) -> Vec<C> + Send + Sync + 'static,
    {
        self.generator = Some(Box::new(generator));
        self
    }
}

/// Run Clifford Data Regression.
///
/// # Errors
/// [`MitigationError::InvalidConfig`] when `num_training_circuits` is zero;
/// otherwise whatever the backend or executor reports.
pub fn mitigate_with_cdr<C, L>(
    backend: &L,
    executor: &dyn Executor<C>,
    circuit: &C,
    config: &CdrConfig<C>,
) -> MitigationResult<f64>
where
    L: CdrBackend<C> + ?Sized,
{
    let n = config.num_training_circuits;
    if n == 0 {
        return Err(MitigationError::invalid_config(
            "num_training_circuits",
            "must be > 0",
        ));
    }

    let training = match &config.generator {
        Some(generator) => generator(circuit, n),
        None => backend.generate_training_circuits(circuit, n)?,
    };
    debug!(
        requested = n,
        generated = training.len(),
        custom_generator = config.generator.is_some(),
        "running CDR"
    );

    backend.execute_with_cdr(circuit, executor, &training)
}

/// CDR bound to a backend and a configuration.
pub struct Cdr<L, C> {
    backend: L,
    config: CdrConfig<C>,
}

impl<L, C> Cdr<L, C>
where
    L: CdrBackend<C>,
{
    pub fn new(backend: L, config: CdrConfig<C>) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &CdrConfig<C> {
        &self.config
    }
}

impl<L, C> Mitigator<C> for Cdr<L, C>
where
    L: CdrBackend<C>,
{
    fn mitigate(&self, executor: &dyn Executor<C>, circuit: &C) -> MitigationResult<f64> {
        mitigate_with_cdr(&self.backend, executor, circuit, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Circuits are plain noisy values; training circuits are offsets of it.
    struct AveragingBackend {
        last_training_len: Cell<usize>,
    }

    impl CdrBackend<f64> for AveragingBackend {
        fn generate_training_circuits(&self, circuit: &f64, n: usize) -> MitigationResult<Vec<f64>> {
            Ok((0..n).map(|i| circuit + i as f64).collect())
        }

        fn execute_with_cdr(
            &self,
            _circuit: &f64,
            executor: &dyn Executor<f64>,
            training_circuits: &[f64],
        ) -> MitigationResult<f64> {
            self.last_training_len.set(training_circuits.len());
            let mut sum = 0.0;
            for c in training_circuits {
                sum += executor.execute(c)?;
            }
            Ok(sum / training_circuits.len() as f64)
        }
    }

    fn backend() -> AveragingBackend {
        AveragingBackend {
            last_training_len: Cell::new(0),
        }
    }

    #[test]
    fn test_default_config() {
        let cfg = CdrConfig::<f64>::default();
        assert_eq!(cfg.num_training_circuits, 30);
        assert!(cfg.generator.is_none());
    }

    #[test]
    fn test_uses_backend_generator_by_default() {
        let backend = backend();
        let cfg = CdrConfig::new().with_num_training_circuits(3);

        let value = mitigate_with_cdr(&backend, &|c: &f64| *c, &1.0, &cfg).unwrap();

        assert_eq!(backend.last_training_len.get(), 3);
        assert!((value - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_custom_generator_overrides_backend() {
        let backend = backend();
        let cfg = CdrConfig::new()
            .with_num_training_circuits(4)
            .with_generator(|c: &f64, n| vec![*c; n]);

        let value = mitigate_with_cdr(&backend, &|c: &f64| *c, &0.7, &cfg).unwrap();

        assert_eq!(backend.last_training_len.get(), 4);
        assert!((value - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_zero_training_circuits_rejected() {
        let cfg = CdrConfig::new().with_num_training_circuits(0);
        let err = mitigate_with_cdr(&backend(), &|c: &f64| *c, &0.0, &cfg).unwrap_err();
        assert!(matches!(err, MitigationError::InvalidConfig { .. }));
    }

    #[test]
    fn test_mitigator_trait() {
        let cdr: Cdr<_, f64> = Cdr::new(backend(), CdrConfig::new().with_num_training_circuits(2));
        let value = cdr.mitigate(&|c: &f64| *c * 0.5, &2.0).unwrap();
        // training circuits 2.0, 3.0 -> executed 1.0, 1.5
        assert!((value - 1.25).abs() < 1e-12);
    }
}

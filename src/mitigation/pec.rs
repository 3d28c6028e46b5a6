//! Probabilistic Error Cancellation baseline.

use super::{Executor, Mitigator};
use crate::error::{MitigationError, MitigationResult};
use std::marker::PhantomData;
use tracing::debug;

/// Seam to the external PEC implementation.
pub trait PecBackend<C> {
    /// Calibrated quasiprobability representation of the noisy operations.
    type Representation;

    /// Run PEC with `num_samples` Monte Carlo samples.
    fn execute_with_pec(
        &self,
        circuit: &C,
        executor: &dyn Executor<C>,
        representation: &Self::Representation,
        num_samples: usize,
    ) -> MitigationResult<f64>;
}

/// PEC settings.
#[derive(Debug, Clone)]
pub struct PecConfig<R> {
    /// Backend-specific calibration. Required at call time.
    pub representation: Option<R>,
    /// Number of Monte Carlo samples. Default: **10 000**.
    pub num_samples: usize,
}

impl<R> Default for PecConfig<R> {
    fn default() -> Self {
        Self {
            representation: None,
            num_samples: 10_000,
        }
    }
}

impl<R> PecConfig<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_representation(mut self, representation: R) -> Self {
        self.representation = Some(representation);
        self
    }

    pub fn with_num_samples(mut self, num_samples: usize) -> Self {
        self.num_samples = num_samples;
        self
    }
}

/// Run Probabilistic Error Cancellation.
///
/// # Errors
/// [`MitigationError::MissingRepresentation`] when no calibrated
/// representation was supplied, [`MitigationError::InvalidConfig`] when
/// `num_samples` is zero.
pub fn mitigate_with_pec<C, L>(
    backend: &L,
    executor: &dyn Executor<C>,
    circuit: &C,
    config: &PecConfig<L::Representation>,
) -> MitigationResult<f64>
where
    L: PecBackend<C> + ?Sized,
{
    let representation = config
        .representation
        .as_ref()
        .ok_or(MitigationError::MissingRepresentation)?;
    if config.num_samples == 0 {
        return Err(MitigationError::invalid_config("num_samples", "must be > 0"));
    }

    debug!(num_samples = config.num_samples, "running PEC");
    backend.execute_with_pec(circuit, executor, representation, config.num_samples)
}

/// PEC bound to a backend and a configuration.
pub struct Pec<L, C>
where
    L: PecBackend<C>,
{
    backend: L,
    config: PecConfig<L::Representation>,
    _circuit: PhantomData<fn(&C)>,
}

impl<L, C> Pec<L, C>
where
    L: PecBackend<C>,
{
    pub fn new(backend: L, config: PecConfig<L::Representation>) -> Self {
        Self {
            backend,
            config,
            _circuit: PhantomData,
        }
    }

    pub fn config(&self) -> &PecConfig<L::Representation> {
        &self.config
    }
}

impl<L, C> Mitigator<C> for Pec<L, C>
where
    L: PecBackend<C>,
{
    fn mitigate(&self, executor: &dyn Executor<C>, circuit: &C) -> MitigationResult<f64> {
        mitigate_with_pec(&self.backend, executor, circuit, &self.config)
    }
}

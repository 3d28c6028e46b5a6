//! # Baseline Error Mitigation
//!
//! Thin wrappers around an external quantum error mitigation library, used
//! as reference estimators for the value PELiNN learns to predict:
//!
//! - **CDR** (Clifford Data Regression): fits a regression on near-Clifford
//!   variants of the circuit whose ideal values are classically computable.
//! - **PEC** (Probabilistic Error Cancellation): samples a quasiprobability
//!   decomposition of the noisy gates; needs a calibrated representation.
//!
//! Circuits and representations are opaque here. The library itself sits
//! behind [`CdrBackend`] and [`PecBackend`]; this module only validates the
//! configuration, chooses defaults and forwards the call.

pub mod cdr;
pub mod pec;

pub use cdr::{mitigate_with_cdr, Cdr, CdrBackend, CdrConfig, TrainingCircuitGenerator};
pub use pec::{mitigate_with_pec, Pec, PecBackend, PecConfig};

use crate::error::MitigationResult;

/// Evaluates a circuit to a scalar expectation value.
///
/// Any `Fn(&C) -> f64` is an executor.
pub trait Executor<C> {
    fn execute(&self, circuit: &C) -> MitigationResult<f64>;
}

impl<C, F> Executor<C> for F
where
    F: Fn(&C) -> f64,
{
    fn execute(&self, circuit: &C) -> MitigationResult<f64> {
        Ok(self(circuit))
    }
}

/// A configured mitigation technique.
pub trait Mitigator<C> {
    /// Estimate the noise-free expectation value of `circuit`.
    fn mitigate(&self, executor: &dyn Executor<C>, circuit: &C) -> MitigationResult<f64>;
}

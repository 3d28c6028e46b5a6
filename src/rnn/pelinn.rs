//! PELiNN rollout layer
//!
//! Maps static noisy-circuit features to a bounded estimate of the mitigated
//! expectation value by unrolling a [`LiquidCell`] a fixed number of times.

use crate::cells::{LiquidCell, DEFAULT_DT};
use crate::error::{PelinnError, PelinnResult};
use burn::module::{Module, Param};
use burn::nn::{Linear, LinearConfig};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use tracing::trace;

/// Default hidden size.
pub const DEFAULT_HID_DIM: usize = 64;

/// Default number of rollout steps.
pub const DEFAULT_STEPS: usize = 5;

/// Physics-informed liquid network for quantum error mitigation
///
/// Every sample starts from the same learned state `h0`; the cell is then
/// applied `steps` times with the same `x`, and a linear head followed by
/// `tanh` turns the final state into a prediction in `(-1, 1)`.
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
#[allow(clippy::upper_case_acronyms)]
pub struct PELiNNQEM<B: Backend> {
    /// The cell applied at every rollout step
    pub cell: LiquidCell<B>,
    /// Learned initial hidden state, shared by the whole batch
    pub h0: Param<Tensor<B, 1>>,
    /// Output projection `hid_dim -> 1`, with bias
    pub head: Linear<B>,
    steps: usize,
    dt: f64,
}

impl<B: Backend> PELiNNQEM<B> {
    /// Create a new PELiNN model
    ///
    /// # Arguments
    /// * `in_dim` - Number of circuit features per sample
    /// * `hid_dim` - Hidden state size
    /// * `steps` - Number of cell applications per forward pass
    /// * `device` - Device to create the module on
    pub fn new(in_dim: usize, hid_dim: usize, steps: usize, device: &B::Device) -> Self {
        let cell = LiquidCell::new(in_dim, hid_dim, device);
        let h0 = Param::from_tensor(Tensor::zeros([hid_dim], device));
        let head = LinearConfig::new(hid_dim, 1).with_bias(true).init(device);

        Self {
            cell,
            h0,
            head,
            steps,
            dt: DEFAULT_DT,
        }
    }

    /// Set the Euler step size used at every rollout step (default: 0.1)
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Set the lower bound added to the cell's time constant (default: 1e-3)
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.cell = self.cell.with_epsilon(epsilon);
        self
    }

    /// Get input size
    pub fn in_dim(&self) -> usize {
        self.cell.in_dim()
    }

    /// Get hidden state size
    pub fn hid_dim(&self) -> usize {
        self.cell.hid_dim()
    }

    /// Get number of rollout steps
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Get Euler step size
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// `h0` broadcast to `[batch, hid_dim]`
    pub fn initial_state(&self, batch: usize) -> Tensor<B, 2> {
        self.h0
            .val()
            .unsqueeze::<2>()
            .expand([batch, self.hid_dim()])
    }

    /// Forward pass returning the prediction and the final hidden state
    ///
    /// # Arguments
    /// * `x` - Input features of shape `[batch, in_dim]`
    ///
    /// # Returns
    /// Tuple of (prediction `[batch]`, final hidden state `[batch, hid_dim]`)
    pub fn forward_with_state(&self, x: Tensor<B, 2>) -> PelinnResult<(Tensor<B, 1>, Tensor<B, 2>)> {
        let [batch, in_dim] = x.dims();
        if batch == 0 {
            return Err(PelinnError::EmptyBatch);
        }
        if in_dim != self.in_dim() {
            return Err(PelinnError::shape_mismatch(
                "x",
                vec![batch, self.in_dim()],
                vec![batch, in_dim],
            ));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(PelinnError::InvalidTimeStep(self.dt));
        }

        let mut h = self.initial_state(batch);
        for step in 0..self.steps {
            h = self.cell.forward(x.clone(), h, self.dt)?;
            trace!(step, batch, "liquid cell step");
        }

        let y = self.head.forward(h.clone()).tanh().squeeze::<1>(1);
        Ok((y, h))
    }

    /// Forward pass
    ///
    /// # Arguments
    /// * `x` - Input features of shape `[batch, in_dim]`
    ///
    /// # Returns
    /// Predictions of shape `[batch]`, each in `(-1, 1)`
    pub fn forward(&self, x: Tensor<B, 2>) -> PelinnResult<Tensor<B, 1>> {
        self.forward_with_state(x).map(|(y, _)| y)
    }
}

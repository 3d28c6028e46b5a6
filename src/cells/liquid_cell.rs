//! Liquid Cell Implementation
//!
//! A continuous-time recurrent unit with an input- and state-dependent time
//! constant, advanced by one explicit Euler step of
//!
//! ```text
//! dh/dt = -h / τ(x, h) + tanh(Wx·x + Wh·h)
//! τ(x, h) = softplus(Wtx·x + Wth·h + bt) + ε
//! ```

use crate::activation::SoftplusActivation;
use crate::error::{PelinnError, PelinnResult};
use burn::module::{Module, Param};
use burn::nn::{Linear, LinearConfig};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Default Euler step size.
pub const DEFAULT_DT: f64 = 0.1;

/// Default lower bound added to the time constant.
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// Liquid Cell
///
/// Stateless single-step update. The hidden state is owned by the caller and
/// threaded through successive [`LiquidCell::forward`] calls.
#[derive(Module, Debug)]
pub struct LiquidCell<B: Backend> {
    /// Input drive: `in_dim -> hid_dim`, with bias
    pub wx: Linear<B>,
    /// Recurrent drive: `hid_dim -> hid_dim`, no bias
    pub wh: Linear<B>,
    /// Input contribution to τ: `in_dim -> hid_dim`, no bias
    pub wtx: Linear<B>,
    /// Recurrent contribution to τ: `hid_dim -> hid_dim`, no bias
    pub wth: Linear<B>,
    /// Bias of the time constant
    pub bt: Param<Tensor<B, 1>>,
    /// Added to softplus so that τ >= epsilon > 0
    epsilon: f64,
    in_dim: usize,
    hid_dim: usize,
}

impl<B: Backend> LiquidCell<B> {
    /// Create a new liquid cell
    ///
    /// # Arguments
    /// * `in_dim` - Size of the input features
    /// * `hid_dim` - Size of the hidden state
    /// * `device` - Device to create the module on
    pub fn new(in_dim: usize, hid_dim: usize, device: &B::Device) -> Self {
        let wx = LinearConfig::new(in_dim, hid_dim)
            .with_bias(true)
            .init(device);
        let wh = LinearConfig::new(hid_dim, hid_dim)
            .with_bias(false)
            .init(device);
        let wtx = LinearConfig::new(in_dim, hid_dim)
            .with_bias(false)
            .init(device);
        let wth = LinearConfig::new(hid_dim, hid_dim)
            .with_bias(false)
            .init(device);
        let bt = Param::from_tensor(Tensor::zeros([hid_dim], device));

        Self {
            wx,
            wh,
            wtx,
            wth,
            bt,
            epsilon: DEFAULT_EPSILON,
            in_dim,
            hid_dim,
        }
    }

    /// Set the lower bound added to the time constant (default: 1e-3)
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Get input size
    pub fn in_dim(&self) -> usize {
        self.in_dim
    }

    /// Get hidden state size
    pub fn hid_dim(&self) -> usize {
        self.hid_dim
    }

    /// Get the time constant lower bound
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Reject inputs that do not match the configured dimensions.
    fn check_shapes(&self, x: &Tensor<B, 2>, h: &Tensor<B, 2>) -> PelinnResult<()> {
        let [batch, in_dim] = x.dims();
        if batch == 0 {
            return Err(PelinnError::EmptyBatch);
        }
        if in_dim != self.in_dim {
            return Err(PelinnError::shape_mismatch(
                "x",
                vec![batch, self.in_dim],
                vec![batch, in_dim],
            ));
        }
        let h_dims = h.dims();
        if h_dims != [batch, self.hid_dim] {
            return Err(PelinnError::shape_mismatch(
                "h",
                vec![batch, self.hid_dim],
                h_dims.to_vec(),
            ));
        }
        Ok(())
    }

    fn tau_unchecked(&self, x: Tensor<B, 2>, h: Tensor<B, 2>) -> Tensor<B, 2> {
        let pre = self.wtx.forward(x) + self.wth.forward(h) + self.bt.val().unsqueeze::<2>();
        pre.softplus().add_scalar(self.epsilon)
    }

    /// Compute the per-unit time constant τ(x, h).
    ///
    /// # Returns
    /// Tensor of shape `[batch, hid_dim]`, every element `>= epsilon`
    pub fn time_constant(&self, x: Tensor<B, 2>, h: Tensor<B, 2>) -> PelinnResult<Tensor<B, 2>> {
        self.check_shapes(&x, &h)?;
        Ok(self.tau_unchecked(x, h))
    }

    /// Advance the hidden state by one Euler step of size `dt`.
    ///
    /// # Arguments
    /// * `x` - Input tensor of shape `[batch, in_dim]`
    /// * `h` - Hidden state of shape `[batch, hid_dim]`
    /// * `dt` - Step size, finite and `> 0`
    ///
    /// # Returns
    /// `h + dt * (-h / τ + tanh(Wx·x + Wh·h))`, shape `[batch, hid_dim]`
    pub fn forward(&self, x: Tensor<B, 2>, h: Tensor<B, 2>, dt: f64) -> PelinnResult<Tensor<B, 2>> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(PelinnError::InvalidTimeStep(dt));
        }
        self.check_shapes(&x, &h)?;

        let tau = self.tau_unchecked(x.clone(), h.clone());
        let drive = (self.wx.forward(x) + self.wh.forward(h.clone())).tanh();
        let dh = h.clone().neg().div(tau) + drive;

        Ok(h + dh.mul_scalar(dt))
    }
}

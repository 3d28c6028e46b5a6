//! Custom activation functions for PELiNN
//!
//! Burn ships a `softplus`, but it evaluates `log(1 + exp(z))` literally and
//! overflows to `inf` once `exp(z)` leaves the `f32` range. The time constant
//! of the liquid cell goes through softplus on every step, so this module
//! provides a stable form instead.

use burn::tensor::{backend::Backend, Tensor};

/// Numerically stable softplus.
///
/// Defined as `f(z) = log(1 + e^z)`, evaluated as
/// `max(z, 0) + log1p(exp(-|z|))`, which is algebraically identical and never
/// exponentiates a positive number.
///
/// The output is always `>= 0`, tends to `z` for large positive inputs and to
/// `0` for large negative inputs. `f(0) = ln 2`.
///
/// # Example
///
/// ```rust
/// use burn::backend::NdArray;
/// use burn::tensor::Tensor;
/// use pelinn::activation::Softplus;
///
/// type Backend = NdArray<f32>;
/// let device = Default::default();
///
/// let z = Tensor::<Backend, 1>::from_floats([0.0, 1.0, -1.0], &device);
/// let y = Softplus::forward(z);
/// ```
pub struct Softplus;

impl Softplus {
    /// Applies softplus element-wise.
    ///
    /// # Arguments
    ///
    /// * `z` - Input tensor of any dimension
    ///
    /// # Returns
    ///
    /// Tensor of the same shape with softplus applied element-wise
    pub fn forward<B: Backend, const D: usize>(z: Tensor<B, D>) -> Tensor<B, D> {
        let positive_part = z.clone().clamp_min(0.0);
        let tail = z.abs().neg().exp().log1p();
        positive_part + tail
    }
}

/// Applies softplus to a tensor.
///
/// Convenience extension so call sites can chain `.softplus()` like the
/// built-in `.tanh()`.
pub trait SoftplusActivation {
    /// Applies softplus
    fn softplus(self) -> Self;
}

impl<B: Backend, const D: usize> SoftplusActivation for Tensor<B, D> {
    fn softplus(self) -> Self {
        Softplus::forward(self)
    }
}

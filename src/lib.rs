//! # PELiNN - Physics-informed Liquid Neural Network for QEM
//!
//! Learned quantum error mitigation on the Burn framework: a continuous-time
//! recurrent network predicts the mitigated expectation value of a circuit
//! from features of its noisy execution, and is trained with a loss that
//! asks for the same prediction across noise realisations of one circuit.
//!
//! ## Features
//!
//! - **LiquidCell**: explicit-Euler step of an ODE with input- and
//!   state-dependent time constants
//! - **PELiNNQEM**: fixed-depth rollout from a learned initial state with a
//!   `tanh`-bounded scalar head
//! - **Physics loss**: MSE plus a group-wise invariance penalty
//! - **Baselines**: CDR and PEC wrappers over an external mitigation library
//!
//! ## Quick Start
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use pelinn::prelude::*;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let config = PelinnConfig::new(4).with_hid_dim(16);
//! let model = config.init::<Backend>(&device).unwrap();
//!
//! let x = Tensor::<Backend, 2>::zeros([3, 4], &device);
//! let pred = model.forward(x).unwrap();
//! let target = Tensor::<Backend, 1>::zeros([3], &device);
//!
//! // samples 0 and 2 are two noise levels of the same circuit
//! let groups = vec![vec![0, 2], vec![1]];
//! let loss = physics_loss(pred, target, Some(&groups), 0.1).unwrap();
//! assert_eq!(loss.dims(), [1]);
//! ```

pub mod activation;
pub mod cells;
pub mod config;
pub mod error;
pub mod loss;
pub mod mitigation;
pub mod rnn;

pub mod prelude {
    pub use crate::activation::Softplus;
    pub use crate::cells::LiquidCell;
    pub use crate::config::PelinnConfig;
    pub use crate::error::{MitigationError, PelinnError, PelinnResult};
    pub use crate::loss::{physics_loss, LossComponents, PhysicsLoss};
    pub use crate::mitigation::{Cdr, CdrConfig, Executor, Mitigator, Pec, PecConfig};
    pub use crate::rnn::PELiNNQEM;
}

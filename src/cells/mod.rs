//! # Recurrent Cell Implementations
//!
//! Single-step cells. A cell advances a hidden state once; the rollout layer
//! in [`crate::rnn`] applies it repeatedly.
//!
//! ## Liquid Cell Dynamics
//!
//! [`LiquidCell`] discretises
//!
//! ```text
//! dh/dt = -h / τ(x, h) + tanh(Wx·x + Wh·h)
//! ```
//!
//! with one explicit (forward) Euler step:
//!
//! ```text
//! τ      = softplus(Wtx·x + Wth·h + bt) + ε
//! h_next = h + dt × (-h / τ + tanh(Wx·x + Wh·h))
//! ```
//!
//! The step is not unconditionally stable: when `dt` is large relative to τ
//! the update overshoots. No step-size control is applied.
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape | Description |
//! |--------|-------|-------------|
//! | `x` | `[batch, in_dim]` | Static circuit features |
//! | `h` | `[batch, hid_dim]` | Current hidden state |
//! | `τ` | `[batch, hid_dim]` | Per-unit time constant, `>= ε` |
//! | `h_next` | `[batch, hid_dim]` | Updated hidden state |
//!
//! ## Example
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use pelinn::cells::{LiquidCell, DEFAULT_DT};
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let cell = LiquidCell::<Backend>::new(4, 16, &device);
//! let x = Tensor::<Backend, 2>::zeros([2, 4], &device);
//! let h = Tensor::<Backend, 2>::zeros([2, 16], &device);
//!
//! let h_next = cell.forward(x, h, DEFAULT_DT).unwrap();
//! assert_eq!(h_next.dims(), [2, 16]);
//! ```

pub mod liquid_cell;

pub use liquid_cell::{LiquidCell, DEFAULT_DT, DEFAULT_EPSILON};

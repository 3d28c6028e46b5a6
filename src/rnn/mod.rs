//! # Rollout Layers
//!
//! Layers that own a cell plus the state management around it.
//!
//! ## PELiNN
//!
//! [`PELiNNQEM`] is a fixed-depth rollout, not a sequence model: the input
//! `x` is a static feature vector of one noisy circuit execution and is fed
//! unchanged at every step.
//!
//! ```text
//! h ← broadcast(h0, batch)
//! repeat steps times:  h ← LiquidCell(x, h, dt)
//! y = tanh(head(h))                         y ∈ (-1, 1)
//! ```
//!
//! The `tanh` head assumes expectation values normalised to `(-1, 1)`.
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape |
//! |--------|-------|
//! | input `x` | `[batch, in_dim]` |
//! | prediction `y` | `[batch]` |
//! | final state | `[batch, hid_dim]` |
//!
//! ## Quick Start
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use pelinn::rnn::PELiNNQEM;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let model = PELiNNQEM::<Backend>::new(8, 64, 5, &device);
//! let x = Tensor::<Backend, 2>::zeros([4, 8], &device);
//!
//! let y = model.forward(x).unwrap();
//! assert_eq!(y.dims(), [4]);
//! ```

pub mod pelinn;

pub use pelinn::{PELiNNQEM, DEFAULT_HID_DIM, DEFAULT_STEPS};

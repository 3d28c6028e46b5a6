//! Physics-informed loss for PELiNN training.
//!
//! ```text
//! L = MSE(pred, target) + α_inv · L_inv
//! ```
//!
//! `L_inv` rewards equal predictions for samples that are different noisy
//! realisations of the same circuit. For every group `g` with `k >= 2`
//! members the penalty is the mean of the full `k × k` matrix
//! `|p_i - p_j|`, diagonal included, so the denominator is `k²`. `L_inv` is
//! the mean of those per-group values over the groups that had at least two
//! members; smaller groups are ignored entirely.

use crate::error::{ConfigError, PelinnError, PelinnResult};
use burn::nn::loss::{MseLoss, Reduction};
use burn::tensor::backend::Backend;
use burn::tensor::{ElementConversion, Int, Tensor, TensorData};
use tracing::{debug, trace};

/// Default weight of the invariance term.
pub const DEFAULT_ALPHA_INV: f64 = 0.1;

/// Scalar values of one loss evaluation, for logging.
///
/// Extracted from the graph; not used for back-propagation.
#[derive(Debug, Clone, PartialEq)]
pub struct LossComponents {
    /// `mse + alpha_inv * invariance`
    pub total: f32,
    /// Mean squared error over the batch
    pub mse: f32,
    /// Invariance penalty, `None` when no group had two or more members
    pub invariance: Option<f32>,
}

/// Supervised + invariance-regularised objective.
#[derive(Debug, Clone)]
pub struct PhysicsLoss {
    alpha_inv: f64,
}

impl Default for PhysicsLoss {
    fn default() -> Self {
        Self {
            alpha_inv: DEFAULT_ALPHA_INV,
        }
    }
}

impl PhysicsLoss {
    /// Create a loss with the given invariance weight.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] if `alpha_inv` is negative or not finite.
    pub fn new(alpha_inv: f64) -> Result<Self, ConfigError> {
        validate_alpha(alpha_inv)?;
        debug!(alpha_inv, "created physics loss");
        Ok(Self { alpha_inv })
    }

    /// Get the invariance weight
    pub fn alpha_inv(&self) -> f64 {
        self.alpha_inv
    }

    /// Evaluate the loss; see [`physics_loss`].
    pub fn forward<B: Backend>(
        &self,
        pred: Tensor<B, 1>,
        target: Tensor<B, 1>,
        groups: Option<&[Vec<usize>]>,
    ) -> PelinnResult<Tensor<B, 1>> {
        let (total, _, _) = self.evaluate(pred, target, groups)?;
        Ok(total)
    }

    /// Evaluate the loss and return its scalar parts.
    pub fn components<B: Backend>(
        &self,
        pred: Tensor<B, 1>,
        target: Tensor<B, 1>,
        groups: Option<&[Vec<usize>]>,
    ) -> PelinnResult<LossComponents> {
        let (total, mse, inv) = self.evaluate(pred, target, groups)?;
        Ok(LossComponents {
            total: total.into_scalar().elem::<f32>(),
            mse: mse.into_scalar().elem::<f32>(),
            invariance: inv.map(|t| t.into_scalar().elem::<f32>()),
        })
    }

    #[allow(clippy::type_complexity)]
    fn evaluate<B: Backend>(
        &self,
        pred: Tensor<B, 1>,
        target: Tensor<B, 1>,
        groups: Option<&[Vec<usize>]>,
    ) -> PelinnResult<(Tensor<B, 1>, Tensor<B, 1>, Option<Tensor<B, 1>>)> {
        let [n_pred] = pred.dims();
        let [n_target] = target.dims();
        if n_pred != n_target {
            return Err(PelinnError::LengthMismatch {
                pred: n_pred,
                target: n_target,
            });
        }
        if n_pred == 0 {
            return Err(PelinnError::EmptyBatch);
        }

        let mse = MseLoss::new().forward(pred.clone(), target, Reduction::Mean);

        let inv = match groups {
            Some(groups) if !groups.is_empty() => invariance_penalty(pred, groups)?,
            _ => None,
        };

        let total = match &inv {
            Some(inv) => mse.clone() + inv.clone().mul_scalar(self.alpha_inv),
            None => mse.clone(),
        };
        Ok((total, mse, inv))
    }
}

fn validate_alpha(alpha_inv: f64) -> Result<(), ConfigError> {
    if !alpha_inv.is_finite() || alpha_inv < 0.0 {
        return Err(ConfigError::invalid_value(
            "alpha_inv",
            format!("must be finite and >= 0, got {alpha_inv}"),
        ));
    }
    Ok(())
}

/// Mean pairwise absolute difference of `values`, over all `k²` pairs.
fn pairwise_mean_abs_diff<B: Backend>(values: Tensor<B, 1>) -> Tensor<B, 1> {
    let [k] = values.dims();
    let rows = values.clone().unsqueeze_dim::<2>(0).expand([k, k]);
    let cols = values.unsqueeze_dim::<2>(1).expand([k, k]);
    rows.sub(cols).abs().mean()
}

/// Invariance penalty over `groups`.
///
/// # Returns
/// `None` when no group has two or more members, otherwise the mean of the
/// per-group pairwise means (shape `[1]`).
///
/// # Errors
/// [`PelinnError::IndexOutOfBounds`] if a group references a sample outside
/// `pred`.
pub fn invariance_penalty<B: Backend>(
    pred: Tensor<B, 1>,
    groups: &[Vec<usize>],
) -> PelinnResult<Option<Tensor<B, 1>>> {
    let [len] = pred.dims();
    let device = pred.device();

    let mut sum: Option<Tensor<B, 1>> = None;
    let mut count = 0usize;

    for (group_id, idxs) in groups.iter().enumerate() {
        if idxs.len() < 2 {
            trace!(group_id, size = idxs.len(), "skipping group with < 2 members");
            continue;
        }
        if let Some(&index) = idxs.iter().find(|&&i| i >= len) {
            return Err(PelinnError::IndexOutOfBounds { index, len });
        }

        let raw: Vec<i64> = idxs.iter().map(|&i| i as i64).collect();
        let indices =
            Tensor::<B, 1, Int>::from_data(TensorData::new(raw, [idxs.len()]), &device);
        let group_mean = pairwise_mean_abs_diff(pred.clone().select(0, indices));

        sum = Some(match sum {
            Some(acc) => acc + group_mean,
            None => group_mean,
        });
        count += 1;
    }

    Ok(sum.map(|total| total.div_scalar(count as f64)))
}

/// Physics-informed loss.
///
/// # Arguments
/// * `pred` - Predictions, shape `[batch]`
/// * `target` - Ideal (noise-free) values, shape `[batch]`
/// * `groups` - Index lists of samples sharing the same underlying circuit
/// * `alpha_inv` - Weight of the invariance term, `>= 0`
///
/// # Returns
/// Scalar loss of shape `[1]`. With `groups` absent, empty, or made only of
/// singletons this is plain MSE.
pub fn physics_loss<B: Backend>(
    pred: Tensor<B, 1>,
    target: Tensor<B, 1>,
    groups: Option<&[Vec<usize>]>,
    alpha_inv: f64,
) -> PelinnResult<Tensor<B, 1>> {
    PhysicsLoss::new(alpha_inv)?.forward(pred, target, groups)
}

//! Prediction Example
//!
//! Builds a PELiNN model, predicts a batch of noisy circuit executions and
//! evaluates the physics-informed loss on them.
//!
//! Run with `RUST_LOG`-style level as the first argument, e.g.
//! `cargo run --example predict -- debug`.

use burn::backend::NdArray;
use burn::tensor::{Distribution, Tensor};
use pelinn::prelude::*;

fn main() -> Result<(), PelinnError> {
    let level = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<tracing_subscriber::filter::LevelFilter>().ok())
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    println!("=== PELiNN Prediction Example ===\n");

    type Backend = NdArray<f32>;
    let device = Default::default();

    // 3 circuits x 3 noise scales, 6 features per execution
    let config = PelinnConfig::new(6);
    let model = config.init::<Backend>(&device)?;

    println!("Model created:");
    println!("  - Input features: {}", model.in_dim());
    println!("  - Hidden units:   {}", model.hid_dim());
    println!("  - Rollout steps:  {}", model.steps());
    println!("  - dt:             {}", model.dt());
    println!();

    let x = Tensor::<Backend, 2>::random([9, 6], Distribution::Uniform(-1.0, 1.0), &device);
    let target = Tensor::<Backend, 1>::from_floats(
        [0.7f32, 0.7, 0.7, -0.2, -0.2, -0.2, 0.1, 0.1, 0.1],
        &device,
    );
    let groups = vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]];

    let pred = model.forward(x)?;
    println!("Predictions: {:?}", pred.to_data().to_vec::<f32>().unwrap_or_default());

    let parts = config.loss()?.components(pred, target, Some(&groups))?;
    println!();
    println!("Physics loss:");
    println!("  - MSE:        {:.6}", parts.mse);
    println!(
        "  - Invariance: {:.6}",
        parts.invariance.unwrap_or_default()
    );
    println!("  - Total:      {:.6}", parts.total);

    Ok(())
}

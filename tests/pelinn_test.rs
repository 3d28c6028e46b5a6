//! Integration tests for the PELiNN rollout layer

use burn::backend::NdArray;
use burn::module::Param;
use burn::tensor::{Distribution, Tensor};
use pelinn::config::PelinnConfig;
use pelinn::error::PelinnError;
use pelinn::rnn::PELiNNQEM;

type Backend = NdArray<f32>;

fn to_vec(t: Tensor<Backend, 1>) -> Vec<f32> {
    t.into_data().to_vec::<f32>().unwrap()
}

#[test]
fn test_predictions_bounded_for_many_shapes() {
    let device = Default::default();

    for (in_dim, hid_dim, steps, batch) in [(1, 1, 1, 1), (3, 8, 5, 7), (10, 64, 5, 32), (4, 16, 12, 3)] {
        let model = PelinnConfig::new(in_dim)
            .with_hid_dim(hid_dim)
            .with_steps(steps)
            .init::<Backend>(&device)
            .unwrap();

        let x = Tensor::<Backend, 2>::random(
            [batch, in_dim],
            Distribution::Uniform(-1.0, 1.0),
            &device,
        );
        let y = model.forward(x).unwrap();

        assert_eq!(y.dims(), [batch]);
        for v in to_vec(y) {
            assert!(v > -1.0 && v < 1.0, "prediction {} outside (-1, 1)", v);
        }
    }
}

#[test]
fn test_forward_is_deterministic() {
    let device = Default::default();
    let model = PELiNNQEM::<Backend>::new(6, 32, 5, &device);

    let x = Tensor::<Backend, 2>::random([8, 6], Distribution::Uniform(-2.0, 2.0), &device);
    let first = to_vec(model.forward(x.clone()).unwrap());
    let second = to_vec(model.forward(x).unwrap());

    assert_eq!(first, second);
}

#[test]
fn test_zero_steps_ignores_input() {
    let device = Default::default();
    let mut model = PELiNNQEM::<Backend>::new(3, 4, 0, &device);
    model.h0 = Param::from_tensor(Tensor::from_floats([0.3f32, -0.7, 1.2, 0.05], &device));

    let expected = model
        .head
        .forward(model.h0.val().unsqueeze::<2>())
        .tanh()
        .into_scalar();

    let x = Tensor::<Backend, 2>::random([5, 3], Distribution::Uniform(-10.0, 10.0), &device);
    for v in to_vec(model.forward(x).unwrap()) {
        assert!((v - expected).abs() < 1e-6, "got {}, expected {}", v, expected);
    }
}

#[test]
fn test_zero_weights_predict_zero() {
    let device = Default::default();
    let mut model = PelinnConfig::new(1)
        .with_hid_dim(2)
        .with_steps(1)
        .with_dt(0.1)
        .init::<Backend>(&device)
        .unwrap();

    let zeros_2x2 = || Param::from_tensor(Tensor::<Backend, 2>::zeros([2, 2], &device));
    let zeros_1x2 = || Param::from_tensor(Tensor::<Backend, 2>::zeros([1, 2], &device));

    model.cell.wx.weight = zeros_1x2();
    model.cell.wx.bias = Some(Param::from_tensor(Tensor::zeros([2], &device)));
    model.cell.wh.weight = zeros_2x2();
    model.cell.wtx.weight = zeros_1x2();
    model.cell.wth.weight = zeros_2x2();
    model.cell.bt = Param::from_tensor(Tensor::zeros([2], &device));
    model.h0 = Param::from_tensor(Tensor::zeros([2], &device));
    model.head.weight = Param::from_tensor(Tensor::ones([2, 1], &device));
    model.head.bias = Some(Param::from_tensor(Tensor::zeros([1], &device)));

    let x = Tensor::<Backend, 2>::from_floats([[-3.0], [0.0], [0.5], [42.0]], &device);
    let (y, h) = model.forward_with_state(x).unwrap();

    assert_eq!(to_vec(y), vec![0.0; 4]);
    assert_eq!(h.into_data().to_vec::<f32>().unwrap(), vec![0.0; 8]);
}

#[test]
fn test_samples_differ_only_through_input() {
    let device = Default::default();
    let model = PELiNNQEM::<Backend>::new(2, 8, 5, &device);

    let x = Tensor::<Backend, 2>::from_floats([[0.1, 0.2], [0.1, 0.2], [0.9, -0.4]], &device);
    let y = to_vec(model.forward(x).unwrap());

    assert_eq!(y[0], y[1]);
}

#[test]
fn test_rejects_wrong_feature_dim() {
    let device = Default::default();
    let model = PELiNNQEM::<Backend>::new(4, 8, 5, &device);

    let x = Tensor::<Backend, 2>::zeros([2, 3], &device);
    let err = model.forward(x).unwrap_err();

    assert!(matches!(
        err,
        PelinnError::ShapeMismatch { tensor: "x", .. }
    ));
}

#[test]
fn test_config_rejects_zero_hidden() {
    let device = Default::default();
    let err = PelinnConfig::new(3)
        .with_hid_dim(0)
        .init::<Backend>(&device)
        .unwrap_err();

    assert!(matches!(err, PelinnError::Config(_)));
}

#[test]
fn test_rejects_empty_batch() {
    let device = Default::default();
    let model = PELiNNQEM::<Backend>::new(3, 4, 5, &device);

    let x = Tensor::<Backend, 2>::zeros([0, 3], &device);
    let err = model.forward(x).unwrap_err();

    assert!(matches!(err, PelinnError::EmptyBatch));
}

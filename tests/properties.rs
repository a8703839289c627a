use approx::assert_relative_eq;
use proptest::prelude::*;

use rust_fnn::loss::squared_error;
use rust_fnn::{
    Activation, Dataset, Error, NetworkBuilder, Trainer, rescale_in_place, rescale_to_new,
};

fn build(sizes: &[usize], seed: u64) -> Trainer {
    let mut builder = NetworkBuilder::new(sizes[0], sizes[sizes.len() - 1]).unwrap();
    for &units in &sizes[1..sizes.len() - 1] {
        builder = builder.add_hidden_layer(units).unwrap();
    }
    builder.build_with_seed(seed).unwrap()
}

#[test]
fn same_seed_gives_identical_networks() {
    let a = build(&[4, 5, 3, 2], 1234);
    let b = build(&[4, 5, 3, 2], 1234);
    let c = build(&[4, 5, 3, 2], 1235);

    for l in 1..a.network().num_layers() {
        assert_eq!(a.network().weights(l), b.network().weights(l));
        assert_eq!(a.network().bias(l), b.network().bias(l));
    }
    assert_ne!(a.network().weights(1), c.network().weights(1));
}

#[test]
fn built_networks_have_consistent_shapes() {
    let sizes = [3, 7, 4, 2];
    let trainer = build(&sizes, 9);
    let network = trainer.network();

    assert_eq!(network.num_layers(), sizes.len());
    assert_eq!(network.num_hidden_layers(), sizes.len() - 2);
    assert_eq!(network.input_units(), 3);
    assert_eq!(network.output_units(), 2);
    assert!(network.bias(0).is_empty());
    assert!(network.weights(0).is_empty());

    for (l, &units) in sizes.iter().enumerate() {
        assert_eq!(network.units(l), units);
        assert_eq!(network.values(l).len(), units);
    }
    for l in 1..sizes.len() {
        assert_eq!(network.bias(l).len(), sizes[l]);
        assert!(network.bias(l).iter().all(|&b| b == 1.0));
        assert_eq!(network.weights(l).len(), sizes[l - 1] * sizes[l]);
        assert!(network.weights(l).iter().all(|w| (-1.0..1.0).contains(w)));
    }
}

#[test]
fn propagate_is_repeatable_and_parallel_matches_sequential() {
    let mut trainer = build(&[6, 16, 8, 3], 5);
    let input = [0.3, -0.2, 0.9, 0.0, 1.0, -1.0];

    let first = trainer.propagate(&input).unwrap().to_vec();
    let second = trainer.propagate(&input).unwrap().to_vec();
    assert_eq!(first, second);

    let parallel = trainer.propagate_parallel(&input).unwrap().to_vec();
    assert_eq!(first, parallel);

    assert!(first.iter().all(|&y| y > 0.0 && y < 1.0));
}

#[test]
fn one_training_step_reduces_the_example_error() {
    for activation in [Activation::Sigmoid, Activation::Tanh] {
        let mut trainer = NetworkBuilder::new(3, 2)
            .unwrap()
            .add_hidden_layer(4)
            .unwrap()
            .with_learning_rate(0.05)
            .with_activation(activation)
            .build_with_seed(17)
            .unwrap();
        let input = [0.5, -0.25, 0.75];
        let expected = [0.9, 0.1];

        let before = trainer.train_example(&input, &expected).unwrap();
        let after = squared_error(trainer.propagate(&input).unwrap(), &expected);
        assert!(after < before, "{activation:?}: {after} >= {before}");
    }
}

#[test]
fn shape_mismatches_leave_the_network_untouched() {
    let mut trainer = build(&[2, 3, 1], 3);
    let snapshot = trainer.network().clone();

    assert!(matches!(
        trainer.train_example(&[1.0, 0.0, 0.0], &[1.0]),
        Err(Error::ShapeMismatch { .. })
    ));
    assert!(matches!(
        trainer.train_example(&[1.0, 0.0], &[1.0, 0.0]),
        Err(Error::ShapeMismatch { .. })
    ));
    assert!(matches!(
        trainer.propagate(&[1.0]),
        Err(Error::ShapeMismatch {
            expected: 2,
            actual: 1,
            ..
        })
    ));

    let wide = Dataset::from_rows(&[vec![0.0, 0.0, 0.0]], &[vec![0.0]]).unwrap();
    assert!(trainer.train_batch(&wide, Default::default()).is_err());

    for l in 1..snapshot.num_layers() {
        assert_eq!(snapshot.weights(l), trainer.network().weights(l));
        assert_eq!(snapshot.bias(l), trainer.network().bias(l));
    }
}

#[test]
fn degenerate_rescale_is_an_error() {
    let mut flat = [2.5; 8];
    assert!(matches!(
        rescale_in_place(&mut flat, -1.0, 1.0),
        Err(Error::DegenerateRange { .. })
    ));
}

proptest! {
    #[test]
    fn rescale_round_trips(
        data in proptest::collection::vec(-1.0e3f64..1.0e3f64, 2..64),
        lo in -10.0f64..10.0f64,
        width in 0.5f64..20.0f64,
    ) {
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assume!(max - min > 1.0e-3);

        let scaled = rescale_to_new(&data, lo, lo + width).unwrap();
        prop_assert!(scaled.iter().all(|&v| v >= lo - 1.0e-9 && v <= lo + width + 1.0e-9));

        let back = rescale_to_new(&scaled, min, max).unwrap();
        for (&orig, &restored) in data.iter().zip(&back) {
            prop_assert!((orig - restored).abs() <= 1.0e-6 * (1.0 + orig.abs()));
        }
    }
}

#[test]
fn rescale_hits_both_ends_of_the_target() {
    let out = rescale_to_new(&[-3.0, 7.0, 2.0], 0.0, 1.0).unwrap();
    assert_relative_eq!(out[0], 0.0);
    assert_relative_eq!(out[1], 1.0);
    assert_relative_eq!(out[2], 0.5);
}

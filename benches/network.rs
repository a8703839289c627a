use criterion::{Criterion, black_box, criterion_group, criterion_main};

use rust_fnn::{NetworkBuilder, Trainer};

fn trainer(sizes: &[usize]) -> Trainer {
    let mut builder = NetworkBuilder::new(sizes[0], sizes[sizes.len() - 1]).unwrap();
    for &units in &sizes[1..sizes.len() - 1] {
        builder = builder.add_hidden_layer(units).unwrap();
    }
    builder.build_with_seed(0).unwrap()
}

fn propagate_bench(c: &mut Criterion) {
    let mut trainer = trainer(&[784, 128, 10]);
    let input = vec![0.1; 784];

    c.bench_function("propagate_784_128_10", |b| {
        b.iter(|| {
            let out = trainer.propagate(black_box(&input)).unwrap();
            black_box(out[0]);
        })
    });

    c.bench_function("propagate_parallel_784_128_10", |b| {
        b.iter(|| {
            let out = trainer.propagate_parallel(black_box(&input)).unwrap();
            black_box(out[0]);
        })
    });
}

fn train_example_bench(c: &mut Criterion) {
    let mut trainer = trainer(&[784, 128, 10]);
    let input = vec![0.1; 784];
    let mut expected = vec![0.0; 10];
    expected[3] = 1.0;

    c.bench_function("train_example_784_128_10", |b| {
        b.iter(|| {
            let error = trainer
                .train_example(black_box(&input), black_box(&expected))
                .unwrap();
            black_box(error);
        })
    });
}

criterion_group!(benches, propagate_bench, train_example_bench);
criterion_main!(benches);

use rust_fnn::{Dataset, NetworkBuilder, TrainConfig};

fn main() -> rust_fnn::Result<()> {
    // Classic XOR dataset.
    let xs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let ys = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
    let train = Dataset::from_rows(&xs, &ys)?;

    // 2 -> 3 -> 1 network with sigmoid units.
    let mut trainer = NetworkBuilder::new(2, 1)?
        .add_hidden_layer(3)?
        .with_learning_rate(0.3)
        .build_with_seed(42)?;

    let report = trainer.train(&train, &TrainConfig::new(0.1, 2_000))?;
    println!(
        "converged after {} iterations, batch error {}",
        report.iterations, report.error
    );

    for x in xs {
        let out = trainer.propagate(&x)?;
        println!("x={x:?} y={:.4}", out[0]);
    }

    Ok(())
}

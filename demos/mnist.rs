//! Trains a digit classifier on the MNIST corpus.
//!
//! ```text
//! cargo run --release --example mnist -- <images> <labels> [samples] [config.json]
//! ```

use std::env;
use std::process;

use rust_fnn::mnist::{CLASSES, MnistImages};
use rust_fnn::{Error, NetworkBuilder, TrainConfig, load_config};

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, &v)| {
            if v > best.1 { (i, v) } else { best }
        })
        .0
}

fn main() -> rust_fnn::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("usage: mnist <images> <labels> [samples] [config.json]");
        process::exit(2);
    }

    let samples = match args.get(2) {
        Some(n) => n
            .parse()
            .map_err(|_| Error::InvalidConfig(format!("bad sample count {n:?}")))?,
        None => 1_000,
    };
    let cfg = match args.get(3) {
        Some(path) => load_config(path)?,
        None => TrainConfig::new(0.05, 50).with_parallel(true),
    };

    let mut images = MnistImages::open(&args[0], &args[1])?;
    let pixels = images.width() * images.height();
    println!(
        "corpus: {} images of {}x{}",
        images.image_count(),
        images.width(),
        images.height()
    );

    let train = images.take_dataset(samples)?;
    let mut trainer = NetworkBuilder::new(pixels, CLASSES)?
        .add_hidden_layer(64)?
        .with_learning_rate(0.1)
        .build_with_seed(0)?;

    match trainer.train(&train, &cfg) {
        Ok(report) => println!(
            "converged after {} iterations, batch error {}",
            report.iterations, report.error
        ),
        Err(Error::NonConvergence { error, iterations }) => {
            println!("stopped after {iterations} iterations, batch error {error}")
        }
        Err(err) => return Err(err),
    }

    // Score on the images that were not used for training.
    let mut seen = 0_usize;
    let mut correct = 0_usize;
    for image in images.by_ref().take(samples) {
        let image = image?;
        let out = if cfg.parallel {
            trainer.propagate_parallel(&image.to_input())?
        } else {
            trainer.propagate(&image.to_input())?
        };
        if argmax(out) == usize::from(image.label) {
            correct += 1;
        }
        seen += 1;
    }

    let train_correct = train
        .iter()
        .filter(|(x, y)| {
            trainer
                .propagate(x)
                .map(|out| argmax(out) == argmax(y))
                .unwrap_or(false)
        })
        .count();
    println!(
        "train accuracy {:.2}%",
        100.0 * train_correct as f64 / train.size() as f64
    );
    if seen > 0 {
        println!(
            "held-out accuracy {:.2}% ({correct}/{seen})",
            100.0 * correct as f64 / seen as f64
        );
    }

    Ok(())
}

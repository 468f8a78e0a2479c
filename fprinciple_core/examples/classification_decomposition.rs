/// Low/high frequency errors for a classification-style snapshot
///
/// This example shows how to:
/// 1. Encode class indices as one-hot labels
/// 2. Collect an epoch batch by batch with `SnapshotBuffer`
/// 3. Analyze each epoch and pivot the error history into a table
///
/// Predictions come from smoothing the labels with a bandwidth that shrinks
/// every epoch, so the fit sharpens from coarse to fine.
///
/// Run with: cargo run --example classification_decomposition
use anyhow::Result;
use fprinciple_core::decompose::low_frequency;
use fprinciple_core::{
    one_hot, AnalysisConfig, ErrorHistory, FrequencyAnalyzer, KernelMatrix, NullSink,
    SnapshotBuffer,
};
use ndarray::{s, Array2};
use rand::{Rng, SeedableRng};

const SAMPLES: usize = 240;
const CLASSES: usize = 3;
const BATCH: usize = 32;
const EPOCHS: usize = 10;

fn sector(x: f64, y: f64) -> usize {
    let angle = y.atan2(x) + std::f64::consts::PI;
    ((angle / (2.0 * std::f64::consts::PI) * CLASSES as f64) as usize).min(CLASSES - 1)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Classification Frequency Decomposition ===\n");

    let config = AnalysisConfig {
        delta: 0.1,
        ..AnalysisConfig::default()
    };
    let mut rng = rand::rngs::StdRng::seed_from_u64(config.seed);

    let features = Array2::from_shape_fn((SAMPLES, 2), |_| rng.gen_range(-1.0..1.0));
    let classes: Vec<usize> = features
        .rows()
        .into_iter()
        .map(|row| sector(row[0], row[1]))
        .collect();
    let labels = one_hot(&classes, CLASSES)?;

    let analyzer = FrequencyAnalyzer::from_config(&config)?;
    let mut history = ErrorHistory::with_capacity(EPOCHS);

    for epoch in 0..EPOCHS {
        let bandwidth = 2.0 * 0.6f64.powi(epoch as i32);
        let smoother = KernelMatrix::gaussian(features.view(), bandwidth)?;
        let predictions = low_frequency(&smoother, labels.view())?;

        let mut buffer = SnapshotBuffer::with_capacity(SAMPLES, 2, CLASSES);
        for start in (0..SAMPLES).step_by(BATCH) {
            let end = (start + BATCH).min(SAMPLES);
            buffer.push_batch(
                features.slice(s![start..end, ..]),
                labels.slice(s![start..end, ..]),
                predictions.slice(s![start..end, ..]),
            )?;
        }
        let snapshot = buffer.finish()?.shuffled(config.seed + epoch as u64);

        let pair = analyzer.analyze_epoch(epoch, &snapshot, &mut history, &mut NullSink)?;
        println!(
            "epoch {:>2} (smoothing {:.4}): e_low = {:.4}, e_high = {:.4}",
            epoch, bandwidth, pair.e_low, pair.e_high
        );
    }

    let table = history.pivot();
    let header: String = table.epochs.iter().map(|e| format!("{:>7}", e)).collect();
    println!("\n{:>8} {}", "epoch", header);
    for (row, kind) in table.kinds.iter().enumerate() {
        let cells: String = table
            .values
            .row(row)
            .iter()
            .map(|v| format!("{:>7.3}", v))
            .collect();
        println!("{:>8} {}", kind.as_str(), cells);
    }

    Ok(())
}

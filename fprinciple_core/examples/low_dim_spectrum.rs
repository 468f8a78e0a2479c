/// 1-D Frequency Principle demonstration
///
/// This example shows how to:
/// 1. Generate the square-wave target from an `AnalysisConfig`
/// 2. Fit it with a kernel-smoothed residual update, which corrects low
///    frequencies first
/// 3. Track `(e_low, e_high)` and spectrum snapshots per epoch
/// 4. Write everything to a JSONL report (and PNG frames with `--features plot`)
///
/// Run with: cargo run --example low_dim_spectrum [config.toml] [report-dir]
use std::path::PathBuf;

use anyhow::Result;
use fprinciple_core::data::generate;
use fprinciple_core::decompose::low_frequency;
use fprinciple_core::{
    AnalysisConfig, EpochSnapshot, ErrorHistory, ErrorKind, ErrorRecord, FrequencyAnalyzer,
    JsonlSink, KernelMatrix, ReportSink, SpectralTracker, SpectrumPair,
};
use ndarray::Array2;

const EPOCHS: usize = 120;
const LEARNING_RATE: f64 = 0.3;
const SMOOTHER_DELTA: f64 = 0.5;

/// Forwards every record to several sinks.
struct Fanout(Vec<Box<dyn ReportSink>>);

impl ReportSink for Fanout {
    fn record_errors(&mut self, records: &[ErrorRecord]) -> std::io::Result<()> {
        self.0.iter_mut().try_for_each(|sink| sink.record_errors(records))
    }

    fn record_spectrum(&mut self, frame: usize, pair: &SpectrumPair) -> std::io::Result<()> {
        self.0
            .iter_mut()
            .try_for_each(|sink| sink.record_spectrum(frame, pair))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => AnalysisConfig::load_from_file(path)?,
        None => AnalysisConfig::default(),
    };
    let report_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("fprinciple_low_dim"));

    println!("=== 1-D Frequency Principle Demo ===\n");
    println!("delta: {}", config.delta);
    println!(
        "samples: {} on [{}, {}], period {}",
        config.low_dim.num_samples,
        config.low_dim.domain_min,
        config.low_dim.domain_max,
        config.low_dim.period
    );
    println!("report: {}\n", report_dir.display());

    let data = generate(&config.low_dim)?;
    let tracker = SpectralTracker::from_samples(&data.positions(), &data.targets())?;
    if let Some(bin) = tracker.target().dominant_bin() {
        println!(
            "target dominant frequency: {:.4}",
            tracker.target().frequencies[bin]
        );
    }

    let analyzer = FrequencyAnalyzer::from_config(&config)?;
    let smoother = KernelMatrix::gaussian(data.x.view(), SMOOTHER_DELTA)?;

    #[allow(unused_mut)]
    let mut sinks: Vec<Box<dyn ReportSink>> =
        vec![Box::new(JsonlSink::new(report_dir.join("report.jsonl"))?)];
    #[cfg(feature = "plot")]
    sinks.push(Box::new(fprinciple_core::SpectrumPlotSink::new(
        report_dir.join("frames"),
    )?));
    let mut sink = Fanout(sinks);

    let mut history = ErrorHistory::with_capacity(EPOCHS);
    let mut prediction = Array2::<f64>::zeros(data.y.raw_dim());

    for epoch in 0..EPOCHS {
        let snapshot = EpochSnapshot::new(data.x.clone(), data.y.clone(), prediction.clone())?;
        let pair = analyzer.analyze_epoch(epoch, &snapshot, &mut history, &mut sink)?;
        FrequencyAnalyzer::track_spectrum(
            &tracker,
            epoch,
            &prediction.column(0).to_vec(),
            config.plot_interval,
            &mut sink,
        )?;

        if epoch % config.plot_interval == 0 {
            println!(
                "epoch {:>3}: e_low = {:.4}, e_high = {:.4}",
                epoch, pair.e_low, pair.e_high
            );
        }

        let residual = &data.y - &prediction;
        let step = low_frequency(&smoother, residual.view())?;
        prediction.scaled_add(LEARNING_RATE, &step);
    }

    for threshold in [0.5, 0.2, 0.1] {
        println!(
            "\nfirst epoch below {:.1}: e_low {:?}, e_high {:?}",
            threshold,
            history.first_epoch_below(ErrorKind::ELow, threshold),
            history.first_epoch_below(ErrorKind::EHigh, threshold)
        );
    }

    Ok(())
}

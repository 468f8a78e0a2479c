//! PNG rendering of spectrum snapshots (`plot` feature).
//!
//! Each snapshot becomes `<frame>.png` in a caller-supplied directory: the
//! target spectrum as a dashed red line and the prediction spectrum in blue
//! over frequencies `[0, 2.5]` and amplitudes `[0, 1]`. Charts carry no text
//! so rendering needs no system fonts.

use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::history::ErrorRecord;
use crate::logging::ReportSink;
use crate::spectral::SpectrumPair;

const FREQUENCY_RANGE: (f64, f64) = (0.0, 2.5);
const AMPLITUDE_RANGE: (f64, f64) = (0.0, 1.0);

#[derive(Debug, Clone)]
pub struct SpectrumPlotSink {
    dir: PathBuf,
    width: u32,
    height: u32,
}

impl SpectrumPlotSink {
    /// Create `dir` if needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            width: 640,
            height: 480,
        })
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn frame_path(&self, frame: usize) -> PathBuf {
        self.dir.join(format!("{}.png", frame))
    }

    fn render(&self, path: &Path, pair: &SpectrumPair) -> io::Result<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(to_io)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .build_cartesian_2d(
                FREQUENCY_RANGE.0..FREQUENCY_RANGE.1,
                AMPLITUDE_RANGE.0..AMPLITUDE_RANGE.1,
            )
            .map_err(to_io)?;

        let frequencies = pair.frequencies();
        chart
            .draw_series(DashedLineSeries::new(
                visible_points(frequencies, &pair.target.amplitudes),
                8,
                4,
                RED.stroke_width(2),
            ))
            .map_err(to_io)?;
        chart
            .draw_series(LineSeries::new(
                visible_points(frequencies, &pair.predicted.amplitudes),
                BLUE.stroke_width(2),
            ))
            .map_err(to_io)?;

        root.present().map_err(to_io)
    }
}

fn to_io<E: Error + Send + Sync + 'static>(err: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

fn visible_points(frequencies: &[f64], amplitudes: &[f64]) -> Vec<(f64, f64)> {
    frequencies
        .iter()
        .zip(amplitudes)
        .filter(|(f, _)| **f <= FREQUENCY_RANGE.1)
        .map(|(&f, &a)| (f, a))
        .collect()
}

impl ReportSink for SpectrumPlotSink {
    fn record_errors(&mut self, _records: &[ErrorRecord]) -> io::Result<()> {
        Ok(())
    }

    fn record_spectrum(&mut self, frame: usize, pair: &SpectrumPair) -> io::Result<()> {
        let path = self.frame_path(frame);
        self.render(&path, pair)
    }
}

//! Report sinks for per-epoch diagnostics.
//!
//! The engine never picks an output location. Callers inject a
//! [`ReportSink`]; [`JsonlSink`] appends JSON lines to a path the caller
//! chooses and [`MemorySink`] keeps everything in memory.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::history::{ErrorKind, ErrorRecord};
use crate::spectral::SpectrumPair;

/// Destination for error records and spectrum snapshots.
pub trait ReportSink {
    fn record_errors(&mut self, records: &[ErrorRecord]) -> io::Result<()>;

    /// `frame` is the one-based snapshot number.
    fn record_spectrum(&mut self, frame: usize, pair: &SpectrumPair) -> io::Result<()>;
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn record_errors(&mut self, _records: &[ErrorRecord]) -> io::Result<()> {
        Ok(())
    }

    fn record_spectrum(&mut self, _frame: usize, _pair: &SpectrumPair) -> io::Result<()> {
        Ok(())
    }
}

/// In-memory sink, mainly for tests and notebooks.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub errors: Vec<ErrorRecord>,
    pub spectra: Vec<(usize, SpectrumPair)>,
}

impl ReportSink for MemorySink {
    fn record_errors(&mut self, records: &[ErrorRecord]) -> io::Result<()> {
        self.errors.extend_from_slice(records);
        Ok(())
    }

    fn record_spectrum(&mut self, frame: usize, pair: &SpectrumPair) -> io::Result<()> {
        self.spectra.push((frame, pair.clone()));
        Ok(())
    }
}

/// One line of a JSONL report.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportEntry<'a> {
    Error {
        epoch: usize,
        e_type: ErrorKind,
        e_value: f64,
        timestamp_ms: u128,
    },
    Spectrum {
        epoch: usize,
        frame: usize,
        frequencies: &'a [f64],
        target: &'a [f64],
        predicted: &'a [f64],
        timestamp_ms: u128,
    },
}

/// Appends [`ReportEntry`] lines to a caller-chosen file.
#[derive(Debug, Clone)]
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create the parent directory if needed; the file itself is created on
    /// first write and appended to afterwards.
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonlSink {
    fn record_errors(&mut self, records: &[ErrorRecord]) -> io::Result<()> {
        let timestamp_ms = timestamp_now();
        for record in records {
            let entry = ReportEntry::Error {
                epoch: record.epoch,
                e_type: record.e_type,
                e_value: record.e_value,
                timestamp_ms,
            };
            append_json_line(&self.path, &entry)?;
        }
        Ok(())
    }

    fn record_spectrum(&mut self, frame: usize, pair: &SpectrumPair) -> io::Result<()> {
        let entry = ReportEntry::Spectrum {
            epoch: pair.epoch,
            frame,
            frequencies: pair.frequencies(),
            target: &pair.target.amplitudes,
            predicted: &pair.predicted.amplitudes,
            timestamp_ms: timestamp_now(),
        };
        append_json_line(&self.path, &entry)
    }
}

fn append_json_line<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    serde_json::to_writer(&mut file, value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    file.write_all(b"\n")
}

pub fn timestamp_now() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectral::SpectralTracker;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("fprinciple_logging_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn memory_sink_collects() {
        let mut sink = MemorySink::default();
        let records = [
            ErrorRecord {
                epoch: 0,
                e_type: ErrorKind::ELow,
                e_value: 0.5,
            },
            ErrorRecord {
                epoch: 0,
                e_type: ErrorKind::EHigh,
                e_value: 0.7,
            },
        ];
        sink.record_errors(&records).unwrap();
        assert_eq!(sink.errors.len(), 2);
        assert_eq!(sink.errors[1].e_value, 0.7);
    }

    #[test]
    fn jsonl_sink_appends_lines() {
        let path = temp_path("report.jsonl");
        let _ = fs::remove_file(&path);
        let mut sink = JsonlSink::new(&path).unwrap();

        sink.record_errors(&[ErrorRecord {
            epoch: 2,
            e_type: ErrorKind::ELow,
            e_value: 0.125,
        }])
        .unwrap();
        let tracker = SpectralTracker::new(&[1.0, 0.0, -1.0, 0.0], 0.5).unwrap();
        let pair = tracker.snapshot(2, &[0.0; 4]).unwrap();
        sink.record_spectrum(1, &pair).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["kind"], "error");
        assert_eq!(first["e_type"], "e_low");
        assert_eq!(first["e_value"], 0.125);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["kind"], "spectrum");
        assert_eq!(second["frame"], 1);
        assert_eq!(second["frequencies"].as_array().unwrap().len(), 3);

        let _ = fs::remove_file(&path);
    }
}

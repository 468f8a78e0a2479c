//! Append-only time series of per-epoch relative errors.
//!
//! Each epoch contributes two `(epoch, e_type, e_value)` records. The series
//! is never edited in place; tables for heat-map style reports are derived
//! from it with [`ErrorHistory::pivot`].

use std::collections::BTreeSet;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{FrequencyError, FrequencyResult};
use crate::relative::ErrorPair;

/// Which relative error a record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ELow,
    EHigh,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 2] = [ErrorKind::ELow, ErrorKind::EHigh];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ELow => "e_low",
            ErrorKind::EHigh => "e_high",
        }
    }

    fn select(&self, pair: &ErrorPair) -> f64 {
        match self {
            ErrorKind::ELow => pair.e_low,
            ErrorKind::EHigh => pair.e_high,
        }
    }
}

/// One row of the history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub epoch: usize,
    pub e_type: ErrorKind,
    pub e_value: f64,
}

/// `e_type × epoch` table; missing cells are NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorTable {
    pub kinds: Vec<ErrorKind>,
    pub epochs: Vec<usize>,
    pub values: Array2<f64>,
}

/// Serialized as a plain array of records; deserializing re-checks epoch
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ErrorRecord>", into = "Vec<ErrorRecord>")]
pub struct ErrorHistory {
    records: Vec<ErrorRecord>,
}

impl ErrorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `epochs` epochs of records.
    pub fn with_capacity(epochs: usize) -> Self {
        Self {
            records: Vec::with_capacity(epochs * ErrorKind::ALL.len()),
        }
    }

    /// Records `record` would append for `epoch`, without appending them.
    ///
    /// # Errors
    ///
    /// `OutOfOrder` if `epoch` precedes the last recorded epoch.
    pub fn prepare(&self, epoch: usize, pair: ErrorPair) -> FrequencyResult<[ErrorRecord; 2]> {
        if let Some(last) = self.last_epoch() {
            if epoch < last {
                return Err(FrequencyError::out_of_order(last, epoch));
            }
        }

        Ok(ErrorKind::ALL.map(|kind| ErrorRecord {
            epoch,
            e_type: kind,
            e_value: kind.select(&pair),
        }))
    }

    /// Append both errors for `epoch` and return the new records.
    ///
    /// # Errors
    ///
    /// `OutOfOrder` if `epoch` precedes the last recorded epoch.
    pub fn record(&mut self, epoch: usize, pair: ErrorPair) -> FrequencyResult<[ErrorRecord; 2]> {
        let appended = self.prepare(epoch, pair)?;
        self.records.extend_from_slice(&appended);
        Ok(appended)
    }

    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last_epoch(&self) -> Option<usize> {
        self.records.last().map(|record| record.epoch)
    }

    /// Most recent value of `kind`.
    pub fn latest(&self, kind: ErrorKind) -> Option<f64> {
        self.records
            .iter()
            .rev()
            .find(|record| record.e_type == kind)
            .map(|record| record.e_value)
    }

    /// `(epoch, value)` pairs of one error kind in recording order.
    pub fn series(&self, kind: ErrorKind) -> Vec<(usize, f64)> {
        self.records
            .iter()
            .filter(|record| record.e_type == kind)
            .map(|record| (record.epoch, record.e_value))
            .collect()
    }

    /// First epoch whose value of `kind` is strictly below `threshold`.
    /// NaN values never qualify.
    pub fn first_epoch_below(&self, kind: ErrorKind, threshold: f64) -> Option<usize> {
        self.records
            .iter()
            .find(|record| record.e_type == kind && record.e_value < threshold)
            .map(|record| record.epoch)
    }

    /// Epochs where either error is NaN or infinite.
    pub fn degenerate_epochs(&self) -> Vec<usize> {
        let epochs: BTreeSet<usize> = self
            .records
            .iter()
            .filter(|record| !record.e_value.is_finite())
            .map(|record| record.epoch)
            .collect();
        epochs.into_iter().collect()
    }

    /// Pivot into an `e_type × epoch` table. A repeated epoch keeps its
    /// latest value.
    pub fn pivot(&self) -> ErrorTable {
        let epochs: Vec<usize> = self
            .records
            .iter()
            .map(|record| record.epoch)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let kinds = ErrorKind::ALL.to_vec();

        let mut values = Array2::from_elem((kinds.len(), epochs.len()), f64::NAN);
        for record in &self.records {
            let row = kinds
                .iter()
                .position(|&kind| kind == record.e_type)
                .unwrap_or_default();
            if let Ok(col) = epochs.binary_search(&record.epoch) {
                values[[row, col]] = record.e_value;
            }
        }

        ErrorTable {
            kinds,
            epochs,
            values,
        }
    }
}

impl TryFrom<Vec<ErrorRecord>> for ErrorHistory {
    type Error = FrequencyError;

    fn try_from(records: Vec<ErrorRecord>) -> FrequencyResult<Self> {
        for window in records.windows(2) {
            if window[1].epoch < window[0].epoch {
                return Err(FrequencyError::out_of_order(window[0].epoch, window[1].epoch));
            }
        }
        Ok(Self { records })
    }
}

impl From<ErrorHistory> for Vec<ErrorRecord> {
    fn from(history: ErrorHistory) -> Self {
        history.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(e_low: f64, e_high: f64) -> ErrorPair {
        ErrorPair { e_low, e_high }
    }

    #[test]
    fn test_records_two_rows_per_epoch() {
        let mut history = ErrorHistory::with_capacity(3);
        let appended = history.record(0, pair(0.9, 0.95)).unwrap();
        assert_eq!(appended[0].e_type, ErrorKind::ELow);
        assert_eq!(appended[1].e_value, 0.95);
        history.record(1, pair(0.5, 0.9)).unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history.latest(ErrorKind::ELow), Some(0.5));
        assert_eq!(history.series(ErrorKind::EHigh), vec![(0, 0.95), (1, 0.9)]);
    }

    #[test]
    fn test_rejects_out_of_order_epoch() {
        let mut history = ErrorHistory::new();
        history.record(5, pair(0.1, 0.2)).unwrap();
        let err = history.record(4, pair(0.1, 0.2)).unwrap_err();
        assert_eq!(err, FrequencyError::out_of_order(5, 4));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_first_epoch_below() {
        let mut history = ErrorHistory::new();
        for (epoch, (low, high)) in [(0.9, 0.95), (0.4, 0.8), (0.2, 0.45), (0.1, 0.3)]
            .into_iter()
            .enumerate()
        {
            history.record(epoch, pair(low, high)).unwrap();
        }
        assert_eq!(history.first_epoch_below(ErrorKind::ELow, 0.5), Some(1));
        assert_eq!(history.first_epoch_below(ErrorKind::EHigh, 0.5), Some(2));
        assert_eq!(history.first_epoch_below(ErrorKind::EHigh, 0.01), None);
    }

    #[test]
    fn test_degenerate_epochs() {
        let mut history = ErrorHistory::new();
        history.record(0, pair(0.5, f64::NAN)).unwrap();
        history.record(1, pair(0.4, 0.3)).unwrap();
        history.record(2, pair(f64::INFINITY, f64::NAN)).unwrap();
        assert_eq!(history.degenerate_epochs(), vec![0, 2]);
        assert_eq!(history.first_epoch_below(ErrorKind::EHigh, 1.0), Some(1));
    }

    #[test]
    fn test_pivot_layout() {
        let mut history = ErrorHistory::new();
        history.record(0, pair(0.8, 0.9)).unwrap();
        history.record(2, pair(0.3, 0.7)).unwrap();
        let table = history.pivot();
        assert_eq!(table.kinds, vec![ErrorKind::ELow, ErrorKind::EHigh]);
        assert_eq!(table.epochs, vec![0, 2]);
        assert_eq!(table.values.dim(), (2, 2));
        assert_eq!(table.values[[0, 1]], 0.3);
        assert_eq!(table.values[[1, 0]], 0.9);
    }

    #[test]
    fn test_prepare_leaves_history_untouched() {
        let mut history = ErrorHistory::new();
        history.record(2, pair(0.5, 0.6)).unwrap();
        let pending = history.prepare(3, pair(0.4, 0.5)).unwrap();
        assert_eq!(pending[0].epoch, 3);
        assert_eq!(history.len(), 2);
        assert!(history.prepare(1, pair(0.4, 0.5)).is_err());
    }

    #[test]
    fn test_deserialize_checks_epoch_order() {
        let mut history = ErrorHistory::new();
        history.record(0, pair(0.9, 0.95)).unwrap();
        history.record(4, pair(0.3, 0.8)).unwrap();
        let json = serde_json::to_string(&history).unwrap();
        assert!(json.starts_with('['));
        let restored: ErrorHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, history);

        let shuffled = r#"[
            {"epoch":4,"e_type":"e_low","e_value":0.3},
            {"epoch":0,"e_type":"e_low","e_value":0.9}
        ]"#;
        assert!(serde_json::from_str::<ErrorHistory>(shuffled).is_err());
    }

    #[test]
    fn test_record_serializes_with_snake_case_type() {
        let record = ErrorRecord {
            epoch: 3,
            e_type: ErrorKind::EHigh,
            e_value: 0.25,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"epoch":3,"e_type":"e_high","e_value":0.25}"#);
    }
}

//! Evenly sampled 1-D square-wave target.
//!
//! `x` spans `[domain_min, domain_max]` at `num_samples` evenly spaced points;
//! the target is `+1` where `sin(2π·x/period) > cutoff`, `−1` where it is
//! below `−cutoff` and `0` in between. With the default period of 5 the
//! fundamental sits at frequency 0.2 and odd harmonics carry the rest.

use std::f64::consts::PI;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::config::LowDimConfig;
use crate::error::{ensure_positive, FrequencyError, FrequencyResult};

/// Samples of the 1-D target, both as `n×1` column matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowDimData {
    pub x: Array2<f64>,
    pub y: Array2<f64>,
}

impl LowDimData {
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.x.nrows() == 0
    }

    /// Sample positions as a flat vector.
    pub fn positions(&self) -> Vec<f64> {
        self.x.column(0).to_vec()
    }

    /// Target values as a flat vector.
    pub fn targets(&self) -> Vec<f64> {
        self.y.column(0).to_vec()
    }

    /// Spacing between neighbouring samples, `None` for fewer than two.
    pub fn dx(&self) -> Option<f64> {
        if self.len() < 2 {
            return None;
        }
        Some(self.x[[1, 0]] - self.x[[0, 0]])
    }
}

/// `num` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            let mut values: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            values[num - 1] = end;
            values
        }
    }
}

/// Three-level square wave of `sin(2π·x/period)` clipped at `±cutoff`.
pub fn square_wave(x: f64, period: f64, cutoff: f64) -> f64 {
    let phase = (x / period * PI * 2.0).sin();
    if phase > cutoff {
        1.0
    } else if phase < -cutoff {
        -1.0
    } else {
        0.0
    }
}

/// Generate the target over `[-10, 10]` with cutoff 0.6.
///
/// # Example
///
/// ```
/// use fprinciple_core::data::low_dim_data;
///
/// let data = low_dim_data(100, 5.0).unwrap();
/// assert_eq!(data.x.dim(), (100, 1));
/// assert_eq!(data.x[[0, 0]], -10.0);
/// assert_eq!(data.x[[99, 0]], 10.0);
/// ```
pub fn low_dim_data(num: usize, period: f64) -> FrequencyResult<LowDimData> {
    generate(&LowDimConfig {
        num_samples: num,
        period,
        ..LowDimConfig::default()
    })
}

/// Generate the target described by `config`.
pub fn generate(config: &LowDimConfig) -> FrequencyResult<LowDimData> {
    if config.num_samples == 0 {
        return Err(FrequencyError::empty_collection("low-dimensional samples"));
    }
    ensure_positive("period", config.period)?;
    if !(config.domain_max > config.domain_min) {
        return Err(FrequencyError::invalid_config(
            "domain_max",
            config.domain_max.to_string(),
            format!("must exceed domain_min = {}", config.domain_min),
        ));
    }

    let xs = linspace(config.domain_min, config.domain_max, config.num_samples);
    let ys: Vec<f64> = xs
        .iter()
        .map(|&x| square_wave(x, config.period, config.cutoff))
        .collect();

    let n = xs.len();
    let x = Array2::from_shape_fn((n, 1), |(i, _)| xs[i]);
    let y = Array2::from_shape_fn((n, 1), |(i, _)| ys[i]);

    Ok(LowDimData { x, y })
}

//! One-sided amplitude spectra of evenly sampled real sequences.
//!
//! For a sequence of length n sampled at spacing `dx` the frequency axis is
//! `f[k] = k / (n·dx)` for `k = 0 … ⌊n/2⌋` and the amplitude at bin `k` is
//! `|X[k]| / n`, where `X` is the discrete Fourier transform.

use std::fmt;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, FrequencyError, FrequencyResult};

/// Amplitude spectrum on a non-negative frequency axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeSpectrum {
    /// Bin frequencies `k / (n·dx)`
    pub frequencies: Vec<f64>,
    /// Normalised magnitudes `|X[k]| / n`
    pub amplitudes: Vec<f64>,
}

impl AmplitudeSpectrum {
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Spacing between neighbouring bins, `1 / (n·dx)`.
    pub fn resolution(&self) -> f64 {
        match self.frequencies.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    /// Bin with the largest amplitude. Ties resolve to the lowest frequency.
    pub fn dominant_bin(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, &amp) in self.amplitudes.iter().enumerate() {
            match best {
                Some((_, current)) if amp <= current => {}
                _ => best = Some((idx, amp)),
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Bin whose frequency is closest to `frequency`.
    pub fn bin_nearest(&self, frequency: f64) -> Option<usize> {
        self.frequencies
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (*a - frequency)
                    .abs()
                    .partial_cmp(&(*b - frequency).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(idx, _)| idx)
    }

    /// `(frequency, amplitude)` pairs in ascending frequency order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.amplitudes.iter().copied())
    }
}

/// Frequency axis of a one-sided transform, `k / (n·dx)` for `k = 0 … ⌊n/2⌋`.
pub fn rfft_frequencies(n: usize, dx: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let scale = 1.0 / (n as f64 * dx);
    (0..=n / 2).map(|k| k as f64 * scale).collect()
}

/// Planned forward transform for real sequences of one fixed length.
///
/// Planning is done once; [`OneSidedTransform::amplitudes`] can be called
/// every epoch without re-planning.
#[derive(Clone)]
pub struct OneSidedTransform {
    len: usize,
    fft: Arc<dyn Fft<f64>>,
}

impl fmt::Debug for OneSidedTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneSidedTransform")
            .field("len", &self.len)
            .finish()
    }
}

impl OneSidedTransform {
    pub fn new(len: usize) -> FrequencyResult<Self> {
        if len == 0 {
            return Err(FrequencyError::empty_collection("spectral input sequence"));
        }
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(len);
        Ok(Self { len, fft })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `|X[k]| / n` for `k = 0 … ⌊n/2⌋`.
    pub fn amplitudes(&self, signal: &[f64]) -> FrequencyResult<Vec<f64>> {
        if signal.len() != self.len {
            return Err(FrequencyError::dimension_mismatch(
                self.len,
                signal.len(),
                "spectral input length",
            ));
        }

        let mut buffer: Vec<Complex<f64>> =
            signal.iter().map(|&v| Complex::new(v, 0.0)).collect();
        self.fft.process(&mut buffer);

        let n = self.len as f64;
        Ok(buffer[..=self.len / 2]
            .iter()
            .map(|c| c.norm() / n)
            .collect())
    }

    /// Full spectrum of `signal` sampled at spacing `dx`.
    pub fn spectrum(&self, signal: &[f64], dx: f64) -> FrequencyResult<AmplitudeSpectrum> {
        ensure_positive("dx", dx)?;
        let amplitudes = self.amplitudes(signal)?;
        Ok(AmplitudeSpectrum {
            frequencies: rfft_frequencies(self.len, dx),
            amplitudes,
        })
    }
}

/// One-off amplitude spectrum; plans a transform for `signal.len()`.
///
/// # Example
///
/// ```
/// use fprinciple_core::spectral::amplitude_spectrum;
///
/// let signal: Vec<f64> = (0..8)
///     .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 4.0).cos())
///     .collect();
/// let spectrum = amplitude_spectrum(&signal, 1.0).unwrap();
/// assert_eq!(spectrum.len(), 5);
/// assert_eq!(spectrum.dominant_bin(), Some(2));
/// ```
pub fn amplitude_spectrum(signal: &[f64], dx: f64) -> FrequencyResult<AmplitudeSpectrum> {
    OneSidedTransform::new(signal.len())?.spectrum(signal, dx)
}

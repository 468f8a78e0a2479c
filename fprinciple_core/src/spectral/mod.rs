//! Spectral analysis for the 1-D regression case.
//!
//! Provides exact one-sided amplitude spectra of evenly sampled sequences and
//! a tracker that compares a fixed target spectrum with the spectrum of the
//! current prediction. Also hosts the compensated accumulator shared by the
//! energy reductions in [`crate::relative`].

pub mod accumulate;
pub mod fft;
pub mod tracker;

pub use accumulate::{compensated_sum, squared_difference, sum_of_squares};
pub use fft::{amplitude_spectrum, rfft_frequencies, AmplitudeSpectrum, OneSidedTransform};
pub use tracker::{SpectralTracker, SpectrumPair};

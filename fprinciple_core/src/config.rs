//! Analysis configuration via TOML files.
//!
//! Every section and key is optional; missing values fall back to the
//! defaults below.
//!
//! ```toml
//! [kernel]
//! delta = 3.0
//!
//! [low_dim]
//! num_samples = 100
//! period = 5.0
//! domain_min = -10.0
//! domain_max = 10.0
//! cutoff = 0.6
//!
//! [report]
//! plot_interval = 15
//!
//! [run]
//! seed = 0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FrequencyError;

/// Parameters of the evenly sampled 1-D square-wave target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowDimConfig {
    /// Number of evenly spaced samples
    pub num_samples: usize,
    /// Period of the underlying sine
    pub period: f64,
    /// Left end of the sampled interval
    pub domain_min: f64,
    /// Right end of the sampled interval
    pub domain_max: f64,
    /// Threshold on the sine above which the target is ±1
    pub cutoff: f64,
}

impl Default for LowDimConfig {
    fn default() -> Self {
        Self {
            num_samples: default_num_samples(),
            period: default_period(),
            domain_min: default_domain_min(),
            domain_max: default_domain_max(),
            cutoff: default_cutoff(),
        }
    }
}

/// Complete analysis configuration.
///
/// # Examples
///
/// ```
/// use fprinciple_core::AnalysisConfig;
///
/// let config = AnalysisConfig::from_str("[kernel]\ndelta = 1.5").unwrap();
/// assert_eq!(config.delta, 1.5);
/// assert_eq!(config.plot_interval, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisConfig {
    /// Kernel bandwidth, strictly positive
    pub delta: f64,
    /// 1-D target generation
    pub low_dim: LowDimConfig,
    /// Epochs between spectrum snapshots
    pub plot_interval: usize,
    /// Seed handed to the data-order shuffle
    pub seed: u64,
}

impl AnalysisConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawAnalysisConfig =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;

        let config = Self {
            delta: raw.kernel.delta,
            low_dim: LowDimConfig {
                num_samples: raw.low_dim.num_samples,
                period: raw.low_dim.period,
                domain_min: raw.low_dim.domain_min,
                domain_max: raw.low_dim.domain_max,
                cutoff: raw.low_dim.cutoff,
            },
            plot_interval: raw.report.plot_interval,
            seed: raw.run.seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter; the engine assumes a validated configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(ConfigError::Invalid(FrequencyError::invalid_config(
                "kernel.delta",
                self.delta.to_string(),
                "must be finite and > 0",
            )));
        }
        if self.low_dim.num_samples == 0 {
            return Err(ConfigError::Invalid(FrequencyError::invalid_config(
                "low_dim.num_samples",
                "0",
                "must be non-zero",
            )));
        }
        if !self.low_dim.period.is_finite() || self.low_dim.period <= 0.0 {
            return Err(ConfigError::Invalid(FrequencyError::invalid_config(
                "low_dim.period",
                self.low_dim.period.to_string(),
                "must be finite and > 0",
            )));
        }
        if !(self.low_dim.domain_max > self.low_dim.domain_min) {
            return Err(ConfigError::Invalid(FrequencyError::invalid_config(
                "low_dim.domain_max",
                self.low_dim.domain_max.to_string(),
                format!("must exceed low_dim.domain_min = {}", self.low_dim.domain_min),
            )));
        }
        if !(0.0..1.0).contains(&self.low_dim.cutoff) {
            return Err(ConfigError::Invalid(FrequencyError::invalid_config(
                "low_dim.cutoff",
                self.low_dim.cutoff.to_string(),
                "must lie in [0, 1)",
            )));
        }
        if self.plot_interval == 0 {
            return Err(ConfigError::Invalid(FrequencyError::invalid_config(
                "report.plot_interval",
                "0",
                "must be non-zero",
            )));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            delta: default_delta(),
            low_dim: LowDimConfig::default(),
            plot_interval: default_plot_interval(),
            seed: 0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawAnalysisConfig {
    #[serde(default)]
    kernel: RawKernel,
    #[serde(default)]
    low_dim: RawLowDim,
    #[serde(default)]
    report: RawReport,
    #[serde(default)]
    run: RawRun,
}

#[derive(Debug, Deserialize)]
struct RawKernel {
    #[serde(default = "default_delta")]
    delta: f64,
}

impl Default for RawKernel {
    fn default() -> Self {
        Self {
            delta: default_delta(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawLowDim {
    #[serde(default = "default_num_samples")]
    num_samples: usize,
    #[serde(default = "default_period")]
    period: f64,
    #[serde(default = "default_domain_min")]
    domain_min: f64,
    #[serde(default = "default_domain_max")]
    domain_max: f64,
    #[serde(default = "default_cutoff")]
    cutoff: f64,
}

impl Default for RawLowDim {
    fn default() -> Self {
        Self {
            num_samples: default_num_samples(),
            period: default_period(),
            domain_min: default_domain_min(),
            domain_max: default_domain_max(),
            cutoff: default_cutoff(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawReport {
    #[serde(default = "default_plot_interval")]
    plot_interval: usize,
}

impl Default for RawReport {
    fn default() -> Self {
        Self {
            plot_interval: default_plot_interval(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawRun {
    #[serde(default)]
    seed: u64,
}

fn default_delta() -> f64 {
    3.0
}

fn default_num_samples() -> usize {
    100
}

fn default_period() -> f64 {
    5.0
}

fn default_domain_min() -> f64 {
    -10.0
}

fn default_domain_max() -> f64 {
    10.0
}

fn default_cutoff() -> f64 {
    0.6
}

fn default_plot_interval() -> usize {
    15
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(FrequencyError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {}", err),
            ConfigError::Parse(err) => write!(f, "Parse error: {}", err),
            ConfigError::Invalid(err) => write!(f, "Invalid configuration: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<FrequencyError> for ConfigError {
    fn from(value: FrequencyError) -> Self {
        ConfigError::Invalid(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_sections_missing() {
        let config = AnalysisConfig::from_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.delta, 3.0);
        assert_eq!(config.low_dim.num_samples, 100);
        assert_eq!(config.low_dim.period, 5.0);
        assert_eq!(config.low_dim.cutoff, 0.6);
        assert_eq!(config.plot_interval, 15);
    }

    #[test]
    fn parses_all_sections() {
        let toml = r#"
            [kernel]
            delta = 0.25

            [low_dim]
            num_samples = 64
            period = 2.5
            domain_min = 0.0
            domain_max = 4.0
            cutoff = 0.3

            [report]
            plot_interval = 5

            [run]
            seed = 42
        "#;
        let config = AnalysisConfig::from_str(toml).unwrap();
        assert_eq!(config.delta, 0.25);
        assert_eq!(config.low_dim.num_samples, 64);
        assert_eq!(config.low_dim.period, 2.5);
        assert_eq!(config.low_dim.domain_max, 4.0);
        assert_eq!(config.low_dim.cutoff, 0.3);
        assert_eq!(config.plot_interval, 5);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn rejects_non_positive_delta() {
        let err = AnalysisConfig::from_str("[kernel]\ndelta = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("kernel.delta"));

        let err = AnalysisConfig::from_str("[kernel]\ndelta = -2.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_bad_domain_and_interval() {
        let err =
            AnalysisConfig::from_str("[low_dim]\ndomain_min = 1.0\ndomain_max = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AnalysisConfig::from_str("[report]\nplot_interval = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = AnalysisConfig::from_str("[kernel\ndelta = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AnalysisConfig::load_from_file("/nonexistent/fprinciple.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

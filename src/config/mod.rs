//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::pipeline::DistributionConfig;
use crate::rollout::TrafficSplit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete run configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub distribution: DistributionConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub rollout: TrafficSplit,
    #[serde(default)]
    pub budget: BudgetConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which calculator to run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Distribution,
    Rollout,
    Budget,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distribution => write!(f, "distribution"),
            Self::Rollout => write!(f, "rollout"),
            Self::Budget => write!(f, "budget"),
        }
    }
}

/// Distribution run options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Recompute for every bucket count from 2 to 8
    #[serde(default)]
    pub sweep: bool,
    /// Number of successive seeds to compute, starting at the configured seed
    #[serde(default = "default_regenerate")]
    pub regenerate: u32,
    /// Bucket records loaded from this JSON file instead of building a dataset
    pub records: Option<PathBuf>,
    /// Write the dataset to this JSON file
    pub dump_records: Option<PathBuf>,
}

fn default_regenerate() -> u32 {
    1
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sweep: false,
            regenerate: default_regenerate(),
            records: None,
            dump_records: None,
        }
    }
}

/// Smallest and largest bucket count covered by a sweep
pub const SWEEP_MIN_BUCKETS: usize = 2;
pub const SWEEP_MAX_BUCKETS: usize = 8;

/// SLO error budget inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Availability target, e.g. 0.999
    #[serde(default = "default_slo_target")]
    pub slo_target: f64,
    /// Window length in minutes
    #[serde(default = "default_window_minutes")]
    pub window_minutes: u64,
    /// Observed error rate in [0, 1]
    #[serde(default)]
    pub observed_error_rate: f64,
}

fn default_slo_target() -> f64 {
    0.999
}

fn default_window_minutes() -> u64 {
    30 * 24 * 60
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            slo_target: default_slo_target(),
            window_minutes: default_window_minutes(),
            observed_error_rate: 0.0,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Write to this file instead of stdout
    pub path: Option<PathBuf>,
}

/// Output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

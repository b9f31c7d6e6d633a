//! CLI argument parsing using clap
//!
//! Options that also exist in the TOML file are `Option`s so that only flags
//! the user actually passed override the file.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Calculator to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Shard distribution of a synthetic dataset (default)
    Distribution,
    /// Blended error rate of a canary traffic split
    Rollout,
    /// SLO error budget consumption
    Budget,
}

/// Pseudo-random generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorArg {
    /// Linear congruential generator
    Lcg,
    /// xoshiro256++
    Xoshiro,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Human-readable bar chart
    Text,
    /// JSON report
    Json,
    /// CSV rows
    Csv,
}

/// keyspread - deterministic shard distribution and skew calculator
#[derive(Parser, Debug, Default)]
#[command(name = "keyspread")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Calculator to run: distribution, rollout, or budget
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // === Distribution Options ===
    /// Seed for the synthetic dataset
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dataset shape: uniform, hotKeys, or regionalSkew
    #[arg(long)]
    pub shape: Option<String>,

    /// Partition key: userId, region, or timestamp
    #[arg(short = 'k', long)]
    pub key: Option<String>,

    /// Number of buckets (shards)
    #[arg(short = 'b', long)]
    pub buckets: Option<usize>,

    /// Number of synthetic records
    #[arg(short = 'n', long)]
    pub size: Option<usize>,

    /// Pseudo-random generator
    #[arg(long, value_enum)]
    pub generator: Option<GeneratorArg>,

    /// Comma-separated region list; the first one is the home region
    #[arg(long)]
    pub regions: Option<String>,

    /// Max/min ratio at or below which skew is Low
    #[arg(long)]
    pub low_ratio: Option<f64>,

    /// Max/min ratio at or below which skew is Medium
    #[arg(long)]
    pub medium_ratio: Option<f64>,

    /// Compute every bucket count from 2 to 8
    #[arg(long)]
    pub sweep: bool,

    /// Compute N successive seeds starting at --seed
    #[arg(long, value_name = "N")]
    pub regenerate: Option<u32>,

    /// Bucket records from a JSON dataset file instead of generating them
    #[arg(long, value_name = "PATH")]
    pub records: Option<PathBuf>,

    /// Write the generated dataset to a JSON file
    #[arg(long, value_name = "PATH")]
    pub dump_records: Option<PathBuf>,

    // === Rollout Options ===
    /// Error rate of the stable release (e.g. 0.1% or 0.001)
    #[arg(long)]
    pub stable_error: Option<String>,

    /// Error rate of the canary release (e.g. 2% or 0.02)
    #[arg(long)]
    pub canary_error: Option<String>,

    /// Share of traffic sent to the canary (e.g. 10 or 10%)
    #[arg(long)]
    pub canary_percent: Option<String>,

    // === Budget Options ===
    /// Availability target (e.g. 99.9% or 0.999)
    #[arg(long)]
    pub slo: Option<String>,

    /// Budget window (e.g. 30d, 12h, 90m)
    #[arg(long)]
    pub window: Option<String>,

    /// Observed error rate (e.g. 0.05% or 0.0005)
    #[arg(long)]
    pub observed_error: Option<String>,

    // === Output Options ===
    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<FormatArg>,

    /// Write output to a file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Dry run - validate configuration without computing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long, env = "KEYSPREAD_DEBUG")]
    pub debug: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments that do not depend on the config file
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.buckets == Some(0) {
            anyhow::bail!("buckets must be at least 1");
        }

        if self.size == Some(0) {
            anyhow::bail!("size must be at least 1");
        }

        if self.regenerate == Some(0) {
            anyhow::bail!("regenerate must be at least 1");
        }

        if self.records.is_some() && self.dump_records.is_some() {
            anyhow::bail!("--records and --dump-records cannot be combined");
        }

        if self.records.is_some() && self.regenerate.map_or(false, |n| n > 1) {
            anyhow::bail!("--regenerate has no effect on records loaded with --records");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_distribution_flags() {
        let cli = Cli::try_parse_from([
            "keyspread", "--seed", "3", "--shape", "hotKeys", "-k", "region", "-b", "6",
            "--generator", "xoshiro", "--sweep",
        ])
        .unwrap();

        assert_eq!(cli.seed, Some(3));
        assert_eq!(cli.shape.as_deref(), Some("hotKeys"));
        assert_eq!(cli.key.as_deref(), Some("region"));
        assert_eq!(cli.buckets, Some(6));
        assert_eq!(cli.generator, Some(GeneratorArg::Xoshiro));
        assert!(cli.sweep);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_buckets() {
        let cli = Cli::try_parse_from(["keyspread", "-b", "0"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_records_with_dump() {
        let cli = Cli::try_parse_from([
            "keyspread", "--records", "a.json", "--dump-records", "b.json",
        ])
        .unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_parse_mode_and_format() {
        let cli = Cli::try_parse_from(["keyspread", "--mode", "budget", "-f", "json"]).unwrap();
        assert_eq!(cli.mode, Some(ModeArg::Budget));
        assert_eq!(cli.format, Some(FormatArg::Json));
    }
}

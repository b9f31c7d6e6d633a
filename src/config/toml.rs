//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Load the config file named on the command line (if any) and apply CLI overrides
pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => Config::default(),
    };

    merge_cli_with_config(cli, config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    if let Some(mode) = cli.mode {
        config.mode = convert_mode(mode);
    }

    // Override distribution settings
    let dist = &mut config.distribution;
    if let Some(seed) = cli.seed {
        dist.seed = seed;
    }
    if let Some(ref shape) = cli.shape {
        dist.shape = parse_shape(shape).context("Invalid --shape")?;
    }
    if let Some(ref key) = cli.key {
        dist.key = parse_key(key).context("Invalid --key")?;
    }
    if let Some(buckets) = cli.buckets {
        dist.bucket_count = buckets;
    }
    if let Some(size) = cli.size {
        dist.size = size;
    }
    if let Some(generator) = cli.generator {
        dist.generator = convert_generator(generator);
    }
    if let Some(ref regions) = cli.regions {
        dist.regions = parse_regions(regions)?;
    }
    if let Some(low) = cli.low_ratio {
        dist.thresholds.low = low;
    }
    if let Some(medium) = cli.medium_ratio {
        dist.thresholds.medium = medium;
    }

    // Override run settings
    if cli.sweep {
        config.run.sweep = true;
    }
    if let Some(n) = cli.regenerate {
        config.run.regenerate = n;
    }
    if let Some(ref path) = cli.records {
        config.run.records = Some(path.clone());
    }
    if let Some(ref path) = cli.dump_records {
        config.run.dump_records = Some(path.clone());
    }

    // Override rollout settings
    if let Some(ref rate) = cli.stable_error {
        config.rollout.stable_error_rate = parse_rate(rate).context("Invalid --stable-error")?;
    }
    if let Some(ref rate) = cli.canary_error {
        config.rollout.canary_error_rate = parse_rate(rate).context("Invalid --canary-error")?;
    }
    if let Some(ref pct) = cli.canary_percent {
        config.rollout.canary_percent = parse_percent(pct).context("Invalid --canary-percent")?;
    }

    // Override budget settings
    if let Some(ref slo) = cli.slo {
        config.budget.slo_target = parse_rate(slo).context("Invalid --slo")?;
    }
    if let Some(ref window) = cli.window {
        config.budget.window_minutes = parse_window_minutes(window).context("Invalid --window")?;
    }
    if let Some(ref rate) = cli.observed_error {
        config.budget.observed_error_rate = parse_rate(rate).context("Invalid --observed-error")?;
    }

    // Override output settings
    if let Some(format) = cli.format {
        config.output.format = convert_format(format);
    }
    if let Some(ref path) = cli.output {
        config.output.path = Some(path.clone());
    }

    Ok(config)
}

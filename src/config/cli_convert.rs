//! CLI to Config conversion utilities

use crate::config::cli;
use crate::config::{Mode, OutputFormat};
use crate::dataset::{RegionSet, Shape};
use crate::generator::GeneratorKind;
use crate::partition::PartitionKey;
use anyhow::{Context, Result};

/// Parse a comma-separated region list (e.g. "us-east, eu-west")
pub fn parse_regions(s: &str) -> Result<RegionSet> {
    let names: Vec<String> = s
        .split(',')
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();

    RegionSet::new(names).with_context(|| format!("Invalid region list: {}", s))
}

/// Parse a shape selector
pub fn parse_shape(s: &str) -> Result<Shape> {
    Ok(s.parse::<Shape>()?)
}

/// Parse a partition-key selector
pub fn parse_key(s: &str) -> Result<PartitionKey> {
    Ok(s.parse::<PartitionKey>()?)
}

/// Parse a percentage (e.g. "10", "10%", "12.5%") to a number in percent
pub fn parse_percent(s: &str) -> Result<f64> {
    let s = s.trim();
    let num_str = s.strip_suffix('%').unwrap_or(s).trim();

    num_str.parse::<f64>()
        .with_context(|| format!("Invalid percentage format: {}", s))
}

/// Parse a rate (e.g. "0.001" or "0.1%") to a fraction
pub fn parse_rate(s: &str) -> Result<f64> {
    let s = s.trim();

    if let Some(pct) = s.strip_suffix('%') {
        let value: f64 = pct.trim().parse()
            .with_context(|| format!("Invalid rate format: {}", s))?;
        Ok(value / 100.0)
    } else {
        s.parse::<f64>()
            .with_context(|| format!("Invalid rate format: {}", s))
    }
}

/// Parse a window string (e.g. "30d", "12h", "90m") to minutes
pub fn parse_window_minutes(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase();

    let (num_str, multiplier) = if s.ends_with('d') {
        (s.trim_end_matches('d'), 24 * 60u64)
    } else if s.ends_with('h') {
        (s.trim_end_matches('h'), 60)
    } else if s.ends_with("min") || s.ends_with('m') {
        (s.trim_end_matches("min").trim_end_matches('m'), 1)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str.parse()
        .with_context(|| format!("Invalid window format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Window too large: {}", s))
}

/// Convert CLI ModeArg to config Mode
pub fn convert_mode(arg: cli::ModeArg) -> Mode {
    match arg {
        cli::ModeArg::Distribution => Mode::Distribution,
        cli::ModeArg::Rollout => Mode::Rollout,
        cli::ModeArg::Budget => Mode::Budget,
    }
}

/// Convert CLI GeneratorArg to GeneratorKind
pub fn convert_generator(arg: cli::GeneratorArg) -> GeneratorKind {
    match arg {
        cli::GeneratorArg::Lcg => GeneratorKind::Lcg,
        cli::GeneratorArg::Xoshiro => GeneratorKind::Xoshiro,
    }
}

/// Convert CLI FormatArg to OutputFormat
pub fn convert_format(arg: cli::FormatArg) -> OutputFormat {
    match arg {
        cli::FormatArg::Text => OutputFormat::Text,
        cli::FormatArg::Json => OutputFormat::Json,
        cli::FormatArg::Csv => OutputFormat::Csv,
    }
}

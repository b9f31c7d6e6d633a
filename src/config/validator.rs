//! Configuration validation

use super::*;
use crate::partition::PartitionKey;
use crate::pipeline::{default_bucket_count, DistributionConfig};
use crate::rollout::{ErrorBudget, TrafficSplit};
use anyhow::{Context, Result};
use tracing::warn;

/// Largest dataset accepted from configuration
pub const MAX_SIZE: usize = 1_000_000;
/// Largest bucket count accepted from configuration
pub const MAX_BUCKETS: usize = 4096;
/// Most successive seeds a single run may regenerate
pub const MAX_REGENERATE: u32 = 1000;

/// Validate complete configuration
///
/// Only the section for the selected mode is checked, so an unused section
/// with odd values does not block a run.
pub fn validate_config(config: &Config) -> Result<()> {
    match config.mode {
        Mode::Distribution => {
            validate_distribution(&config.distribution)?;
            validate_run(&config.run, &config.distribution)?;
        }
        Mode::Rollout => validate_rollout(&config.rollout)?,
        Mode::Budget => validate_budget(&config.budget)?,
    }

    validate_output(&config.output)?;

    Ok(())
}

/// Validate distribution configuration
pub fn validate_distribution(dist: &DistributionConfig) -> Result<()> {
    if dist.bucket_count == 0 || dist.bucket_count > MAX_BUCKETS {
        anyhow::bail!(
            "bucket_count must be between 1 and {}, got {}",
            MAX_BUCKETS,
            dist.bucket_count
        );
    }

    if dist.size == 0 || dist.size > MAX_SIZE {
        anyhow::bail!("size must be between 1 and {}, got {}", MAX_SIZE, dist.size);
    }

    dist.thresholds.validate().context("Invalid skew thresholds")?;

    if dist.key == PartitionKey::Region && dist.bucket_count > dist.regions.len() {
        warn!(
            "bucket_count ({}) exceeds the number of regions ({}); {} bucket(s) will stay empty",
            dist.bucket_count,
            dist.regions.len(),
            dist.bucket_count - dist.regions.len()
        );
    }

    if dist.size < dist.bucket_count {
        warn!(
            "size ({}) is smaller than bucket_count ({}); some buckets will stay empty",
            dist.size, dist.bucket_count
        );
    }

    Ok(())
}

/// Validate run options
pub fn validate_run(run: &RunConfig, dist: &DistributionConfig) -> Result<()> {
    if run.regenerate == 0 || run.regenerate > MAX_REGENERATE {
        anyhow::bail!(
            "regenerate must be between 1 and {}, got {}",
            MAX_REGENERATE,
            run.regenerate
        );
    }

    if run.records.is_some() && run.dump_records.is_some() {
        anyhow::bail!("records and dump_records cannot both be set");
    }

    if run.records.is_some() && run.regenerate > 1 {
        anyhow::bail!("regenerate cannot be used with a loaded records file");
    }

    if run.sweep && dist.bucket_count != default_bucket_count() {
        warn!(
            "sweep covers {}..={} buckets; non-default bucket_count ({}) is ignored",
            SWEEP_MIN_BUCKETS, SWEEP_MAX_BUCKETS, dist.bucket_count
        );
    }

    Ok(())
}

/// Validate rollout configuration
pub fn validate_rollout(rollout: &TrafficSplit) -> Result<()> {
    rollout.evaluate().context("Invalid rollout configuration")?;

    if rollout.canary_percent > 50.0 {
        warn!(
            "canary receives {}% of traffic, more than the stable release",
            rollout.canary_percent
        );
    }

    Ok(())
}

/// Validate budget configuration
pub fn validate_budget(budget: &BudgetConfig) -> Result<()> {
    let eb = ErrorBudget::new(budget.slo_target, budget.window_minutes)
        .context("Invalid budget configuration")?;
    eb.evaluate(budget.observed_error_rate)
        .context("Invalid budget configuration")?;

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if let Some(ref path) = output.path {
        if path.as_os_str().is_empty() {
            anyhow::bail!("output path must not be empty");
        }
    }

    Ok(())
}

//! Run orchestration
//!
//! Turns a validated [`Config`] into a [`Report`]: builds or loads datasets,
//! expands sweeps and regenerated seeds, and evaluates the sibling
//! calculators.

use crate::config::{Config, Mode, RunConfig, SWEEP_MAX_BUCKETS, SWEEP_MIN_BUCKETS};
use crate::dataset::io::{load_dataset, save_dataset};
use crate::output::Report;
use crate::pipeline::{compute_for_dataset, DatasetCache, DistributionConfig};
use crate::rollout::ErrorBudget;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Compute the report for the configured mode
pub fn build_report(config: &Config) -> Result<Report> {
    debug!(mode = %config.mode, "building report");

    match config.mode {
        Mode::Distribution => distribution_report(&config.distribution, &config.run),
        Mode::Rollout => {
            let outcome = config.rollout.evaluate().context("Rollout calculation failed")?;
            Ok(Report::Rollout {
                split: config.rollout,
                outcome,
            })
        }
        Mode::Budget => {
            let budget = ErrorBudget::new(config.budget.slo_target, config.budget.window_minutes)
                .context("Budget calculation failed")?;
            let status = budget
                .evaluate(config.budget.observed_error_rate)
                .context("Budget calculation failed")?;
            Ok(Report::Budget {
                budget,
                observed_error_rate: config.budget.observed_error_rate,
                status,
            })
        }
    }
}

/// Bucket counts covered by one seed
fn bucket_counts(run: &RunConfig, dist: &DistributionConfig) -> Vec<usize> {
    if run.sweep {
        (SWEEP_MIN_BUCKETS..=SWEEP_MAX_BUCKETS).collect()
    } else {
        vec![dist.bucket_count]
    }
}

fn distribution_report(dist: &DistributionConfig, run: &RunConfig) -> Result<Report> {
    let counts = bucket_counts(run, dist);

    if let Some(ref path) = run.records {
        let dataset = load_dataset(path)?;
        info!(path = %path.display(), records = dataset.len(), "loaded dataset");

        let runs = counts
            .iter()
            .map(|&n| compute_for_dataset(&dist.with_bucket_count(n), &dataset))
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to bucket records from {}", path.display()))?;
        return Ok(Report::Distribution(runs));
    }

    let mut cache = DatasetCache::new();
    let mut runs = Vec::new();
    let mut current = dist.clone();

    for _ in 0..run.regenerate {
        for &n in &counts {
            let result = cache
                .compute(&current.with_bucket_count(n))
                .with_context(|| format!("Distribution failed for seed {}", current.seed))?;
            runs.push(result);
        }
        current = current.regenerate();
    }

    debug!(
        runs = runs.len(),
        datasets = cache.len(),
        cache_hits = cache.hits(),
        "distribution runs complete"
    );

    if let Some(ref path) = run.dump_records {
        let dataset = cache.dataset(dist)?;
        save_dataset(&dataset, path)?;
    }

    Ok(Report::Distribution(runs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::io::parse_dataset;
    use crate::dataset::Shape;
    use crate::error::Error;
    use crate::partition::PartitionKey;
    use std::fs;
    use tempfile::TempDir;

    fn runs(report: Report) -> Vec<crate::pipeline::DistributionResult> {
        match report {
            Report::Distribution(runs) => runs,
            other => panic!("expected distribution report, got {:?}", other),
        }
    }

    #[test]
    fn test_single_run() {
        let report = build_report(&Config::default()).unwrap();
        let runs = runs(report);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].buckets, vec![60, 60, 60, 60]);
    }

    #[test]
    fn test_sweep_and_regenerate() {
        let mut config = Config::default();
        config.distribution.shape = Shape::HotKeys;
        config.run.sweep = true;
        config.run.regenerate = 3;

        let runs = runs(build_report(&config).unwrap());
        assert_eq!(runs.len(), 3 * 7);
        assert_eq!(runs[0].config.seed, 1);
        assert_eq!(runs[0].config.bucket_count, 2);
        assert_eq!(runs[6].config.bucket_count, 8);
        assert_eq!(runs[7].config.seed, 2);
        assert_eq!(runs[20].config.seed, 3);

        for r in &runs {
            assert_eq!(r.buckets.iter().sum::<u64>(), 240);
        }
    }

    #[test]
    fn test_dump_then_load_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");

        let mut config = Config::default();
        config.distribution.shape = Shape::RegionalSkew;
        config.distribution.key = PartitionKey::Region;
        config.run.dump_records = Some(path.clone());
        let generated = runs(build_report(&config).unwrap());

        let mut config = Config::default();
        config.distribution.key = PartitionKey::Region;
        config.run.records = Some(path.clone());
        let loaded = runs(build_report(&config).unwrap());

        assert_eq!(generated[0].buckets, loaded[0].buckets);
        assert_eq!(loaded[0].config.shape, Shape::RegionalSkew);
    }

    #[test]
    fn test_loaded_records_with_unknown_region() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        fs::write(
            &path,
            r#"{
                "seed": 0,
                "shape": "uniform",
                "records": [
                    {"id": 0, "user_id": 1, "region": "us-east", "timestamp_ms": 0},
                    {"id": 1, "user_id": 2, "region": "atlantis", "timestamp_ms": 0}
                ]
            }"#,
        )
        .unwrap();
        assert!(parse_dataset(&fs::read_to_string(&path).unwrap()).is_ok());

        let mut config = Config::default();
        config.distribution.key = PartitionKey::Region;
        config.run.records = Some(path);

        let err = build_report(&config).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::UnknownRegion("atlantis".to_string()))
        );
    }

    #[test]
    fn test_budget_mode() {
        let mut config = Config::default();
        config.mode = Mode::Budget;
        config.budget.observed_error_rate = 0.0005;

        match build_report(&config).unwrap() {
            Report::Budget { status, .. } => {
                assert!((status.burn_rate - 0.5).abs() < 1e-6);
                assert!(!status.exhausted);
            }
            other => panic!("expected budget report, got {:?}", other),
        }
    }

    #[test]
    fn test_rollout_mode_invalid() {
        let mut config = Config::default();
        config.mode = Mode::Rollout;
        config.rollout.canary_percent = 150.0;
        assert!(build_report(&config).is_err());
    }
}

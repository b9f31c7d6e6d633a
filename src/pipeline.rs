//! Distribution pipeline
//!
//! Ties the calculators together: seed and shape produce a dataset, the
//! dataset is bucketed on a key, and the bucket counts are classified. Every
//! step is a pure function of its inputs and is recomputed from scratch.
//!
//! The seed is an ordinary input. Callers own the "regenerate" action by
//! asking for a config with the next seed.
//!
//! # Example
//!
//! ```
//! use keyspread::pipeline::{compute_distribution, DistributionConfig};
//! use keyspread::skew::SkewLabel;
//!
//! let config = DistributionConfig::default();
//! let result = compute_distribution(&config).unwrap();
//! assert_eq!(result.buckets, vec![60, 60, 60, 60]);
//! assert_eq!(result.skew, SkewLabel::Low);
//! ```

use crate::dataset::{Dataset, DatasetBuilder, RegionSet, Shape, DEFAULT_SIZE};
use crate::error::Result;
use crate::generator::GeneratorKind;
use crate::partition::{distribute, PartitionKey};
use crate::skew::{SkewLabel, SkewReport, SkewThresholds};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Inputs of one distribution computation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistributionConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default = "default_bucket_count")]
    pub bucket_count: usize,
    #[serde(default)]
    pub key: PartitionKey,
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default)]
    pub generator: GeneratorKind,
    #[serde(default)]
    pub regions: RegionSet,
    #[serde(default)]
    pub thresholds: SkewThresholds,
}

fn default_seed() -> u64 {
    1
}

pub(crate) fn default_bucket_count() -> usize {
    4
}

fn default_size() -> usize {
    DEFAULT_SIZE
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            shape: Shape::default(),
            bucket_count: default_bucket_count(),
            key: PartitionKey::default(),
            size: default_size(),
            generator: GeneratorKind::default(),
            regions: RegionSet::default(),
            thresholds: SkewThresholds::default(),
        }
    }
}

impl DistributionConfig {
    /// Same inputs with the next seed
    pub fn regenerate(&self) -> Self {
        Self {
            seed: self.seed.wrapping_add(1),
            ..self.clone()
        }
    }

    /// Same inputs with a different bucket count
    pub fn with_bucket_count(&self, bucket_count: usize) -> Self {
        Self {
            bucket_count,
            ..self.clone()
        }
    }

    fn dataset_key(&self) -> DatasetKey {
        DatasetKey {
            seed: self.seed,
            shape: self.shape,
            size: self.size,
            generator: self.generator,
            regions: self.regions.clone(),
        }
    }

    fn build_dataset(&self) -> Result<Dataset> {
        DatasetBuilder::new(self.seed, self.shape)
            .size(self.size)
            .generator(self.generator)
            .regions(self.regions.clone())
            .build()
    }
}

/// Output of one distribution computation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistributionResult {
    pub config: DistributionConfig,
    pub buckets: Vec<u64>,
    pub skew: SkewLabel,
    pub report: SkewReport,
}

/// Build, bucket and classify
///
/// # Errors
///
/// `InvalidArgument` for a zero size, zero bucket count or invalid thresholds.
pub fn compute_distribution(config: &DistributionConfig) -> Result<DistributionResult> {
    config.thresholds.validate()?;
    let dataset = config.build_dataset()?;
    summarize(config, &dataset)
}

/// Bucket and classify an existing dataset
///
/// Only the bucket count, key and thresholds of `config` are used; the seed,
/// shape and regions are taken from the dataset.
pub fn compute_for_dataset(
    config: &DistributionConfig,
    dataset: &Dataset,
) -> Result<DistributionResult> {
    config.thresholds.validate()?;
    let config = DistributionConfig {
        seed: dataset.seed,
        shape: dataset.shape,
        size: dataset.len(),
        generator: dataset.generator,
        regions: dataset.regions.clone(),
        ..config.clone()
    };
    summarize(&config, dataset)
}

fn summarize(config: &DistributionConfig, dataset: &Dataset) -> Result<DistributionResult> {
    let buckets = distribute(&dataset.records, config.bucket_count, config.key, &dataset.regions)?;
    let report = SkewReport::new(&buckets, &config.thresholds);

    debug!(
        seed = config.seed,
        shape = %config.shape,
        key = %config.key,
        bucket_count = config.bucket_count,
        skew = %report.label,
        "computed distribution"
    );

    Ok(DistributionResult {
        config: config.clone(),
        skew: report.label,
        buckets,
        report,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DatasetKey {
    seed: u64,
    shape: Shape,
    size: usize,
    generator: GeneratorKind,
    regions: RegionSet,
}

/// Memoizes built datasets by the inputs that determine them
///
/// Changing only the bucket count or key reuses the cached dataset. The cache
/// never evicts; it is meant for short sweeps, not long sessions.
#[derive(Debug, Default)]
pub struct DatasetCache {
    datasets: HashMap<DatasetKey, Arc<Dataset>>,
    hits: u64,
    misses: u64,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached dataset for `config`, building it on first use
    pub fn dataset(&mut self, config: &DistributionConfig) -> Result<Arc<Dataset>> {
        let key = config.dataset_key();
        if let Some(ds) = self.datasets.get(&key) {
            self.hits += 1;
            return Ok(Arc::clone(ds));
        }

        self.misses += 1;
        let ds = Arc::new(config.build_dataset()?);
        self.datasets.insert(key, Arc::clone(&ds));
        Ok(ds)
    }

    /// Same as [`compute_distribution`], reusing cached datasets
    pub fn compute(&mut self, config: &DistributionConfig) -> Result<DistributionResult> {
        config.thresholds.validate()?;
        let dataset = self.dataset(config)?;
        summarize(config, &dataset)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

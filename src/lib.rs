//! keyspread - deterministic shard distribution and skew calculator
//!
//! keyspread reproduces the small "config in, derived view out" calculators
//! used to teach partitioning: a seeded synthetic dataset is bucketed on a
//! partition key and the resulting spread is classified by skew.
//!
//! # Architecture
//!
//! - **Generators**: seeded LCG (default) and xoshiro256++ sources in `[0, 1)`
//! - **Datasets**: uniform, hot-key and regional-skew record batches
//! - **Partitioning**: user id, region and timestamp bucketing
//! - **Skew**: Low / Medium / High labels from the max/min bucket ratio
//! - **Rollout**: canary traffic split and SLO error budget calculators
//!
//! # Example
//!
//! ```
//! use keyspread::pipeline::{compute_distribution, DistributionConfig};
//! use keyspread::dataset::Shape;
//! use keyspread::skew::SkewLabel;
//!
//! let config = DistributionConfig { shape: Shape::HotKeys, ..Default::default() };
//! let result = compute_distribution(&config).unwrap();
//! assert!(result.skew >= SkewLabel::Medium);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod output;
pub mod partition;
pub mod pipeline;
pub mod rollout;
pub mod run;
pub mod skew;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{compute_distribution, DistributionConfig, DistributionResult};

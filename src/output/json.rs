//! JSON output formatting
//!
//! Reports carry the tool version and a generation timestamp alongside the
//! calculator result. Distribution runs list every bucket with its share.

use super::Report;
use crate::pipeline::DistributionResult;
use crate::rollout::{BudgetStatus, SplitOutcome, TrafficSplit};
use crate::skew::SkewLabel;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One bucket of a distribution run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonBucket {
    pub index: usize,
    pub count: u64,
    pub percent: f64,
}

/// One distribution run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRun {
    pub seed: u64,
    pub shape: String,
    pub key: String,
    pub generator: String,
    pub size: usize,
    pub bucket_count: usize,
    pub regions: Vec<String>,
    pub buckets: Vec<JsonBucket>,
    pub skew: SkewLabel,
    /// Max/min ratio; absent when a bucket is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub stddev: f64,
}

impl From<&DistributionResult> for JsonRun {
    fn from(run: &DistributionResult) -> Self {
        let config = &run.config;
        let report = &run.report;

        Self {
            seed: config.seed,
            shape: config.shape.to_string(),
            key: config.key.to_string(),
            generator: config.generator.to_string(),
            size: config.size,
            bucket_count: config.bucket_count,
            regions: config.regions.names().to_vec(),
            buckets: run
                .buckets
                .iter()
                .enumerate()
                .map(|(index, &count)| JsonBucket {
                    index,
                    count,
                    percent: report.share(count),
                })
                .collect(),
            skew: report.label,
            ratio: report.ratio,
            min: report.min,
            max: report.max,
            mean: report.mean,
            stddev: report.stddev,
        }
    }
}

/// SLO budget section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonBudget {
    pub slo_target: f64,
    pub window_minutes: u64,
    pub observed_error_rate: f64,
    pub status: BudgetStatus,
}

/// Rollout section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRollout {
    pub split: TrafficSplit,
    pub outcome: SplitOutcome,
}

/// Top-level report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    /// RFC 3339 generation time
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<Vec<JsonRun>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollout: Option<JsonRollout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<JsonBudget>,
}

impl JsonReport {
    pub fn from_report(report: &Report) -> Self {
        let mut json = Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            runs: None,
            rollout: None,
            budget: None,
        };

        match report {
            Report::Distribution(runs) => {
                json.runs = Some(runs.iter().map(JsonRun::from).collect());
            }
            Report::Rollout { split, outcome } => {
                json.rollout = Some(JsonRollout {
                    split: *split,
                    outcome: *outcome,
                });
            }
            Report::Budget {
                budget,
                observed_error_rate,
                status,
            } => {
                json.budget = Some(JsonBudget {
                    slo_target: budget.slo_target(),
                    window_minutes: budget.window_minutes(),
                    observed_error_rate: *observed_error_rate,
                    status: *status,
                });
            }
        }

        json
    }
}

/// Render a report as pretty-printed JSON
pub fn write_report(report: &Report, out: &mut dyn Write) -> Result<()> {
    let json = JsonReport::from_report(report);
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Shape;
    use crate::pipeline::{compute_distribution, DistributionConfig};
    use crate::rollout::ErrorBudget;
    use serde_json::Value;

    fn render(report: &Report) -> Value {
        let mut buf = Vec::new();
        write_report(report, &mut buf).unwrap();
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn test_distribution_json() {
        let config = DistributionConfig {
            shape: Shape::HotKeys,
            ..Default::default()
        };
        let result = compute_distribution(&config).unwrap();
        let value = render(&Report::Distribution(vec![result.clone()]));

        let run = &value["runs"][0];
        assert_eq!(run["shape"], "hotKeys");
        assert_eq!(run["key"], "userId");
        assert_eq!(run["bucket_count"], 4);
        assert_eq!(run["buckets"].as_array().unwrap().len(), 4);
        assert_eq!(run["skew"], result.skew.to_string());
        assert!(value.get("rollout").is_none());
        assert!(value["generated_at"].as_str().is_some());

        let total: u64 = run["buckets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["count"].as_u64().unwrap())
            .sum();
        assert_eq!(total, 240);
    }

    #[test]
    fn test_ratio_omitted_for_empty_bucket() {
        let config = DistributionConfig {
            key: crate::partition::PartitionKey::Region,
            bucket_count: 5,
            ..Default::default()
        };
        let result = compute_distribution(&config).unwrap();
        let value = render(&Report::Distribution(vec![result]));
        assert!(value["runs"][0].get("ratio").is_none());
        assert_eq!(value["runs"][0]["skew"], "High");
    }

    #[test]
    fn test_budget_json() {
        let budget = ErrorBudget::new(0.99, 1000).unwrap();
        let status = budget.evaluate(0.005).unwrap();
        let value = render(&Report::Budget {
            budget,
            observed_error_rate: 0.005,
            status,
        });

        assert_eq!(value["budget"]["window_minutes"], 1000);
        assert_eq!(value["budget"]["status"]["exhausted"], false);
        assert!(value.get("runs").is_none());
    }
}

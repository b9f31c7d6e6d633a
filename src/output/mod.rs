//! Result rendering
//!
//! Every calculator result is wrapped in a [`Report`] and rendered as text,
//! JSON or CSV, either to stdout or to the configured output file.

pub mod csv;
pub mod json;
pub mod text;

use crate::config::{OutputConfig, OutputFormat};
use crate::pipeline::DistributionResult;
use crate::rollout::{BudgetStatus, ErrorBudget, SplitOutcome, TrafficSplit};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::info;

/// A rendered-ready calculator result
#[derive(Debug, Clone)]
pub enum Report {
    /// One or more distribution runs (several for sweeps and regenerations)
    Distribution(Vec<DistributionResult>),
    Rollout {
        split: TrafficSplit,
        outcome: SplitOutcome,
    },
    Budget {
        budget: ErrorBudget,
        observed_error_rate: f64,
        status: BudgetStatus,
    },
}

/// Render `report` in `format` to `out`
pub fn write_report(report: &Report, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Text => text::write_report(report, out)?,
        OutputFormat::Json => json::write_report(report, out)?,
        OutputFormat::Csv => csv::write_report(report, out)?,
    }
    out.flush()?;
    Ok(())
}

/// Render `report` to the configured destination
pub fn emit(report: &Report, output: &OutputConfig) -> Result<()> {
    match output.path {
        Some(ref path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_report(report, output.format, &mut writer)?;
            info!(path = %path.display(), format = %output.format, "wrote report");
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_report(report, output.format, &mut lock)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{compute_distribution, DistributionConfig};
    use tempfile::TempDir;

    #[test]
    fn test_emit_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");
        let result = compute_distribution(&DistributionConfig::default()).unwrap();

        let output = OutputConfig {
            format: OutputFormat::Csv,
            path: Some(path.clone()),
        };
        emit(&Report::Distribution(vec![result]), &output).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 5);
    }

    #[test]
    fn test_emit_bad_path() {
        let result = compute_distribution(&DistributionConfig::default()).unwrap();
        let output = OutputConfig {
            format: OutputFormat::Text,
            path: Some("/nonexistent/dir/report.txt".into()),
        };
        assert!(emit(&Report::Distribution(vec![result]), &output).is_err());
    }
}

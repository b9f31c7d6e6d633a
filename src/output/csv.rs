//! CSV output formatting
//!
//! Distribution runs produce one row per bucket, so sweeps and regenerated
//! seeds stack into a single table that loads directly into pandas or a
//! spreadsheet.

use super::Report;
use std::io::{self, Write};

/// Header for distribution rows
pub const DISTRIBUTION_HEADER: &str =
    "seed,shape,key,generator,size,bucket_count,bucket,count,percent,skew";

/// Render a report as CSV
pub fn write_report(report: &Report, out: &mut dyn Write) -> io::Result<()> {
    match report {
        Report::Distribution(runs) => {
            writeln!(out, "{}", DISTRIBUTION_HEADER)?;
            for run in runs {
                let config = &run.config;
                for (i, &count) in run.buckets.iter().enumerate() {
                    writeln!(
                        out,
                        "{},{},{},{},{},{},{},{},{:.4},{}",
                        config.seed,
                        config.shape,
                        config.key,
                        config.generator,
                        config.size,
                        config.bucket_count,
                        i,
                        count,
                        run.report.share(count),
                        run.report.label
                    )?;
                }
            }
        }
        Report::Rollout { split, outcome } => {
            writeln!(
                out,
                "stable_percent,canary_percent,stable_error_rate,canary_error_rate,blended_error_rate,canary_impact"
            )?;
            writeln!(
                out,
                "{:.4},{:.4},{:.6},{:.6},{:.6},{:.6}",
                outcome.stable_percent,
                outcome.canary_percent,
                split.stable_error_rate,
                split.canary_error_rate,
                outcome.blended_error_rate,
                outcome.canary_impact
            )?;
        }
        Report::Budget {
            budget,
            observed_error_rate,
            status,
        } => {
            writeln!(
                out,
                "slo_target,window_minutes,observed_error_rate,allowed_minutes,consumed_minutes,remaining_minutes,burn_rate,exhausted"
            )?;
            writeln!(
                out,
                "{},{},{:.6},{:.4},{:.4},{:.4},{:.4},{}",
                budget.slo_target(),
                budget.window_minutes(),
                observed_error_rate,
                status.allowed_minutes,
                status.consumed_minutes,
                status.remaining_minutes,
                status.burn_rate,
                status.exhausted
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{compute_distribution, DistributionConfig};
    use crate::rollout::TrafficSplit;

    fn render(report: &Report) -> String {
        let mut buf = Vec::new();
        write_report(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_distribution_csv() {
        let base = DistributionConfig::default();
        let runs = vec![
            compute_distribution(&base).unwrap(),
            compute_distribution(&base.with_bucket_count(2)).unwrap(),
        ];
        let csv = render(&Report::Distribution(runs));
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], DISTRIBUTION_HEADER);
        assert_eq!(lines.len(), 1 + 4 + 2);
        assert_eq!(lines[1], "1,uniform,userId,lcg,240,4,0,60,25.0000,Low");
        assert_eq!(lines[6], "1,uniform,userId,lcg,240,2,1,120,50.0000,Low");
    }

    #[test]
    fn test_rollout_csv() {
        let split = TrafficSplit::default();
        let outcome = split.evaluate().unwrap();
        let csv = render(&Report::Rollout { split, outcome });
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("90.0000,10.0000,"));
    }
}

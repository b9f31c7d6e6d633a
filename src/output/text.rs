//! Human-readable text output

use super::Report;
use crate::pipeline::DistributionResult;
use crate::rollout::{BudgetStatus, ErrorBudget, SplitOutcome, TrafficSplit};
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════";
/// Width of the longest bar
const BAR_WIDTH: usize = 50;

/// Render a report as text
pub fn write_report(report: &Report, out: &mut dyn Write) -> io::Result<()> {
    match report {
        Report::Distribution(runs) => {
            for (i, run) in runs.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write_distribution(run, out)?;
            }
            Ok(())
        }
        Report::Rollout { split, outcome } => write_rollout(split, outcome, out),
        Report::Budget {
            budget,
            observed_error_rate,
            status,
        } => write_budget(budget, *observed_error_rate, status, out),
    }
}

fn banner(title: &str, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{:^59}", title)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)
}

/// Print one distribution run
///
/// Displays:
/// - Dataset inputs (shape, size, seed, generator)
/// - One bar per bucket scaled to the fullest bucket
/// - Skew label and summary statistics
pub fn write_distribution(run: &DistributionResult, out: &mut dyn Write) -> io::Result<()> {
    let config = &run.config;
    let report = &run.report;

    banner("SHARD DISTRIBUTION", out)?;

    writeln!(
        out,
        "Dataset:  {} ({} records, seed {}, {})",
        config.shape,
        format_number(config.size as u64),
        config.seed,
        config.generator
    )?;
    writeln!(out, "Key:      {}", config.key)?;
    writeln!(out, "Buckets:  {}", config.bucket_count)?;
    writeln!(out)?;

    let width = (run.buckets.len().saturating_sub(1)).to_string().len();
    for (i, &count) in run.buckets.iter().enumerate() {
        writeln!(
            out,
            "Shard {:>width$} {:bar_width$} {:>8} ({:5.2}%)",
            i,
            bar(count, report.max),
            format_number(count),
            report.share(count),
            width = width,
            bar_width = BAR_WIDTH,
        )?;
    }
    writeln!(out)?;

    match report.ratio {
        Some(ratio) => writeln!(out, "Skew:     {} (max/min {:.2})", report.label, ratio)?,
        None => writeln!(out, "Skew:     {} (empty shard)", report.label)?,
    }
    writeln!(
        out,
        "  Min: {}  Max: {}  Mean: {:.2}  Stddev: {:.2}",
        format_number(report.min),
        format_number(report.max),
        report.mean,
        report.stddev
    )?;

    writeln!(out, "{}", RULE)
}

fn write_rollout(split: &TrafficSplit, outcome: &SplitOutcome, out: &mut dyn Write) -> io::Result<()> {
    banner("CANARY TRAFFIC SPLIT", out)?;

    writeln!(out, "Traffic:")?;
    writeln!(
        out,
        "  Stable: {:6.2}%  error rate {}",
        outcome.stable_percent,
        format_rate(split.stable_error_rate)
    )?;
    writeln!(
        out,
        "  Canary: {:6.2}%  error rate {}",
        outcome.canary_percent,
        format_rate(split.canary_error_rate)
    )?;
    writeln!(out)?;
    writeln!(out, "Blended error rate: {}", format_rate(outcome.blended_error_rate))?;
    writeln!(out, "Canary impact:      {:+.4}%", outcome.canary_impact * 100.0)?;

    writeln!(out, "{}", RULE)
}

fn write_budget(
    budget: &ErrorBudget,
    observed_error_rate: f64,
    status: &BudgetStatus,
    out: &mut dyn Write,
) -> io::Result<()> {
    banner("ERROR BUDGET", out)?;

    writeln!(out, "SLO:       {}", format_rate(budget.slo_target()))?;
    writeln!(out, "Window:    {} minutes", format_number(budget.window_minutes()))?;
    writeln!(out, "Observed:  {} errors", format_rate(observed_error_rate))?;
    writeln!(out)?;
    writeln!(out, "Budget:")?;
    writeln!(out, "  Allowed:   {:.2} min", status.allowed_minutes)?;
    writeln!(out, "  Consumed:  {:.2} min", status.consumed_minutes)?;
    writeln!(out, "  Remaining: {:.2} min", status.remaining_minutes)?;
    writeln!(out, "  Burn rate: {:.2}x", status.burn_rate)?;
    if status.exhausted {
        writeln!(out, "  Budget exhausted")?;
    }

    writeln!(out, "{}", RULE)
}

/// Bar of up to [`BAR_WIDTH`] blocks, proportional to `count / max`
fn bar(count: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let len = ((count as f64 / max as f64) * BAR_WIDTH as f64) as usize;
    "█".repeat(len)
}

/// Format a fraction as a percentage
fn format_rate(rate: f64) -> String {
    format!("{:.4}%", rate * 100.0)
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let mut count = 0;

    for c in s.chars().rev() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
        count += 1;
    }

    result.chars().rev().collect()
}

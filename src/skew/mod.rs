//! Skew classification
//!
//! Labels how evenly a bucket-count array is spread by comparing the largest
//! bucket against the smallest one. An empty bucket is the most extreme
//! imbalance there is, so any zero count classifies as `High`.
//!
//! # Example
//!
//! ```
//! use keyspread::skew::{classify, SkewLabel};
//!
//! assert_eq!(classify(&[60, 60, 60, 60]), SkewLabel::Low);
//! assert_eq!(classify(&[80, 50]), SkewLabel::Medium);
//! assert_eq!(classify(&[100, 0, 50]), SkewLabel::High);
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default ratio at or below which a distribution is `Low`
pub const DEFAULT_LOW_RATIO: f64 = 1.25;
/// Default ratio at or below which a distribution is `Medium`
pub const DEFAULT_MEDIUM_RATIO: f64 = 2.0;

/// Evenness label, ordered from least to most severe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkewLabel {
    Low,
    Medium,
    High,
}

impl fmt::Display for SkewLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Max/min ratio cut-offs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SkewThresholds {
    /// Ratios at or below this are `Low`
    #[serde(default = "default_low")]
    pub low: f64,
    /// Ratios at or below this (and above `low`) are `Medium`
    #[serde(default = "default_medium")]
    pub medium: f64,
}

fn default_low() -> f64 {
    DEFAULT_LOW_RATIO
}

fn default_medium() -> f64 {
    DEFAULT_MEDIUM_RATIO
}

impl Default for SkewThresholds {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_RATIO,
            medium: DEFAULT_MEDIUM_RATIO,
        }
    }
}

impl SkewThresholds {
    /// # Errors
    ///
    /// `InvalidArgument` unless `1 <= low <= medium` and both are finite.
    pub fn new(low: f64, medium: f64) -> Result<Self> {
        let t = Self { low, medium };
        t.validate()?;
        Ok(t)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.low.is_finite() || !self.medium.is_finite() {
            return Err(Error::invalid("skew thresholds must be finite"));
        }
        if self.low < 1.0 {
            return Err(Error::invalid(format!(
                "low skew ratio must be at least 1.0, got {}",
                self.low
            )));
        }
        if self.medium < self.low {
            return Err(Error::invalid(format!(
                "medium skew ratio ({}) must not be below low skew ratio ({})",
                self.medium, self.low
            )));
        }
        Ok(())
    }

    /// Label a max/min ratio
    pub fn label(&self, ratio: f64) -> SkewLabel {
        if ratio <= self.low {
            SkewLabel::Low
        } else if ratio <= self.medium {
            SkewLabel::Medium
        } else {
            SkewLabel::High
        }
    }
}

/// Max/min ratio, or `None` if any bucket is zero or there are no buckets
pub fn max_min_ratio(buckets: &[u64]) -> Option<f64> {
    let min = *buckets.iter().min()?;
    if min == 0 {
        return None;
    }
    let max = *buckets.iter().max()?;
    Some(max as f64 / min as f64)
}

/// Classify with the default thresholds
pub fn classify(buckets: &[u64]) -> SkewLabel {
    classify_with(buckets, &SkewThresholds::default())
}

/// Classify with custom thresholds
pub fn classify_with(buckets: &[u64], thresholds: &SkewThresholds) -> SkewLabel {
    match max_min_ratio(buckets) {
        Some(ratio) => thresholds.label(ratio),
        None => SkewLabel::High,
    }
}

/// Summary statistics of a bucket-count array
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkewReport {
    pub total: u64,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub stddev: f64,
    /// `None` when some bucket is empty
    pub ratio: Option<f64>,
    pub label: SkewLabel,
}

impl SkewReport {
    pub fn new(buckets: &[u64], thresholds: &SkewThresholds) -> Self {
        let total: u64 = buckets.iter().sum();
        let n = buckets.len().max(1) as f64;
        let mean = total as f64 / n;
        let variance = buckets
            .iter()
            .map(|&c| {
                let d = c as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;

        Self {
            total,
            min: buckets.iter().copied().min().unwrap_or(0),
            max: buckets.iter().copied().max().unwrap_or(0),
            mean,
            stddev: variance.sqrt(),
            ratio: max_min_ratio(buckets),
            label: classify_with(buckets, thresholds),
        }
    }

    /// Percentage of all records in a bucket with `count` records
    pub fn share(&self, count: u64) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        // ratio exactly 1.25 is still Low
        assert_eq!(classify(&[125, 100]), SkewLabel::Low);
        assert_eq!(classify(&[126, 100]), SkewLabel::Medium);
        // ratio exactly 2 is still Medium
        assert_eq!(classify(&[200, 100]), SkewLabel::Medium);
        assert_eq!(classify(&[201, 100]), SkewLabel::High);
    }

    #[test]
    fn test_classify_zero_bucket_is_high() {
        assert_eq!(classify(&[10, 10, 0, 10]), SkewLabel::High);
        assert_eq!(classify(&[0, 0, 0]), SkewLabel::High);
        assert_eq!(classify(&[0]), SkewLabel::High);
    }

    #[test]
    fn test_classify_empty_is_high() {
        assert_eq!(classify(&[]), SkewLabel::High);
    }

    #[test]
    fn test_classify_single_bucket() {
        assert_eq!(classify(&[240]), SkewLabel::Low);
    }

    #[test]
    fn test_label_ordering() {
        assert!(SkewLabel::Low < SkewLabel::Medium);
        assert!(SkewLabel::Medium < SkewLabel::High);
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = SkewThresholds::new(1.05, 1.1).unwrap();
        assert_eq!(classify_with(&[110, 100], &strict), SkewLabel::Medium);
        assert_eq!(classify_with(&[120, 100], &strict), SkewLabel::High);
    }

    #[test]
    fn test_invalid_thresholds() {
        assert!(SkewThresholds::new(0.9, 2.0).is_err());
        assert!(SkewThresholds::new(1.5, 1.2).is_err());
        assert!(SkewThresholds::new(1.5, f64::INFINITY).is_err());
        assert!(SkewThresholds::new(1.5, 1.5).is_ok());
    }

    #[test]
    fn test_report() {
        let report = SkewReport::new(&[30, 60, 90, 60], &SkewThresholds::default());
        assert_eq!(report.total, 240);
        assert_eq!(report.min, 30);
        assert_eq!(report.max, 90);
        assert_eq!(report.mean, 60.0);
        assert_eq!(report.ratio, Some(3.0));
        assert_eq!(report.label, SkewLabel::High);
        assert!((report.stddev - 450f64.sqrt()).abs() < 1e-9);
        assert_eq!(report.share(60), 25.0);
    }

    #[test]
    fn test_report_with_zero_bucket() {
        let report = SkewReport::new(&[0, 5], &SkewThresholds::default());
        assert_eq!(report.ratio, None);
        assert_eq!(report.label, SkewLabel::High);
    }
}

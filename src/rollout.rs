//! Deployment traffic split and SLO error budget calculators
//!
//! Same pattern as the distribution pipeline: a few config values in, a small
//! derived result out, recomputed on demand.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

fn check_rate(name: &str, rate: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(Error::invalid(format!("{} must be in [0, 1], got {}", name, rate)));
    }
    Ok(())
}

/// Error rate seen by users when `canary_percent` of traffic goes to the canary
///
/// `stable * (1 - p/100) + canary * p/100`
pub fn weighted_error_rate(stable_rate: f64, canary_rate: f64, canary_percent: f64) -> Result<f64> {
    check_rate("stable error rate", stable_rate)?;
    check_rate("canary error rate", canary_rate)?;
    if !(0.0..=100.0).contains(&canary_percent) {
        return Err(Error::invalid(format!(
            "canary percent must be in [0, 100], got {}",
            canary_percent
        )));
    }

    let p = canary_percent / 100.0;
    Ok(stable_rate * (1.0 - p) + canary_rate * p)
}

/// Traffic split between a stable release and a canary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrafficSplit {
    pub stable_error_rate: f64,
    pub canary_error_rate: f64,
    pub canary_percent: f64,
}

impl Default for TrafficSplit {
    fn default() -> Self {
        Self {
            stable_error_rate: 0.001,
            canary_error_rate: 0.01,
            canary_percent: 10.0,
        }
    }
}

/// Derived view of a [`TrafficSplit`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SplitOutcome {
    pub stable_percent: f64,
    pub canary_percent: f64,
    pub blended_error_rate: f64,
    /// Extra errors per request caused by the canary
    pub canary_impact: f64,
}

impl TrafficSplit {
    pub fn evaluate(&self) -> Result<SplitOutcome> {
        let blended = weighted_error_rate(
            self.stable_error_rate,
            self.canary_error_rate,
            self.canary_percent,
        )?;

        Ok(SplitOutcome {
            stable_percent: 100.0 - self.canary_percent,
            canary_percent: self.canary_percent,
            blended_error_rate: blended,
            canary_impact: blended - self.stable_error_rate,
        })
    }
}

/// Error budget for an availability SLO over a window
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ErrorBudget {
    slo_target: f64,
    window_minutes: u64,
}

/// Budget consumption at a given observed error rate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetStatus {
    pub allowed_minutes: f64,
    pub consumed_minutes: f64,
    pub remaining_minutes: f64,
    /// Observed error rate divided by the allowed error rate; 1.0 spends the
    /// budget exactly over the window
    pub burn_rate: f64,
    pub exhausted: bool,
}

impl ErrorBudget {
    /// # Errors
    ///
    /// `InvalidArgument` unless `0 < slo_target < 1` and `window_minutes >= 1`.
    pub fn new(slo_target: f64, window_minutes: u64) -> Result<Self> {
        if !(slo_target > 0.0 && slo_target < 1.0) {
            return Err(Error::invalid(format!(
                "slo target must be strictly between 0 and 1, got {}",
                slo_target
            )));
        }
        if window_minutes < 1 {
            return Err(Error::invalid("budget window must be at least one minute"));
        }

        Ok(Self {
            slo_target,
            window_minutes,
        })
    }

    pub fn slo_target(&self) -> f64 {
        self.slo_target
    }

    pub fn window_minutes(&self) -> u64 {
        self.window_minutes
    }

    /// Allowed error rate, `1 - slo`
    pub fn allowed_error_rate(&self) -> f64 {
        1.0 - self.slo_target
    }

    /// Minutes of full outage the window tolerates
    pub fn allowed_minutes(&self) -> f64 {
        self.allowed_error_rate() * self.window_minutes as f64
    }

    pub fn evaluate(&self, observed_error_rate: f64) -> Result<BudgetStatus> {
        check_rate("observed error rate", observed_error_rate)?;

        let allowed = self.allowed_minutes();
        let consumed = observed_error_rate * self.window_minutes as f64;

        Ok(BudgetStatus {
            allowed_minutes: allowed,
            consumed_minutes: consumed,
            remaining_minutes: (allowed - consumed).max(0.0),
            burn_rate: observed_error_rate / self.allowed_error_rate(),
            exhausted: consumed > allowed,
        })
    }
}

//! Zipf rank picker
//!
//! Maps a uniform value in `[0, 1)` to a rank in `[0, n)` following a power
//! law, so a handful of low ranks receive most of the picks. The hot-key
//! dataset shape uses this to concentrate traffic on a few user ids.
//!
//! # Characteristics
//!
//! - Power law: P(k) ∝ 1 / k^theta
//! - Small theta (0.5): More uniform
//! - Large theta (2.0): More skewed
//!
//! Uses inverse transform sampling over a pre-computed CDF, O(log n) per pick.
//!
//! # Example
//!
//! ```
//! use keyspread::generator::{UnitGenerator, lcg::Lcg, zipf::ZipfPicker};
//!
//! let picker = ZipfPicker::new(20, 1.2).unwrap();
//! let mut rng = Lcg::new(1);
//! let rank = picker.pick(rng.next_unit());
//! assert!(rank < 20);
//! ```

use crate::error::{Error, Result};

/// Power-law rank picker over `[0, n)`
#[derive(Debug, Clone)]
pub struct ZipfPicker {
    /// Exponent (range 0.0-3.0)
    theta: f64,

    /// CDF[k] = P(rank <= k)
    cdf: Vec<f64>,
}

impl ZipfPicker {
    /// Build a picker over `n` ranks with exponent `theta`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `n` is 0 or `theta` is outside `[0.0, 3.0]`.
    pub fn new(n: usize, theta: f64) -> Result<Self> {
        if n == 0 {
            return Err(Error::invalid("zipf range must contain at least one rank"));
        }
        if !(0.0..=3.0).contains(&theta) {
            return Err(Error::invalid(format!(
                "zipf theta must be in range [0.0, 3.0], got {}",
                theta
            )));
        }

        // H(n, theta) = sum of i^(-theta) for i=1 to n
        let h_n: f64 = (1..=n).map(|i| (i as f64).powf(-theta)).sum();

        let mut cdf = Vec::with_capacity(n);
        let mut cumulative = 0.0;
        for i in 1..=n {
            cumulative += (i as f64).powf(-theta) / h_n;
            cdf.push(cumulative);
        }

        Ok(Self { theta, cdf })
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Number of ranks
    pub fn len(&self) -> usize {
        self.cdf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cdf.is_empty()
    }

    /// Map `u` in `[0, 1)` to a rank
    pub fn pick(&self, u: f64) -> usize {
        // First rank k where CDF[k] >= u
        let rank = match self.cdf.binary_search_by(|&cdf_val| {
            if cdf_val < u {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Greater
            }
        }) {
            Ok(i) => i,
            Err(i) => i,
        };

        rank.min(self.cdf.len() - 1)
    }
}

//! Linear congruential generator
//!
//! Implements the recurrence `s' = (s * 9301 + 49297) mod 233280` and returns
//! `s' / 233280`. The constants are small enough that the product never
//! overflows a `u64`, and the period is short, which is fine for datasets of a
//! few hundred records.
//!
//! # Example
//!
//! ```
//! use keyspread::generator::{UnitGenerator, lcg::Lcg};
//!
//! let mut rng = Lcg::new(1);
//! assert_eq!(rng.next_unit(), 58598.0 / 233280.0);
//! ```

use super::UnitGenerator;

/// Multiplier
pub const MULTIPLIER: u64 = 9301;
/// Increment
pub const INCREMENT: u64 = 49297;
/// Modulus
pub const MODULUS: u64 = 233280;

/// Seeded linear congruential generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Create a generator; the seed is reduced modulo [`MODULUS`]
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % MODULUS,
        }
    }

    /// Current internal state
    pub fn state(&self) -> u64 {
        self.state
    }
}

impl UnitGenerator for Lcg {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }
}

impl Iterator for Lcg {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_unit())
    }
}

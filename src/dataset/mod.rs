//! Synthetic dataset builder
//!
//! Builds a fixed-size batch of synthetic records from a seed and a workload
//! shape. Records are immutable once built; when the seed or shape changes the
//! whole dataset is rebuilt rather than patched.
//!
//! # Shapes
//!
//! - **Uniform**: user ids stride evenly across the id space, regions round-robin
//! - **HotKeys**: 80% of records hit a small hot id range, the rest a large cold range
//! - **RegionalSkew**: 70% of records land in the home region
//!
//! # Example
//!
//! ```
//! use keyspread::dataset::{build, Shape, DEFAULT_SIZE};
//!
//! let a = build(1, Shape::HotKeys, DEFAULT_SIZE).unwrap();
//! let b = build(1, Shape::HotKeys, DEFAULT_SIZE).unwrap();
//! assert_eq!(a.records.len(), 240);
//! assert_eq!(a.records, b.records);
//! ```

pub mod io;
pub mod region;

pub use region::RegionSet;

use crate::error::{normalize_selector, Error, Result};
use crate::generator::{zipf::ZipfPicker, GeneratorKind, UnitGenerator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Default number of records per dataset
pub const DEFAULT_SIZE: usize = 240;

/// Size of the user id space for uniform and regional shapes
pub const USER_ID_SPACE: u64 = 1000;
/// Stride used to spread uniform user ids
pub const UNIFORM_STRIDE: u64 = 37;

/// Fraction of hot-key records drawn from the hot range
pub const HOT_KEY_SHARE: f64 = 0.8;
/// Hot user ids are in `[0, HOT_KEY_RANGE)`
pub const HOT_KEY_RANGE: usize = 20;
/// Power-law exponent for picking within the hot range
pub const HOT_KEY_THETA: f64 = 1.2;
/// Cold user ids are in `[COLD_KEY_BASE, COLD_KEY_BASE + COLD_KEY_SPAN)`
pub const COLD_KEY_BASE: u64 = 100;
pub const COLD_KEY_SPAN: u64 = 980;

/// Fraction of regional-skew records pinned to the home region (first region)
pub const HOME_REGION_SHARE: f64 = 0.7;

/// Timestamps cycle through one hour of seconds
pub const TIMESTAMP_CYCLE_SECS: u64 = 3600;
/// Seconds between consecutive uniform records
pub const UNIFORM_TICK_SECS: u64 = 15;
/// Epoch millisecond that timestamp offsets are added to
pub const BASE_TIMESTAMP_MS: u64 = 1_700_000_000_000;

/// Workload shape of a synthetic dataset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum Shape {
    #[default]
    Uniform,
    HotKeys,
    RegionalSkew,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Uniform, Shape::HotKeys, Shape::RegionalSkew];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::HotKeys => "hotKeys",
            Self::RegionalSkew => "regionalSkew",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_selector(s).as_str() {
            "uniform" => Ok(Self::Uniform),
            "hotkeys" | "hotkey" => Ok(Self::HotKeys),
            "regionalskew" | "regional" => Ok(Self::RegionalSkew),
            _ => Err(Error::UnknownShape(s.to_string())),
        }
    }
}

impl TryFrom<String> for Shape {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// One synthetic record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SyntheticRecord {
    /// Position within the batch
    pub id: u64,
    pub user_id: u64,
    pub region: String,
    pub timestamp_ms: u64,
}

/// A batch of records together with the inputs that produced it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    pub seed: u64,
    pub shape: Shape,
    #[serde(default)]
    pub generator: GeneratorKind,
    #[serde(default)]
    pub regions: RegionSet,
    pub records: Vec<SyntheticRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Build a dataset with the default region set and the LCG generator
pub fn build(seed: u64, shape: Shape, size: usize) -> Result<Dataset> {
    DatasetBuilder::new(seed, shape).size(size).build()
}

/// Configurable dataset builder
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    seed: u64,
    shape: Shape,
    size: usize,
    generator: GeneratorKind,
    regions: RegionSet,
}

impl DatasetBuilder {
    pub fn new(seed: u64, shape: Shape) -> Self {
        Self {
            seed,
            shape,
            size: DEFAULT_SIZE,
            generator: GeneratorKind::default(),
            regions: RegionSet::default(),
        }
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn generator(mut self, generator: GeneratorKind) -> Self {
        self.generator = generator;
        self
    }

    pub fn regions(mut self, regions: RegionSet) -> Self {
        self.regions = regions;
        self
    }

    /// Produce exactly `size` records
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `size` is 0.
    pub fn build(self) -> Result<Dataset> {
        if self.size < 1 {
            return Err(Error::invalid(format!("size must be at least 1, got {}", self.size)));
        }

        let mut rng = self.generator.build(self.seed);
        let records = match self.shape {
            Shape::Uniform => self.uniform_records(),
            Shape::HotKeys => self.hot_key_records(rng.as_mut())?,
            Shape::RegionalSkew => self.regional_records(rng.as_mut()),
        };

        debug!(
            seed = self.seed,
            shape = %self.shape,
            generator = %self.generator,
            records = records.len(),
            "built synthetic dataset"
        );

        Ok(Dataset {
            seed: self.seed,
            shape: self.shape,
            generator: self.generator,
            regions: self.regions,
            records,
        })
    }

    fn uniform_records(&self) -> Vec<SyntheticRecord> {
        let names = self.regions.names();
        (0..self.size)
            .map(|i| {
                let n = i as u64;
                let offset_secs = (n * UNIFORM_TICK_SECS) % TIMESTAMP_CYCLE_SECS;
                SyntheticRecord {
                    id: n,
                    user_id: (n * UNIFORM_STRIDE) % USER_ID_SPACE,
                    region: names[i % names.len()].clone(),
                    timestamp_ms: timestamp_at(offset_secs),
                }
            })
            .collect()
    }

    fn hot_key_records(&self, rng: &mut dyn UnitGenerator) -> Result<Vec<SyntheticRecord>> {
        let hot = ZipfPicker::new(HOT_KEY_RANGE, HOT_KEY_THETA)?;
        let names = self.regions.names();

        let records = (0..self.size)
            .map(|i| {
                let user_id = if rng.next_unit() < HOT_KEY_SHARE {
                    hot.pick(rng.next_unit()) as u64
                } else {
                    COLD_KEY_BASE + rng.next_index(COLD_KEY_SPAN as usize) as u64
                };
                let region = names[rng.next_index(names.len())].clone();
                let offset_secs = rng.next_index(TIMESTAMP_CYCLE_SECS as usize) as u64;
                SyntheticRecord {
                    id: i as u64,
                    user_id,
                    region,
                    timestamp_ms: timestamp_at(offset_secs),
                }
            })
            .collect();

        Ok(records)
    }

    fn regional_records(&self, rng: &mut dyn UnitGenerator) -> Vec<SyntheticRecord> {
        let names = self.regions.names();

        (0..self.size)
            .map(|i| {
                let user_id = rng.next_index(USER_ID_SPACE as usize) as u64;
                let region = if rng.next_unit() < HOME_REGION_SHARE {
                    self.regions.home().to_string()
                } else {
                    names[rng.next_index(names.len())].clone()
                };
                let offset_secs = rng.next_index(TIMESTAMP_CYCLE_SECS as usize) as u64;
                SyntheticRecord {
                    id: i as u64,
                    user_id,
                    region,
                    timestamp_ms: timestamp_at(offset_secs),
                }
            })
            .collect()
    }
}

fn timestamp_at(offset_secs: u64) -> u64 {
    BASE_TIMESTAMP_MS + offset_secs * 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_exact_size() {
        for shape in Shape::ALL {
            for size in [1, 7, 240, 1000] {
                let ds = build(3, shape, size).unwrap();
                assert_eq!(ds.len(), size, "{} size {}", shape, size);
            }
        }
    }

    #[test]
    fn test_build_zero_size_rejected() {
        let err = build(1, Shape::Uniform, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_uniform_layout() {
        let ds = build(1, Shape::Uniform, DEFAULT_SIZE).unwrap();
        let r = &ds.records[3];
        assert_eq!(r.id, 3);
        assert_eq!(r.user_id, 111);
        assert_eq!(r.region, "ap-south");
        assert_eq!(r.timestamp_ms, BASE_TIMESTAMP_MS + 45_000);

        // Wraps around the id space
        assert_eq!(ds.records[28].user_id, (28 * 37) % 1000);
    }

    #[test]
    fn test_uniform_ignores_seed() {
        let a = build(1, Shape::Uniform, 100).unwrap();
        let b = build(2, Shape::Uniform, 100).unwrap();
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn test_hot_keys_ranges() {
        let ds = build(5, Shape::HotKeys, 2000).unwrap();
        let hot = ds.records.iter().filter(|r| r.user_id < HOT_KEY_RANGE as u64).count();

        for r in &ds.records {
            let in_hot = r.user_id < HOT_KEY_RANGE as u64;
            let in_cold = (COLD_KEY_BASE..COLD_KEY_BASE + COLD_KEY_SPAN).contains(&r.user_id);
            assert!(in_hot || in_cold, "user id {} outside both ranges", r.user_id);
        }

        // Roughly 80% hot
        assert!(hot > 1400 && hot < 1800, "hot count {}", hot);
    }

    #[test]
    fn test_regional_skew_home_share() {
        let ds = build(11, Shape::RegionalSkew, 2000).unwrap();
        let home = ds.records.iter().filter(|r| r.region == "us-east").count();

        // 70% pinned plus a quarter of the remaining 30%
        assert!(home > 1400 && home < 1700, "home count {}", home);
    }

    #[test]
    fn test_seed_changes_hot_keys() {
        let a = build(1, Shape::HotKeys, 240).unwrap();
        let b = build(2, Shape::HotKeys, 240).unwrap();
        assert_ne!(a.records, b.records);
    }

    #[test]
    fn test_builder_custom_regions() {
        let regions = RegionSet::new(vec!["north".to_string(), "south".to_string()]).unwrap();
        let ds = DatasetBuilder::new(4, Shape::RegionalSkew)
            .size(50)
            .regions(regions)
            .generator(GeneratorKind::Xoshiro)
            .build()
            .unwrap();

        assert!(ds.records.iter().all(|r| r.region == "north" || r.region == "south"));
        assert_eq!(ds.generator, GeneratorKind::Xoshiro);
    }

    #[test]
    fn test_regional_skew_custom_home() {
        let regions = RegionSet::new(vec!["south".to_string(), "north".to_string()]).unwrap();
        let ds = DatasetBuilder::new(11, Shape::RegionalSkew)
            .size(2000)
            .regions(regions)
            .build()
            .unwrap();

        // 70% pinned plus half of the remaining 30%
        let home = ds.records.iter().filter(|r| r.region == "south").count();
        assert!(home > 1600 && home < 1800, "home count {}", home);
    }

    #[test]
    fn test_record_ids_sequential() {
        for shape in Shape::ALL {
            let ds = build(2, shape, 300).unwrap();
            for (i, r) in ds.records.iter().enumerate() {
                assert_eq!(r.id, i as u64);
            }
        }
    }

    #[test]
    fn test_timestamps_within_cycle() {
        for shape in Shape::ALL {
            let ds = build(8, shape, 500).unwrap();
            for r in &ds.records {
                assert!(r.timestamp_ms >= BASE_TIMESTAMP_MS);
                assert!(r.timestamp_ms < BASE_TIMESTAMP_MS + TIMESTAMP_CYCLE_SECS * 1000);
            }
        }
    }

    #[test]
    fn test_shape_parse() {
        assert_eq!("uniform".parse::<Shape>().unwrap(), Shape::Uniform);
        assert_eq!("hotKeys".parse::<Shape>().unwrap(), Shape::HotKeys);
        assert_eq!("hot-keys".parse::<Shape>().unwrap(), Shape::HotKeys);
        assert_eq!("regional_skew".parse::<Shape>().unwrap(), Shape::RegionalSkew);
        assert_eq!(
            "zipfian".parse::<Shape>().unwrap_err(),
            Error::UnknownShape("zipfian".to_string())
        );
    }

    #[test]
    fn test_shape_serde() {
        let json = serde_json::to_string(&Shape::RegionalSkew).unwrap();
        assert_eq!(json, "\"regionalSkew\"");

        let back: Shape = serde_json::from_str("\"hot_keys\"").unwrap();
        assert_eq!(back, Shape::HotKeys);

        assert!(serde_json::from_str::<Shape>("\"bursty\"").is_err());
    }
}

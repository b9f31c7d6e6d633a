//! Bucketing calculator
//!
//! Routes every record of a dataset to one of `n` buckets with a deterministic
//! mapping on the chosen partition key, and counts records per bucket.
//!
//! # Keys
//!
//! - **UserId**: `user_id mod n`
//! - **Region**: `index_of(region) mod n`, unknown regions are an error
//! - **Timestamp**: `floor(timestamp_ms / 1000) mod n`
//!
//! The resulting counts always sum to the number of records.
//!
//! # Example
//!
//! ```
//! use keyspread::dataset::{build, Shape};
//! use keyspread::partition::{distribute, PartitionKey};
//!
//! let ds = build(1, Shape::Uniform, 240).unwrap();
//! let buckets = distribute(&ds.records, 4, PartitionKey::UserId, &ds.regions).unwrap();
//! assert_eq!(buckets, vec![60, 60, 60, 60]);
//! ```

use crate::dataset::{RegionSet, SyntheticRecord};
use crate::error::{normalize_selector, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Attribute a record is partitioned on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum PartitionKey {
    #[default]
    UserId,
    Region,
    Timestamp,
}

impl PartitionKey {
    pub const ALL: [PartitionKey; 3] = [
        PartitionKey::UserId,
        PartitionKey::Region,
        PartitionKey::Timestamp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserId => "userId",
            Self::Region => "region",
            Self::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartitionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_selector(s).as_str() {
            "userid" | "user" => Ok(Self::UserId),
            "region" => Ok(Self::Region),
            "timestamp" | "time" => Ok(Self::Timestamp),
            _ => Err(Error::UnknownKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for PartitionKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Maps records to buckets for a fixed bucket count, key and region set
#[derive(Debug, Clone)]
pub struct Partitioner<'a> {
    bucket_count: usize,
    key: PartitionKey,
    regions: &'a RegionSet,
}

impl<'a> Partitioner<'a> {
    /// # Errors
    ///
    /// `InvalidArgument` if `bucket_count` is 0.
    pub fn new(bucket_count: usize, key: PartitionKey, regions: &'a RegionSet) -> Result<Self> {
        if bucket_count < 1 {
            return Err(Error::invalid(format!(
                "bucket_count must be at least 1, got {}",
                bucket_count
            )));
        }

        Ok(Self {
            bucket_count,
            key,
            regions,
        })
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    pub fn key(&self) -> PartitionKey {
        self.key
    }

    /// Bucket index for one record, always in `[0, bucket_count)`
    ///
    /// # Errors
    ///
    /// `UnknownRegion` when partitioning on region and the record's region is
    /// not in the region set.
    #[inline]
    pub fn bucket_of(&self, record: &SyntheticRecord) -> Result<usize> {
        let n = self.bucket_count as u64;
        let index = match self.key {
            PartitionKey::UserId => record.user_id % n,
            PartitionKey::Region => self.regions.index_of(&record.region)? as u64 % n,
            PartitionKey::Timestamp => (record.timestamp_ms / 1000) % n,
        };
        Ok(index as usize)
    }

    /// Count records per bucket
    pub fn distribute(&self, records: &[SyntheticRecord]) -> Result<Vec<u64>> {
        let mut buckets = vec![0u64; self.bucket_count];
        for record in records {
            buckets[self.bucket_of(record)?] += 1;
        }
        Ok(buckets)
    }
}

/// Count records per bucket
///
/// All-or-nothing: an unknown region anywhere in `records` fails the whole
/// computation.
pub fn distribute(
    records: &[SyntheticRecord],
    bucket_count: usize,
    key: PartitionKey,
    regions: &RegionSet,
) -> Result<Vec<u64>> {
    Partitioner::new(bucket_count, key, regions)?.distribute(records)
}

//! Ordered region sets
//!
//! The position of a region in the set is its categorical index, which the
//! region partition key maps onto buckets.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Regions used when none are configured
pub const DEFAULT_REGIONS: [&str; 4] = ["us-east", "us-west", "eu-central", "ap-south"];

/// Non-empty ordered list of unique region names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct RegionSet {
    names: Vec<String>,
}

impl RegionSet {
    /// # Errors
    ///
    /// `InvalidArgument` if the list is empty, contains a blank name, or
    /// contains duplicates.
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(Error::invalid("region set must contain at least one region"));
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.trim().is_empty() {
                return Err(Error::invalid("region names must not be blank"));
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::invalid(format!("duplicate region '{}'", name)));
            }
        }

        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The region that regional skew pins most records to
    pub fn home(&self) -> &str {
        &self.names[0]
    }

    /// Categorical index of `region`
    ///
    /// # Errors
    ///
    /// `UnknownRegion` if the region is not in the set.
    pub fn index_of(&self, region: &str) -> Result<usize> {
        self.names
            .iter()
            .position(|n| n == region)
            .ok_or_else(|| Error::UnknownRegion(region.to_string()))
    }
}

impl Default for RegionSet {
    fn default() -> Self {
        Self {
            names: DEFAULT_REGIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for RegionSet {
    type Error = Error;

    fn try_from(names: Vec<String>) -> Result<Self> {
        Self::new(names)
    }
}

impl From<RegionSet> for Vec<String> {
    fn from(set: RegionSet) -> Self {
        set.names
    }
}

impl fmt::Display for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_regions() {
        let set = RegionSet::default();
        assert_eq!(set.len(), 4);
        assert_eq!(set.home(), "us-east");
        assert_eq!(set.index_of("eu-central").unwrap(), 2);
    }

    #[test]
    fn test_unknown_region() {
        let set = RegionSet::default();
        assert_eq!(
            set.index_of("sa-east").unwrap_err(),
            Error::UnknownRegion("sa-east".to_string())
        );
    }

    #[test]
    fn test_invalid_sets() {
        assert!(RegionSet::new(vec![]).is_err());
        assert!(RegionSet::new(vec!["a".into(), " ".into()]).is_err());
        assert!(RegionSet::new(vec!["a".into(), "b".into(), "a".into()]).is_err());
    }

    #[test]
    fn test_region_set_serde() {
        let set: RegionSet = serde_json::from_str(r#"["x","y"]"#).unwrap();
        assert_eq!(set.to_string(), "x,y");
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["x","y"]"#);
        assert!(serde_json::from_str::<RegionSet>("[]").is_err());
    }
}

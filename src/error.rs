//! Error types for the calculator library
//!
//! Every calculator in this crate is a single-pass, all-or-nothing
//! computation, so errors are returned synchronously to the caller and never
//! recovered internally. The binary wraps these in `anyhow` with context.

use thiserror::Error;

/// Errors returned by the dataset, partition and rollout calculators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A numeric argument was outside its valid range (bucket count, size, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A shape selector did not name a known dataset shape
    #[error("unknown dataset shape '{0}' (expected uniform, hotKeys or regionalSkew)")]
    UnknownShape(String),

    /// A partition-key selector did not name a known key
    #[error("unknown partition key '{0}' (expected userId, region or timestamp)")]
    UnknownKey(String),

    /// A record carried a region that is not part of the region set
    #[error("unknown region '{0}'")]
    UnknownRegion(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type used by the calculator library
pub type Result<T> = std::result::Result<T, Error>;

/// Normalize a selector string for lenient matching
///
/// `hotKeys`, `hot-keys`, `hot_keys` and `HOTKEYS` all normalize to `hotkeys`.
pub(crate) fn normalize_selector(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid("bucket_count must be at least 1, got 0");
        assert_eq!(err.to_string(), "invalid argument: bucket_count must be at least 1, got 0");

        let err = Error::UnknownRegion("mars-north".to_string());
        assert_eq!(err.to_string(), "unknown region 'mars-north'");
    }

    #[test]
    fn test_normalize_selector() {
        assert_eq!(normalize_selector("hotKeys"), "hotkeys");
        assert_eq!(normalize_selector(" hot-keys "), "hotkeys");
        assert_eq!(normalize_selector("REGIONAL_SKEW"), "regionalskew");
    }
}

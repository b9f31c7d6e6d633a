//! Dataset import and export
//!
//! Datasets are exchanged as pretty-printed JSON so a batch can be captured,
//! edited by hand, and bucketed again later.

use super::Dataset;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a dataset from a JSON file
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;

    parse_dataset(&contents)
        .with_context(|| format!("Failed to parse dataset file: {}", path.display()))
}

/// Parse a dataset from a JSON string
pub fn parse_dataset(contents: &str) -> Result<Dataset> {
    let dataset: Dataset = serde_json::from_str(contents)
        .context("Failed to parse dataset JSON")?;

    Ok(dataset)
}

/// Write a dataset to a JSON file
pub fn save_dataset(dataset: &Dataset, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(dataset)
        .context("Failed to serialize dataset")?;

    fs::write(path, json)
        .with_context(|| format!("Failed to write dataset file: {}", path.display()))?;

    info!(path = %path.display(), records = dataset.len(), "wrote dataset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{build, Shape};
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");

        let ds = build(9, Shape::HotKeys, 30).unwrap();
        save_dataset(&ds, &path).unwrap();

        let loaded = load_dataset(&path).unwrap();
        assert_eq!(loaded, ds);
    }

    #[test]
    fn test_parse_minimal_dataset() {
        let json = r#"{
            "seed": 0,
            "shape": "uniform",
            "records": [
                {"id": 0, "user_id": 5, "region": "us-west", "timestamp_ms": 1000}
            ]
        }"#;

        let ds = parse_dataset(json).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.regions.len(), 4);
    }

    #[test]
    fn test_parse_rejects_unknown_shape() {
        let json = r#"{"seed": 0, "shape": "bursty", "records": []}"#;
        let err = parse_dataset(json).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown dataset shape"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dataset(Path::new("/nonexistent/records.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read dataset file"));
    }
}

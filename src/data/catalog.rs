use crate::data::peak::Peak;
use crate::data::persistence::get_data_dir;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// The hundred-peak list shipped with the binary.
const BUNDLED_CATALOG: &str = include_str!("../../assets/peaks.json");

/// A file with this name in the data directory replaces the bundled list.
pub const CATALOG_OVERRIDE_FILE: &str = "peaks.json";

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate peak id '{0}'")]
    DuplicateId(String),
    #[error("rank {rank} is shared by '{first}' and '{second}'")]
    DuplicateRank {
        rank: u32,
        first: String,
        second: String,
    },
    #[error("peak '{0}' has coordinates outside the valid range")]
    InvalidCoordinates(String),
    #[error("peak '{0}' has a zero height")]
    InvalidHeight(String),
}

/// Read-only peak table. Order is the order of the source file; callers that
/// need canonical order sort by `rank`.
#[derive(Debug, Clone)]
pub struct Catalog {
    peaks: Vec<Peak>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(peaks: Vec<Peak>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(peaks.len());
        let mut ranks: HashMap<u32, &str> = HashMap::with_capacity(peaks.len());
        for (i, peak) in peaks.iter().enumerate() {
            if index.insert(peak.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(peak.id.clone()));
            }
            if let Some(first) = ranks.insert(peak.rank, &peak.id) {
                return Err(CatalogError::DuplicateRank {
                    rank: peak.rank,
                    first: first.to_string(),
                    second: peak.id.clone(),
                });
            }
            if !peak.has_valid_coordinates() {
                return Err(CatalogError::InvalidCoordinates(peak.id.clone()));
            }
            if peak.height == 0 {
                return Err(CatalogError::InvalidHeight(peak.id.clone()));
            }
        }
        Ok(Catalog { peaks, index })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let peaks: Vec<Peak> = serde_json::from_str(json).context("failed to parse peak catalog")?;
        Ok(Catalog::new(peaks)?)
    }

    pub fn bundled() -> Result<Self> {
        Catalog::from_json(BUNDLED_CATALOG).context("bundled catalog is invalid")
    }

    pub fn load() -> Result<Self> {
        Catalog::load_from(&get_data_dir()?)
    }

    /// Uses `peaks.json` from `dir` when present, otherwise the bundled list.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CATALOG_OVERRIDE_FILE);
        if !path.exists() {
            return Catalog::bundled();
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let catalog = Catalog::from_json(&contents)
            .with_context(|| format!("invalid catalog in {}", path.display()))?;
        info!(path = %path.display(), peaks = catalog.len(), "loaded catalog override");
        Ok(catalog)
    }

    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn get(&self, id: &str) -> Option<&Peak> {
        self.index.get(id).map(|&i| &self.peaks[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::peak::test_peak;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_catalog_has_one_hundred_peaks() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.len(), 100);
    }

    #[test]
    fn test_bundled_catalog_ranks_are_dense() {
        let catalog = Catalog::bundled().unwrap();
        let mut ranks: Vec<u32> = catalog.peaks().iter().map(|p| p.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=100).collect::<Vec<_>>());
    }

    #[test]
    fn test_get_finds_peak_by_id() {
        let catalog = Catalog::bundled().unwrap();
        let peak = catalog.get("P001").unwrap();
        assert_eq!(peak.rank, 1);
        assert!(catalog.get("NOPE").is_none());
        assert!(!catalog.contains("NOPE"));
    }

    #[test]
    fn test_new_rejects_duplicate_id() {
        let peaks = vec![test_peak("A", 1, "R"), test_peak("A", 2, "R")];
        assert_eq!(
            Catalog::new(peaks).unwrap_err(),
            CatalogError::DuplicateId("A".to_string())
        );
    }

    #[test]
    fn test_new_rejects_duplicate_rank() {
        let peaks = vec![test_peak("A", 1, "R"), test_peak("B", 1, "R")];
        assert!(matches!(
            Catalog::new(peaks).unwrap_err(),
            CatalogError::DuplicateRank { rank: 1, .. }
        ));
    }

    #[test]
    fn test_new_rejects_bad_coordinates() {
        let mut bad = test_peak("A", 1, "R");
        bad.lng = 200.0;
        assert_eq!(
            Catalog::new(vec![bad]).unwrap_err(),
            CatalogError::InvalidCoordinates("A".to_string())
        );
    }

    #[test]
    fn test_new_accepts_empty_catalog() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_from_without_override_uses_bundled() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::load_from(tmp.path()).unwrap();
        assert_eq!(catalog.len(), 100);
    }

    #[test]
    fn test_load_from_prefers_override_file() {
        let tmp = TempDir::new().unwrap();
        let peaks = vec![test_peak("X1", 1, "Range"), test_peak("X2", 2, "Range")];
        fs::write(
            tmp.path().join(CATALOG_OVERRIDE_FILE),
            serde_json::to_string(&peaks).unwrap(),
        )
        .unwrap();
        let catalog = Catalog::load_from(tmp.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("X2"));
    }

    #[test]
    fn test_load_from_invalid_override_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CATALOG_OVERRIDE_FILE), "{}").unwrap();
        let err = Catalog::load_from(tmp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid catalog"));
    }
}

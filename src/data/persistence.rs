use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

/// Set once at startup by main() from the --data-dir argument.
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Call this from main() before any load/save operations.
pub fn set_data_dir(path: PathBuf) {
    let _ = DATA_DIR.set(path);
}

pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = DATA_DIR.get() {
        return Ok(dir.clone());
    }
    // Fallback when running tests or if set_data_dir was not called
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    Ok(cwd.join("config"))
}

/// On-disk encoding of a persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    fn decode<T: for<'de> Deserialize<'de>>(self, contents: &str, path: &Path) -> Result<T> {
        match self {
            Format::Json => serde_json::from_str(contents)
                .with_context(|| format!("failed to parse JSON from {}", path.display())),
            Format::Yaml => serde_norway::from_str(contents)
                .with_context(|| format!("failed to parse YAML from {}", path.display())),
        }
    }

    fn encode<T: Serialize>(self, value: &T) -> Result<String> {
        match self {
            Format::Json => serde_json::to_string_pretty(value).context("failed to serialize JSON"),
            Format::Yaml => serde_norway::to_string(value).context("failed to serialize YAML"),
        }
    }
}

/// A record stored as a single file in the data directory.
///
/// A missing file loads as `Default`; a file that exists but does not parse
/// is an error, and it is up to the caller whether that is fatal.
pub trait Persistable: Sized + Default + Serialize + for<'de> Deserialize<'de> {
    fn filename() -> &'static str;
    fn format() -> Format;

    fn load() -> Result<Self> {
        Self::load_from(&get_data_dir()?)
    }

    fn save(&self) -> Result<()> {
        self.save_to(&get_data_dir()?)
    }

    /// Load from an explicit directory, bypassing the global `DATA_DIR`.
    fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::filename());
        if !path.exists() {
            debug!(path = %path.display(), "no persisted record, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::format().decode(&contents, &path)
    }

    /// Save to an explicit directory, bypassing the global `DATA_DIR`.
    fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create dir {}", dir.display()))?;
        let path = dir.join(Self::filename());
        let contents = Self::format().encode(self)?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), "record saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct TestJsonData {
        value: String,
    }

    impl Persistable for TestJsonData {
        fn filename() -> &'static str {
            "test_data.json"
        }
        fn format() -> Format {
            Format::Json
        }
    }

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct TestYamlData {
        count: u32,
    }

    impl Persistable for TestYamlData {
        fn filename() -> &'static str {
            "test_data.yaml"
        }
        fn format() -> Format {
            Format::Yaml
        }
    }

    #[test]
    fn test_get_data_dir_returns_a_path() {
        assert!(get_data_dir().is_ok());
    }

    #[test]
    fn test_load_from_returns_default_when_file_missing() {
        let tmp = TempDir::new().unwrap();
        let result = TestJsonData::load_from(tmp.path()).unwrap();
        assert_eq!(result, TestJsonData::default());
    }

    #[test]
    fn test_json_save_to_and_load_from() {
        let tmp = TempDir::new().unwrap();
        let data = TestJsonData { value: "summit".to_string() };
        data.save_to(tmp.path()).unwrap();
        assert_eq!(TestJsonData::load_from(tmp.path()).unwrap(), data);
    }

    #[test]
    fn test_yaml_save_to_and_load_from() {
        let tmp = TempDir::new().unwrap();
        let data = TestYamlData { count: 99 };
        data.save_to(tmp.path()).unwrap();
        assert_eq!(TestYamlData::load_from(tmp.path()).unwrap(), data);
    }

    #[test]
    fn test_load_from_malformed_json_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("test_data.json"), "{not json").unwrap();
        let err = TestJsonData::load_from(tmp.path()).unwrap_err();
        assert!(format!("{err}").contains("failed to parse JSON"));
    }

    #[test]
    fn test_save_to_creates_directory_if_missing() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");
        let data = TestJsonData { value: "nested".to_string() };
        data.save_to(&nested).unwrap();
        assert_eq!(TestJsonData::load_from(&nested).unwrap(), data);
    }
}

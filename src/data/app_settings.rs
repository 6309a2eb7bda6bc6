use crate::data::persistence::{Format, Persistable};
use serde::{Deserialize, Serialize};

/// Viewport of the map panel, in degrees.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MapSettings {
    pub center_lat: f64,
    pub center_lng: f64,
    /// Latitude span shown top to bottom. Longitude span follows the panel's
    /// aspect ratio.
    pub span_deg: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        MapSettings {
            center_lat: 23.7,
            center_lng: 120.95,
            span_deg: 2.4,
        }
    }
}

/// Contents of `config.yaml`. Every key is optional.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Match search text byte-for-byte instead of ignoring case.
    pub case_sensitive_search: bool,
    pub map: MapSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            log_level: "info".to_string(),
            case_sensitive_search: false,
            map: MapSettings::default(),
        }
    }
}

impl Persistable for AppSettings {
    fn filename() -> &'static str {
        "config.yaml"
    }
    fn format() -> Format {
        Format::Yaml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_app_settings_default_values() {
        let settings = AppSettings::default();
        assert_eq!(settings.log_level, "info");
        assert!(!settings.case_sensitive_search);
        assert_eq!(settings.map.center_lat, 23.7);
        assert_eq!(settings.map.center_lng, 120.95);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let settings: AppSettings = serde_norway::from_str("case_sensitive_search: true").unwrap();
        assert!(settings.case_sensitive_search);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.map, MapSettings::default());
    }

    #[test]
    fn test_partial_map_section() {
        let yaml = "map:\n  span_deg: 1.0\n";
        let settings: AppSettings = serde_norway::from_str(yaml).unwrap();
        assert_eq!(settings.map.span_deg, 1.0);
        assert_eq!(settings.map.center_lat, 23.7);
    }

    #[test]
    fn test_save_to_and_load_from() {
        let tmp = TempDir::new().unwrap();
        let mut settings = AppSettings::default();
        settings.log_level = "debug".to_string();
        settings.save_to(tmp.path()).unwrap();
        let loaded = AppSettings::load_from(tmp.path()).unwrap();
        assert_eq!(loaded, settings);
    }
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://3snet.co/js_test/api.json";
pub const ENDPOINT_ENV: &str = "PLANBOARD_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds. Unset means wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_years")]
    pub years: Vec<i32>,
    #[serde(default = "default_year")]
    pub default_year: i32,
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_years() -> Vec<i32> {
    vec![2025, 2024]
}

fn default_year() -> i32 {
    2025
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: None,
            years: default_years(),
            default_year: default_year(),
            log_file: None,
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_secs.map(std::time::Duration::from_secs)
    }

    /// Year options offered by the selector; never empty.
    pub fn year_options(&self) -> Vec<i32> {
        if self.years.is_empty() {
            vec![self.default_year]
        } else {
            self.years.clone()
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| config_dir().join("planboard.log"))
    }
}

pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("planboard")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Settings exactly as stored on disk, without environment overrides.
pub fn load_saved_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Effective settings for a board run: the stored file plus `PLANBOARD_ENDPOINT`.
pub fn load_settings() -> Settings {
    let mut settings = load_saved_settings();
    if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
        if !endpoint.trim().is_empty() {
            settings.endpoint = endpoint;
        }
    }
    settings
}

fn load_settings_from(path: &std::path::Path) -> Settings {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path())
}

fn save_settings_to(settings: &Settings, path: &std::path::Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| BoardError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            endpoint: "http://localhost:9000/api.json".to_string(),
            timeout_secs: Some(5),
            years: vec![2026, 2025],
            default_year: 2026,
            log_file: Some("/tmp/planboard.log".to_string()),
        };
        save_settings_to(&settings, &path).unwrap();
        let loaded = load_settings_from(&path);
        assert_eq!(loaded.endpoint, "http://localhost:9000/api.json");
        assert_eq!(loaded.timeout(), Some(std::time::Duration::from_secs(5)));
        assert_eq!(loaded.years, vec![2026, 2025]);
        assert_eq!(loaded.log_path(), PathBuf::from("/tmp/planboard.log"));
    }

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("absent.json"));
        assert_eq!(s.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(s.timeout(), None);
        assert_eq!(s.year_options(), vec![2025, 2024]);
        assert_eq!(s.default_year, 2025);
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"endpoint": "http://example.test/data.json"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.endpoint, "http://example.test/data.json");
        assert_eq!(s.default_year, 2025);
        assert!(s.log_file.is_none());
    }

    #[test]
    fn test_unreadable_settings_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ broken").unwrap();
        assert_eq!(load_settings_from(&path).endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_save_creates_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("nested").join("settings.json");
        save_settings_to(&Settings::default(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_empty_years_fall_back_to_default_year() {
        let s = Settings {
            years: Vec::new(),
            default_year: 2030,
            ..Settings::default()
        };
        assert_eq!(s.year_options(), vec![2030]);
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::settings::SettingsFactors;

/// ## Structure
/// Configuration file layout; every key is optional.
///
/// ```text
/// AppConfig
///   ├── database: String          (default "dfz.db")
///   ├── port: u16                 (default 8000)
///   └── factors: SettingsFactors  (any subset of the margin coefficients)
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub database: String,
    pub port: u16,
    pub factors: SettingsFactors,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: "dfz.db".to_string(),
            port: 8000,
            factors: SettingsFactors::default(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Reads the file when a path is given, defaults otherwise
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(Path::new(path))
                    .with_context(|| format!("Failed to read config file {}", path))?;
                Self::from_yaml(&content)
                    .with_context(|| format!("Failed to parse config file {}", path))
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_deserialization_with_factor_overrides() {
        let yaml = r#"
database: "relay.db"
factors:
  il_grading_factor: 1.2
  kman_grading_factor: 1.5
"#;

        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.database, "relay.db");
        assert_eq!(config.port, 8000);
        assert_eq!(config.factors.il_grading_factor, 1.2);
        assert_eq!(config.factors.kman_grading_factor, 1.5);
        assert_eq!(config.factors.il_reset_factor, 0.9);
    }

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_without_path() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.database, "dfz.db");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port: 9100").unwrap();

        let config = AppConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.port, 9100);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(AppConfig::load(Some("/nonexistent/dfz.yaml")).is_err());
    }
}

//! Configuration file support for Loom.
//!
//! Loom supports two configuration file locations:
//! - Global: `~/.loom/config.toml` - User-wide defaults
//! - Project: `.loom/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! [converters]
//! order = ["datetime", "enum", "primitive", "collection"]
//!
//! [datetime]
//! formats = ["%d.%m.%Y"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::mapping::configuration::ConverterKind;

/// Loom configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Converter chain settings
    pub converters: ConverterSettings,

    /// Timestamp parsing settings
    pub datetime: DateTimeSettings,
}

/// Which built-in converters to register, and in what order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterSettings {
    /// Converter precedence (None = primitive, enum, datetime, collection)
    pub order: Option<Vec<ConverterKind>>,
}

/// Timestamp parser settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateTimeSettings {
    /// Extra `strftime` formats, tried before the built-in ones
    pub formats: Vec<String>,
}

impl Settings {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Settings) {
        if other.converters.order.is_some() {
            self.converters.order = other.converters.order;
        }
        if !other.datetime.formats.is_empty() {
            self.datetime.formats = other.datetime.formats;
        }
    }

    /// Converter precedence, falling back to the built-in order.
    pub fn converter_order(&self) -> Vec<ConverterKind> {
        self.converters
            .order
            .clone()
            .unwrap_or_else(|| ConverterKind::DEFAULT_ORDER.to_vec())
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.loom/config.toml)
/// 2. Global config (~/.loom/config.toml)
/// 3. Defaults
pub fn load_settings(global_path: &Path, project_path: &Path) -> Settings {
    let mut settings = Settings::default();

    if global_path.exists() {
        settings.merge(Settings::load_or_default(global_path));
    }

    if project_path.exists() {
        settings.merge(Settings::load_or_default(project_path));
    }

    settings
}

/// Get the global loom config directory (~/.loom).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".loom"))
}

/// Get the global config path (~/.loom/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.loom/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".loom").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(settings.converters.order.is_none());
        assert!(settings.datetime.formats.is_empty());
        assert_eq!(settings.converter_order(), ConverterKind::DEFAULT_ORDER.to_vec());
    }

    #[test]
    fn test_settings_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        std::fs::write(
            &path,
            r#"
[converters]
order = ["datetime", "enum", "primitive"]

[datetime]
formats = ["%d.%m.%Y"]
"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(
            settings.converter_order(),
            vec![
                ConverterKind::DateTime,
                ConverterKind::Enum,
                ConverterKind::Primitive
            ]
        );
        assert_eq!(settings.datetime.formats, vec!["%d.%m.%Y"]);
    }

    #[test]
    fn test_settings_load_rejects_unknown_converter() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[converters]\norder = [\"bogus\"]\n").unwrap();

        assert!(Settings::load(&path).is_err());
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_settings_merge() {
        let mut base = Settings::default();
        base.converters.order = Some(vec![ConverterKind::Primitive]);
        base.datetime.formats = vec!["%d.%m.%Y".to_string()];

        let mut override_settings = Settings::default();
        override_settings.converters.order = Some(vec![ConverterKind::Enum]);

        base.merge(override_settings);

        assert_eq!(base.converters.order, Some(vec![ConverterKind::Enum]));
        assert_eq!(base.datetime.formats, vec!["%d.%m.%Y"]); // Not overridden
    }

    #[test]
    fn test_load_settings_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[converters]
order = ["primitive", "enum"]

[datetime]
formats = ["%d.%m.%Y"]
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[converters]
order = ["enum", "primitive"]
"#,
        )
        .unwrap();

        let settings = load_settings(&global_path, &project_path);

        assert_eq!(
            settings.converter_order(),
            vec![ConverterKind::Enum, ConverterKind::Primitive]
        );
        assert_eq!(settings.datetime.formats, vec!["%d.%m.%Y"]);
    }

    #[test]
    fn test_load_settings_missing_files() {
        let tmp = TempDir::new().unwrap();
        let settings = load_settings(
            &tmp.path().join("missing-global.toml"),
            &tmp.path().join("missing-project.toml"),
        );
        assert_eq!(settings, Settings::default());
    }
}

//! Engine configuration
//!
//! Config stored at: `<config dir>/footing/config.toml`
//!
//! ```toml
//! default_shape = "rectangular"
//! tables_path = "tables.toml"
//!
//! [pricing]
//! currency = "USD"
//! structural_concrete_per_m3 = 140.0
//! waste_factor = 0.05
//! ```
//!
//! Custom lookup tables come either from `tables_path` (relative paths are
//! resolved against the config file's directory) or inline `[tables.building]`
//! and `[tables.soil]` sections. Inline tables win when both are present.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::calculations::footing::FootingShape;
use crate::errors::{CalcError, CalcResult};
use crate::report::PricingConfig;
use crate::tables::LookupTables;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Footing shape used when a command does not specify one
    pub default_shape: FootingShape,

    /// TOML file with custom building/soil tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables_path: Option<PathBuf>,

    /// Unit prices and waste allowance for quantity reports
    pub pricing: PricingConfig,

    /// Inline custom tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<LookupTables>,
}

impl EngineConfig {
    /// Get the config file path
    pub fn default_path() -> CalcResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| CalcError::config("no configuration directory on this platform"))?;
        Ok(dir.join("footing").join("config.toml"))
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(source: &str) -> CalcResult<Self> {
        let config: EngineConfig = toml::from_str(source).map_err(|e| CalcError::config(e.to_string()))?;
        config.pricing.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read config", path.display().to_string(), e.to_string()))?;
        let mut config = Self::from_toml_str(&source)?;

        if let Some(dir) = path.parent() {
            config.tables_path = config
                .tables_path
                .take()
                .map(|tables| if tables.is_relative() { dir.join(tables) } else { tables });
        }

        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load from the default location, or fall back to defaults if no file exists.
    pub fn load_or_default() -> CalcResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(EngineConfig::default())
        }
    }

    /// Lookup tables selected by this config.
    pub fn tables(&self) -> CalcResult<LookupTables> {
        Ok(self
            .custom_tables()?
            .unwrap_or_else(|| LookupTables::standard().clone()))
    }

    /// Inline or file tables, `None` when the config uses the standard ones.
    pub fn custom_tables(&self) -> CalcResult<Option<LookupTables>> {
        if let Some(tables) = &self.tables {
            return Ok(Some(tables.clone()));
        }
        self.tables_path
            .as_deref()
            .map(LookupTables::from_path)
            .transpose()
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> CalcResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CalcError::file_error("create config dir", parent.display().to_string(), e.to_string()))?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| CalcError::serialization(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| CalcError::file_error("write config", path.display().to_string(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.tables().unwrap(), *LookupTables::standard());
        assert!(config.custom_tables().unwrap().is_none());
    }

    #[test]
    fn test_pricing_and_shape() {
        let config = EngineConfig::from_toml_str(
            r#"
            default_shape = "rectangular"

            [pricing]
            currency = "EUR"
            lean_concrete_per_m3 = 90.0
            "#,
        )
        .unwrap();
        assert_eq!(config.default_shape, FootingShape::Rectangular);
        assert_eq!(config.pricing.currency, "EUR");
        assert_eq!(config.pricing.lean_concrete_per_m3, Some(90.0));
        assert_eq!(config.pricing.waste_factor, 0.05);
    }

    #[test]
    fn test_inline_tables() {
        let config = EngineConfig::from_toml_str(
            r#"
            [tables.building.other]
            dead = 1.0
            live = 2.0

            [tables.soil]
            other = 80.0
            "#,
        )
        .unwrap();
        let tables = config.tables().unwrap();
        assert_eq!(tables.load_for("residential").value.total(), 3.0);
        assert_eq!(tables.soil_capacity_for("clay").value, 80.0);
    }

    #[test]
    fn test_inline_tables_without_fallback_rejected() {
        let err = EngineConfig::from_toml_str(
            r#"
            [tables.building.office]
            dead = 1.0
            live = 2.0

            [tables.soil]
            other = 80.0
            "#,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("other"));
    }

    #[test]
    fn test_invalid_pricing_rejected() {
        let err = EngineConfig::from_toml_str("[pricing]\nwaste_factor = -1.0").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_relative_tables_path() {
        let dir = temp_dir().join(format!("footing_config_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        std::fs::write(
            dir.join("tables.toml"),
            "[building.other]\ndead = 5.0\nlive = 5.0\n\n[soil]\nother = 50.0\n",
        )
        .unwrap();
        std::fs::write(dir.join("config.toml"), "tables_path = \"tables.toml\"\n").unwrap();

        let config = EngineConfig::load(&dir.join("config.toml")).unwrap();
        assert_eq!(config.tables_path, Some(dir.join("tables.toml")));
        let tables = config.tables().unwrap();
        assert_eq!(tables.soil_capacity_for("rock").value, 50.0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = temp_dir().join(format!("footing_config_save_{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut config = EngineConfig::default();
        config.pricing.structural_concrete_per_m3 = Some(130.0);
        config.save(&path).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded.pricing.structural_concrete_per_m3, Some(130.0));

        let _ = std::fs::remove_dir_all(&dir);
    }
}

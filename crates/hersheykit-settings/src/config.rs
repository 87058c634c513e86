//! Configuration for HersheyKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files; the default file lives in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Font settings (glyph database and mapping file locations)
//! - Layout settings (handling of unmapped characters)
//! - Export settings (output file, scale, axis orientation, layer)

use hersheykit_core::{LayoutOptions, UnmappedPolicy};
use hersheykit_export::CoordinateTransform;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// Directory name under the platform config directory.
const APP_DIR: &str = "hersheykit";
/// File name of the default configuration.
const CONFIG_FILE: &str = "config.toml";

/// Handling of characters missing from the mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedCharacters {
    /// Abort the whole string
    #[default]
    Fail,
    /// Leave a gap and continue
    Skip,
}

impl std::fmt::Display for UnmappedCharacters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fail => write!(f, "fail"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Font file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    /// Hershey glyph database
    pub database_path: PathBuf,
    /// Character to glyph mapping (.hmp)
    pub mapping_path: PathBuf,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/hershey_font.dat"),
            mapping_path: PathBuf::from("mappings/romant.hmp"),
        }
    }
}

/// Text layout preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LayoutSettings {
    pub unmapped: UnmappedCharacters,
    /// Cursor advance for a skipped character, in grid units
    pub skip_advance: i32,
}

/// Drawing output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub output_path: PathBuf,
    /// Drawing units per Hershey grid unit
    pub scale: f64,
    /// Negate y so text reads upright in CAD tools
    pub flip_y: bool,
    /// DXF layer for the generated polylines
    pub layer: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("sign.dxf"),
            scale: 1.0,
            flip_y: true,
            layer: "0".to_string(),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub font: FontSettings,
    pub layout: LayoutSettings,
    pub export: ExportSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform default config file, e.g. `~/.config/hersheykit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no config directory on this platform".to_string())
        })?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the default config file if it exists
    pub fn load_default() -> SettingsResult<Option<Self>> {
        let path = Self::default_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No default config file");
            return Ok(None);
        }
        Self::load_from_file(&path).map(Some)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let invalid = |key: &str, reason: &str| SettingsError::InvalidSetting {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        if self.font.database_path.as_os_str().is_empty() {
            return Err(invalid("font.database_path", "must not be empty"));
        }
        if self.font.mapping_path.as_os_str().is_empty() {
            return Err(invalid("font.mapping_path", "must not be empty"));
        }

        if self.layout.skip_advance < 0 {
            return Err(invalid("layout.skip_advance", "must not be negative"));
        }

        if self.export.output_path.as_os_str().is_empty() {
            return Err(invalid("export.output_path", "must not be empty"));
        }
        if !self.export.scale.is_finite() || self.export.scale <= 0.0 {
            return Err(invalid("export.scale", "must be a positive number"));
        }
        if self.export.layer.trim().is_empty() {
            return Err(invalid("export.layer", "must not be empty"));
        }

        Ok(())
    }

    pub fn layout_options(&self) -> LayoutOptions {
        let unmapped = match self.layout.unmapped {
            UnmappedCharacters::Fail => UnmappedPolicy::Fail,
            UnmappedCharacters::Skip => UnmappedPolicy::Skip {
                advance: self.layout.skip_advance,
            },
        };
        LayoutOptions { unmapped }
    }

    pub fn coordinate_transform(&self) -> CoordinateTransform {
        CoordinateTransform {
            scale: self.export.scale,
            flip_y: self.export.flip_y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(SettingsError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let config = Config::default();
        assert_eq!(config.font.mapping_path, PathBuf::from("mappings/romant.hmp"));
        assert_eq!(config.font.database_path, PathBuf::from("data/hershey_font.dat"));
        assert_eq!(config.export.output_path, PathBuf::from("sign.dxf"));
        assert!(config.export.flip_y);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_layout_options() {
        let mut config = Config::default();
        assert_eq!(config.layout_options().unmapped, UnmappedPolicy::Fail);

        config.layout.unmapped = UnmappedCharacters::Skip;
        config.layout.skip_advance = 12;
        assert_eq!(
            config.layout_options().unmapped,
            UnmappedPolicy::Skip { advance: 12 }
        );
    }

    #[test]
    fn test_validation_failures() {
        let mut config = Config::default();
        config.export.scale = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "export.scale"
        ));

        let mut config = Config::default();
        config.export.layer = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.layout.skip_advance = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[export]\nscale = 0.25\n").unwrap();
        assert_eq!(config.export.scale, 0.25);
        assert_eq!(config.export.layer, "0");
        assert_eq!(config.font, FontSettings::default());
    }

    #[test]
    fn test_unmapped_display() {
        assert_eq!(UnmappedCharacters::Fail.to_string(), "fail");
        assert_eq!(UnmappedCharacters::Skip.to_string(), "skip");
    }
}

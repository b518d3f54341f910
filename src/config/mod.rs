// SPDX-License-Identifier: MPL-2.0
//! This module handles the converter's configuration file, an optional
//! TOML document that sets the same options as the command line.
//!
//! # Configuration Sections
//!
//! - `[input]` - Source directory, source format and SVG renderer
//! - `[render]` - Canvas size, Y direction and near-black handling
//! - `[output]` - Header path, array prefix and previews
//! - `[selection]` - Count, face cap and custom seed lists
//!
//! Every field is optional. Command-line flags are parsed into the same
//! [`Config`] shape and laid over the file with [`Config::overlay`]; what is
//! still unset afterwards falls back to [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use emoji_matrix::config::{self, Config};
//! use std::path::Path;
//!
//! let mut config = config::load_from_path(Path::new("emoji_matrix.toml"))?;
//! config.selection.count = Some(50);
//! config::save_to_path(&config, Path::new("emoji_matrix.toml"))?;
//! # Ok::<(), emoji_matrix::error::Error>(())
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::raster::YAxis;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// =============================================================================
// Enums (shared between sections)
// =============================================================================

/// Kind of asset files read from the source directory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    #[default]
    Svg,
    Png,
}

impl SourceFormat {
    /// File extension of assets in this format.
    pub fn extension(self) -> &'static str {
        match self {
            SourceFormat::Svg => "svg",
            SourceFormat::Png => "png",
        }
    }

    /// Directory used when none is configured.
    pub fn default_source_dir(self) -> &'static str {
        match self {
            SourceFormat::Svg => DEFAULT_SVG_SOURCE_DIR,
            SourceFormat::Png => DEFAULT_PNG_SOURCE_DIR,
        }
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(SourceFormat::Svg),
            "png" => Ok(SourceFormat::Png),
            other => Err(format!("unknown format '{}', expected 'svg' or 'png'", other)),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

/// How SVG assets are turned into pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Renderer {
    /// Hard-edged primitive rasterizer.
    #[default]
    Primitives,
    /// resvg, anti-aliased and thresholded.
    Resvg,
}

impl FromStr for Renderer {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primitives" => Ok(Renderer::Primitives),
            "resvg" => Ok(Renderer::Resvg),
            other => Err(format!(
                "unknown renderer '{}', expected 'primitives' or 'resvg'",
                other
            )),
        }
    }
}

// =============================================================================
// Section Structs
// =============================================================================

/// Where assets come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<SourceFormat>,

    /// Ignored for PNG input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderer: Option<Renderer>,
}

/// Canvas and color settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Canvas edge length; clamped to 8..=256.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<YAxis>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_threshold: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_boost: Option<[u8; 3]>,
}

/// Generated files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previews: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_dir: Option<PathBuf>,
}

/// Which emojis to convert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct SelectionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_faces: Option<usize>,

    /// Replaces the built-in face seed list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_seed: Option<Vec<String>>,

    /// Replaces the built-in fun seed list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fun_seed: Option<Vec<String>>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub selection: SelectionConfig,
}

impl Config {
    /// Returns `self` with every unset field taken from `base`.
    #[must_use]
    pub fn overlay(self, base: Config) -> Config {
        Config {
            input: InputConfig {
                source_dir: self.input.source_dir.or(base.input.source_dir),
                format: self.input.format.or(base.input.format),
                renderer: self.input.renderer.or(base.input.renderer),
            },
            render: RenderConfig {
                size: self.render.size.or(base.render.size),
                y_axis: self.render.y_axis.or(base.render.y_axis),
                dark_threshold: self.render.dark_threshold.or(base.render.dark_threshold),
                dark_boost: self.render.dark_boost.or(base.render.dark_boost),
            },
            output: OutputConfig {
                header: self.output.header.or(base.output.header),
                array_prefix: self.output.array_prefix.or(base.output.array_prefix),
                previews: self.output.previews.or(base.output.previews),
                preview_dir: self.output.preview_dir.or(base.output.preview_dir),
            },
            selection: SelectionConfig {
                count: self.selection.count.or(base.selection.count),
                max_faces: self.selection.max_faces.or(base.selection.max_faces),
                face_seed: self.selection.face_seed.or(base.selection.face_seed),
                fun_seed: self.selection.fun_seed.or(base.selection.fun_seed),
            },
        }
    }
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`] if
/// it is not valid TOML or contains unknown sections or keys.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Io(format!("cannot read config {}: {}", path.display(), e))
    })?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_config() -> Config {
        Config {
            input: InputConfig {
                source_dir: Some(PathBuf::from("assets/openmoji")),
                format: Some(SourceFormat::Svg),
                renderer: Some(Renderer::Resvg),
            },
            render: RenderConfig {
                size: Some(32),
                y_axis: Some(YAxis::Up),
                dark_threshold: Some(12),
                dark_boost: Some([30, 30, 30]),
            },
            output: OutputConfig {
                header: Some(PathBuf::from("include/Emojis.h")),
                array_prefix: Some("icon_".to_string()),
                previews: Some(true),
                preview_dir: None,
            },
            selection: SelectionConfig {
                count: Some(20),
                max_faces: Some(3),
                face_seed: Some(vec!["1F600".to_string()]),
                fun_seed: None,
            },
        }
    }

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = sample_config();
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("emoji_matrix.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn sections_and_fields_are_optional() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("emoji_matrix.toml");
        fs::write(&config_path, "[selection]\ncount = 12\n\n[render]\ny_axis = \"up\"\n")
            .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(loaded.selection.count, Some(12));
        assert_eq!(loaded.render.y_axis, Some(YAxis::Up));
        assert_eq!(loaded.input, InputConfig::default());
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("emoji_matrix.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_values_are_rejected() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("emoji_matrix.toml");
        fs::write(&config_path, "[input]\nformat = \"gif\"\n").expect("failed to write config");
        assert!(matches!(load_from_path(&config_path), Err(Error::Config(_))));

        fs::write(&config_path, "[display]\nzoom = 3\n").expect("failed to write config");
        assert!(matches!(load_from_path(&config_path), Err(Error::Config(_))));
    }

    #[test]
    fn misspelled_section_keys_are_rejected() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("emoji_matrix.toml");
        for text in [
            "[selection]\ncuont = 5\n",
            "[input]\nsource = \"svg\"\n",
            "[render]\nsize = 32\ny-axis = \"up\"\n",
            "[output]\nheaders = \"out.h\"\n",
        ] {
            fs::write(&config_path, text).expect("failed to write config");
            match load_from_path(&config_path) {
                Err(Error::Config(_)) => {}
                other => panic!("expected Config error for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        match load_from_path(&temp_dir.path().join("absent.toml")) {
            Err(Error::Io(message)) => assert!(message.contains("absent.toml")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn overlay_prefers_self_and_fills_from_base() {
        let mut overrides = Config::default();
        overrides.selection.count = Some(5);
        overrides.input.format = Some(SourceFormat::Png);

        let merged = overrides.overlay(sample_config());
        assert_eq!(merged.selection.count, Some(5));
        assert_eq!(merged.input.format, Some(SourceFormat::Png));
        assert_eq!(merged.selection.max_faces, Some(3));
        assert_eq!(merged.output.array_prefix.as_deref(), Some("icon_"));
        assert_eq!(merged.output.preview_dir, None);
    }

    #[test]
    fn enums_parse_from_command_line_text() {
        assert_eq!("PNG".parse::<SourceFormat>(), Ok(SourceFormat::Png));
        assert_eq!("resvg".parse::<Renderer>(), Ok(Renderer::Resvg));
        assert!("bmp".parse::<SourceFormat>().is_err());
        assert_eq!(SourceFormat::Svg.to_string(), "SVG");
    }
}

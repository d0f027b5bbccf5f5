//! Compiler configuration.
//!
//! Handles loading and validating the optional `catalog.toml`. Every key has
//! a default matching the standard project layout, so a missing file is
//! equivalent to an empty one.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source_dir = "data/brands"          # One subdirectory per brand
//! output_dir = "output"               # Receives the catalog and images
//! images_dir = "images"               # Relative to output_dir
//! catalog_file = "all-companies.json" # Relative to output_dir
//! image_prefix = "https://catalog.sky-quote.com/RoofingMaterials/Images/"
//!
//! [images]
//! quality = 90                        # WebP quality (1-100)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "catalog.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Compiler configuration loaded from `catalog.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Directory containing one subdirectory per brand.
    pub source_dir: PathBuf,
    /// Directory receiving the catalog document and the images directory.
    pub output_dir: PathBuf,
    /// Stored images directory, relative to `output_dir`.
    pub images_dir: PathBuf,
    /// Catalog document file name, relative to `output_dir`.
    pub catalog_file: PathBuf,
    /// Public URL prefix prepended to every stored image file name.
    pub image_prefix: String,
    /// Transcoding settings.
    pub images: ImagesConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("data/brands"),
            output_dir: PathBuf::from("output"),
            images_dir: PathBuf::from("images"),
            catalog_file: PathBuf::from("all-companies.json"),
            image_prefix: "https://catalog.sky-quote.com/RoofingMaterials/Images/".to_string(),
            images: ImagesConfig::default(),
        }
    }
}

/// Transcoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// WebP encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

impl CatalogConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.images.quality) {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        if self.image_prefix.is_empty() || !self.image_prefix.ends_with('/') {
            return Err(ConfigError::Validation(
                "image_prefix must be non-empty and end with '/'".into(),
            ));
        }
        if self.catalog_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "catalog_file must not be empty".into(),
            ));
        }
        if self.images_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "images_dir must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Absolute or working-directory-relative path of the images directory.
    pub fn images_path(&self) -> PathBuf {
        self.output_dir.join(&self.images_dir)
    }

    /// Path of the catalog document.
    pub fn catalog_path(&self) -> PathBuf {
        self.output_dir.join(&self.catalog_file)
    }
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<CatalogConfig, ConfigError> {
    let config: CatalogConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`.
///
/// A missing file yields the defaults; an invalid one is an error.
pub fn load_config(path: &Path) -> Result<CatalogConfig, ConfigError> {
    if !path.exists() {
        return Ok(CatalogConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `catalog.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Material Catalog Configuration
# ==============================
# All options are optional. Values shown are the defaults.

# Directory containing one subdirectory per brand:
#   <source_dir>/<brand>/config.json
#   <source_dir>/<brand>/materials/<material>/config.json
source_dir = "data/brands"

# Directory receiving the compiled catalog and the image store.
output_dir = "output"

# Image store, relative to output_dir. Existing files are never deleted.
images_dir = "images"

# Catalog document, relative to output_dir.
catalog_file = "all-companies.json"

# Public URL prefix for every image in the catalog. Must end with '/'.
image_prefix = "https://catalog.sky-quote.com/RoofingMaterials/Images/"

[images]
# WebP encoding quality (1-100).
quality = 90
"##
}

//! Shared test utilities for the material-catalog test suite.
//!
//! Provides synthetic image writers and a [`SourceTree`] builder that lays
//! out brand/material directories in a temp dir.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tree = SourceTree::new();
//! tree.brand("acme", r#"{"name": "Acme"}"#);
//! tree.file("acme/acme_logo.png", b"logo bytes");
//! tree.material("acme", "shingle-a", r#"{"price": 10}"#);
//! ```

use image::{ImageEncoder, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =========================================================================
// Synthetic images
// =========================================================================

fn pattern(width: u32, height: u32, seed: u8) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, seed])
    })
}

/// Write a small valid PNG. Different seeds produce different bytes.
pub fn write_png(path: &Path, width: u32, height: u32, seed: u8) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    pattern(width, height, seed).save(path).unwrap();
}

/// Write a small valid JPEG. Different seeds produce different bytes.
pub fn write_jpeg(path: &Path, width: u32, height: u32, seed: u8) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let img = pattern(width, height, seed);
    let file = fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

// =========================================================================
// Source tree builder
// =========================================================================

/// A temporary brands root plus a sibling output directory.
pub struct SourceTree {
    tmp: TempDir,
}

impl SourceTree {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("brands")).unwrap();
        Self { tmp }
    }

    /// The brands root (`<tmp>/brands`).
    pub fn root(&self) -> PathBuf {
        self.tmp.path().join("brands")
    }

    /// The output directory (`<tmp>/output`), not created.
    pub fn output(&self) -> PathBuf {
        self.tmp.path().join("output")
    }

    /// Create `<root>/<brand>/config.json`.
    pub fn brand(&self, brand: &str, config: &str) -> PathBuf {
        let dir = self.root().join(brand);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.json"), config).unwrap();
        dir
    }

    /// Create `<root>/<brand>/materials/<material>/config.json`.
    pub fn material(&self, brand: &str, material: &str, config: &str) -> PathBuf {
        let dir = self.material_dir(brand, material);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.json"), config).unwrap();
        dir
    }

    pub fn material_dir(&self, brand: &str, material: &str) -> PathBuf {
        self.root().join(brand).join("materials").join(material)
    }

    /// Write an arbitrary file relative to the brands root.
    pub fn file(&self, rel: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }
}

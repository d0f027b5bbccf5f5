//! Content-addressed image store.
//!
//! Every image slot in the catalog (brand logo, material main image, preview,
//! gallery entry) goes through [`AssetStore::ingest`], which transcodes the
//! source to WebP and returns the public URL of the stored file.
//!
//! # Design
//!
//! ## Content addressing
//!
//! Lookups are by the SHA-256 of the source file's raw bytes, not by path or
//! slot. The first slot to reference a given content decides the stored file
//! name; every later slot with identical bytes gets the same URL back without
//! re-encoding or touching the output directory. This keeps shared imagery
//! (one swatch used as both a main image and a gallery entry) stored once.
//!
//! - A file is encoded at most once per run.
//! - A stored file name is written at most once per run. If a second,
//!   different content maps to a name that was already written, the second
//!   ingest is refused rather than overwriting the first.
//!
//! ## Run state
//!
//! The digest table, the set of file names written in this run, and the
//! size statistics live on the store value, not in globals. A run creates one
//! store, threads `&mut` through the traversal, and drops it at the end.
//!
//! ## Preservation
//!
//! The store never deletes. Files already in the images directory that the
//! current run did not write are reported by
//! [`AssetStore::preserved_assets`] and left on disk, so URLs published by
//! earlier catalogs keep resolving.

use crate::imaging::{ImageBackend, Quality, TranscodeParams};
use crate::naming::{OUTPUT_EXTENSION, stored_file_name};
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// SHA-256 hash of `bytes`, returned as a hex string.
fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Names of the stored assets already present in `images_dir`.
///
/// Only `*.webp` files directly inside the directory count. A missing
/// directory yields an empty set.
pub fn scan_existing_assets(images_dir: &Path) -> io::Result<BTreeSet<String>> {
    if !images_dir.exists() {
        return Ok(BTreeSet::new());
    }
    let mut names = BTreeSet::new();
    for entry in WalkDir::new(images_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(io::Error::other)?;
        let path = entry.path();
        let is_asset = entry.file_type().is_file()
            && path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case(OUTPUT_EXTENSION));
        if is_asset {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Size statistics for images transcoded during one run.
///
/// Digest hits are not counted: they cost nothing and add no bytes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompileStats {
    pub images_processed: u32,
    pub bytes_before: u64,
    pub bytes_after: u64,
}

impl CompileStats {
    pub fn record(&mut self, before: u64, after: u64) {
        self.images_processed += 1;
        self.bytes_before += before;
        self.bytes_after += after;
    }

    /// Bytes saved overall. Negative when WebP output grew.
    pub fn bytes_saved(&self) -> i64 {
        self.bytes_before as i64 - self.bytes_after as i64
    }

    pub fn reduction_percent(&self) -> f64 {
        percent_saved(self.bytes_before, self.bytes_after)
    }

    /// Average bytes saved per transcoded image.
    pub fn average_saved(&self) -> Option<f64> {
        (self.images_processed > 0)
            .then(|| self.bytes_saved() as f64 / self.images_processed as f64)
    }
}

impl fmt::Display for CompileStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} images, {:.2}MB → {:.2}MB ({:.1}% saved)",
            self.images_processed,
            mb(self.bytes_before),
            mb(self.bytes_after),
            self.reduction_percent()
        )
    }
}

fn percent_saved(before: u64, after: u64) -> f64 {
    if before == 0 {
        0.0
    } else {
        (before as f64 - after as f64) / before as f64 * 100.0
    }
}

fn kb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

fn mb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

/// Content-addressed image store for one compilation run.
pub struct AssetStore<'a, B: ImageBackend> {
    backend: &'a B,
    images_dir: PathBuf,
    url_prefix: String,
    quality: Quality,
    /// Source digest → public URL.
    by_digest: HashMap<String, String>,
    /// Stored file names claimed in this run.
    used: BTreeSet<String>,
    stats: CompileStats,
}

impl<'a, B: ImageBackend> AssetStore<'a, B> {
    pub fn new(backend: &'a B, images_dir: &Path, url_prefix: &str, quality: Quality) -> Self {
        Self {
            backend,
            images_dir: images_dir.to_path_buf(),
            url_prefix: url_prefix.to_string(),
            quality,
            by_digest: HashMap::new(),
            used: BTreeSet::new(),
            stats: CompileStats::default(),
        }
    }

    /// Store the image at `source` and return its public URL.
    ///
    /// Returns `None` (after logging) when the source is missing, unreadable,
    /// fails to transcode, or collides with a different content already
    /// stored under the same name in this run.
    pub fn ingest(&mut self, source: &Path, logical_name: &str) -> Option<String> {
        if !source.exists() {
            warn!(path = %source.display(), "image not found");
            return None;
        }

        let bytes = match std::fs::read(source) {
            Ok(b) => b,
            Err(e) => {
                warn!(path = %source.display(), error = %e, "failed to read image");
                return None;
            }
        };
        let digest = hash_bytes(&bytes);

        if let Some(url) = self.by_digest.get(&digest) {
            debug!(path = %source.display(), %url, "identical content already stored");
            return Some(url.clone());
        }

        let file_name = stored_file_name(logical_name);
        if !self.used.insert(file_name.clone()) {
            warn!(
                path = %source.display(),
                name = %file_name,
                "stored name already written with different content in this run, skipping"
            );
            return None;
        }

        let output = self.images_dir.join(&file_name);
        let params = TranscodeParams {
            source: source.to_path_buf(),
            output: output.clone(),
            quality: self.quality,
        };
        if let Err(e) = self.backend.transcode(&params) {
            warn!(path = %source.display(), error = %e, "failed to convert image to WebP");
            return None;
        }

        let before = bytes.len() as u64;
        let after = match std::fs::metadata(&output) {
            Ok(m) => m.len(),
            Err(e) => {
                warn!(path = %output.display(), error = %e, "converted image missing");
                return None;
            }
        };
        self.stats.record(before, after);
        info!(
            "Converted: {} → {} | Size: {:.1}KB → {:.1}KB | Saved: {:.1}KB ({:.1}%)",
            source.file_name().unwrap_or_default().to_string_lossy(),
            file_name,
            kb(before),
            kb(after),
            (before as f64 - after as f64) / 1024.0,
            percent_saved(before, after)
        );

        let url = format!("{}{}", self.url_prefix, file_name);
        self.by_digest.insert(digest, url.clone());
        Some(url)
    }

    /// Stored file names claimed by this run.
    pub fn used_assets(&self) -> &BTreeSet<String> {
        &self.used
    }

    /// Number of distinct source contents stored in this run.
    pub fn unique_assets(&self) -> usize {
        self.by_digest.len()
    }

    pub fn stats(&self) -> &CompileStats {
        &self.stats
    }

    /// `existing − used`: files from earlier runs this run did not write.
    pub fn preserved_assets(&self, existing: &BTreeSet<String>) -> BTreeSet<String> {
        existing.difference(&self.used).cloned().collect()
    }
}

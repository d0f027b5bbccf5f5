//! Centralized file naming conventions for the catalog source tree.
//!
//! Every file the compiler reads or writes is located by name rather than
//! by listing, so the conventions live in one place:
//!
//! ```text
//! <brand>/config.json
//! <brand>/<brand>_logo.<ext>
//! <brand>/materials/<material>/config.json
//! <brand>/materials/<material>/description.html
//! <brand>/materials/<material>/<material>_main.<ext>
//! <brand>/materials/<material>/<material>_main_name.txt
//! <brand>/materials/<material>/<material>_preview.<ext>
//! <brand>/materials/<material>/gallery/<prefix>_<N>.<ext>
//! <brand>/materials/<material>/gallery/<prefix>_<N>_preview.<ext>
//! <brand>/materials/<material>/gallery/<prefix>_<N>_name.txt
//! ```
//!
//! Stored assets are named by the slot that first referenced their content:
//!
//! | Slot | Logical name |
//! |---|---|
//! | Brand logo | `{brand}_logo` |
//! | Material main image | `{brand}_{material}_main` |
//! | Material preview | `{brand}_{material}_preview` |
//! | Gallery image N | `{brand}_{material}_gallery_{N}` |
//! | Gallery preview N | `{brand}_{material}_gallery_preview_{N}` |

use crate::imaging::supported_input_extensions;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const CONFIG_FILE: &str = "config.json";
pub const DESCRIPTION_FILE: &str = "description.html";
pub const MATERIALS_DIR: &str = "materials";
pub const GALLERY_DIR: &str = "gallery";

/// Extension of every stored asset.
pub const OUTPUT_EXTENSION: &str = "webp";

const PREVIEW_MARKER: &str = "_preview";
const CAPTION_SUFFIX: &str = "_name.txt";

/// Result of parsing a gallery file stem like `shingle_12`.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryStem {
    /// Everything before the last underscore (the full stem if there is none).
    pub prefix: String,
    /// Numeric index, `None` when the trailing part is not all digits.
    pub index: Option<u32>,
}

impl GalleryStem {
    /// Sort key: unparseable names share bucket 0.
    pub fn sort_index(&self) -> u32 {
        self.index.unwrap_or(0)
    }

    /// Name of the optional caption sidecar, e.g. `shingle_12_name.txt`.
    ///
    /// Built from the parsed index, so `roof_02.jpg` pairs with `roof_2_name.txt`.
    pub fn caption_file(&self) -> String {
        format!("{}_{}{}", self.prefix, self.sort_index(), CAPTION_SUFFIX)
    }

    /// Base name (no extension) of the optional preview image.
    pub fn preview_base(&self) -> String {
        format!("{}_{}{}", self.prefix, self.sort_index(), PREVIEW_MARKER)
    }
}

/// Parse a gallery file stem following the `<prefix>_<N>` convention.
///
/// - `"roof_3"` → prefix="roof", index=Some(3)
/// - `"roof_detail_10"` → prefix="roof_detail", index=Some(10)
/// - `"roof"` → prefix="roof", index=None
/// - `"roof_a"` → prefix="roof", index=None
pub fn parse_gallery_stem(stem: &str) -> GalleryStem {
    match stem.rsplit_once('_') {
        Some((prefix, tail)) => GalleryStem {
            prefix: prefix.to_string(),
            index: parse_digits(tail),
        },
        None => GalleryStem {
            prefix: stem.to_string(),
            index: parse_digits(stem),
        },
    }
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Whether a file stem carries the preview marker (`..._preview`).
pub fn is_preview_stem(stem: &str) -> bool {
    stem.ends_with(PREVIEW_MARKER)
}

/// Position of the file's extension in the supported list, if supported.
///
/// Matching is case-insensitive so `IMG_1.JPG` is accepted.
pub fn extension_rank(path: &Path) -> Option<usize> {
    let ext = path.extension()?.to_str()?;
    supported_input_extensions()
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(ext))
}

/// List the regular files directly inside `dir`, sorted by file name.
///
/// Returns an empty list when `dir` does not exist or cannot be read.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

/// Find `<base>.<ext>` in `dir`, trying supported extensions in priority order.
pub fn find_image_file(dir: &Path, base: &str) -> Option<PathBuf> {
    let candidates: Vec<(usize, PathBuf)> = list_files(dir)
        .into_iter()
        .filter(|p| p.file_stem().is_some_and(|s| s == base))
        .filter_map(|p| extension_rank(&p).map(|rank| (rank, p)))
        .collect();
    candidates
        .into_iter()
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, p)| p)
}

/// File stem as an owned string (lossy for non-UTF-8 names).
pub fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Directory base name, used as the record identifier.
pub fn dir_id(dir: &Path) -> String {
    dir.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn logo_base(brand_id: &str) -> String {
    format!("{brand_id}_logo")
}

pub fn main_base(material_id: &str) -> String {
    format!("{material_id}_main")
}

pub fn main_caption_file(material_id: &str) -> String {
    format!("{material_id}_main{CAPTION_SUFFIX}")
}

pub fn preview_base(material_id: &str) -> String {
    format!("{material_id}{PREVIEW_MARKER}")
}

/// Scope shared by all stored assets of one material: `{brand}_{material}`.
pub fn material_scope(brand_id: &str, material_id: &str) -> String {
    format!("{brand_id}_{material_id}")
}

pub fn main_asset_name(scope: &str) -> String {
    format!("{scope}_main")
}

pub fn preview_asset_name(scope: &str) -> String {
    format!("{scope}_preview")
}

pub fn gallery_asset_name(scope: &str, index: u32) -> String {
    format!("{scope}_gallery_{index}")
}

pub fn gallery_preview_asset_name(scope: &str, index: u32) -> String {
    format!("{scope}_gallery_preview_{index}")
}

/// Stored file name for a logical asset name.
pub fn stored_file_name(logical_name: &str) -> String {
    format!("{logical_name}.{OUTPUT_EXTENSION}")
}

//! Gallery resolution for a single material.
//!
//! A material's `gallery/` directory holds numbered images with optional
//! sidecars:
//!
//! ```text
//! gallery/
//! ├── roof_1.jpg
//! ├── roof_1_name.txt        # caption "Slate Gray"
//! ├── roof_1_preview.png     # custom preview for entry 1
//! ├── roof_2.jpg
//! └── roof_2_name.txt        # caption "Autumn Blend"
//! ```
//!
//! ## Ordering
//!
//! Candidates are sorted by their trailing numeric index. Ties (including
//! every file without a numeric suffix, which lands in bucket 0) are broken
//! by extension priority, then file name.
//!
//! ## Dropped entries
//!
//! Captions are unique within a gallery. An entry is dropped when:
//!
//! - its caption equals the material's main-image caption (both non-empty);
//! - its image fails to ingest;
//! - its caption was already used by an earlier entry. The empty caption
//!   counts too, so only the first uncaptioned image survives.
//!
//! The last rule discards images rather than disambiguating them. Catalogs
//! already published depend on it, so it is kept as is.
//!
//! ## Previews
//!
//! An entry's preview is its `<prefix>_<N>_preview.<ext>` sidecar when that
//! exists and ingests; otherwise the entry's own image URL with the custom
//! flag cleared.

use crate::imaging::ImageBackend;
use crate::naming::{
    self, GalleryStem, extension_rank, find_image_file, gallery_asset_name,
    gallery_preview_asset_name, is_preview_stem, list_files, parse_gallery_stem,
};
use crate::record::read_caption;
use crate::store::AssetStore;
use crate::types::Gallery;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One gallery image file awaiting resolution.
#[derive(Debug, Clone)]
struct Candidate {
    path: PathBuf,
    stem: GalleryStem,
    ext_rank: usize,
}

/// Discover gallery images in `gallery_dir`, sorted by index.
///
/// Preview images are excluded; they are looked up per entry.
fn collect_candidates(gallery_dir: &Path) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = list_files(gallery_dir)
        .into_iter()
        .filter_map(|path| {
            let ext_rank = extension_rank(&path)?;
            let stem = naming::stem_of(&path);
            if is_preview_stem(&stem) {
                return None;
            }
            Some(Candidate {
                stem: parse_gallery_stem(&stem),
                path,
                ext_rank,
            })
        })
        .collect();

    // list_files is name-sorted, so a stable sort keeps name order within ties
    candidates.sort_by_key(|c| (c.stem.sort_index(), c.ext_rank));
    candidates
}

/// Resolve the gallery of one material.
///
/// `scope` is the material's asset scope (`{brand}_{material}`) used to name
/// stored files; `main_caption` is the caption of the material's main image.
pub fn resolve_gallery<B: ImageBackend>(
    store: &mut AssetStore<'_, B>,
    gallery_dir: &Path,
    scope: &str,
    main_caption: &str,
) -> Gallery {
    let mut gallery = Gallery::default();

    for candidate in collect_candidates(gallery_dir) {
        let Some(index) = candidate.stem.index else {
            debug!(path = %candidate.path.display(), "gallery image has no numeric index, skipping");
            continue;
        };

        let caption = read_caption(&gallery_dir.join(candidate.stem.caption_file()));

        if !main_caption.is_empty() && caption == main_caption {
            info!(caption = %caption, "skipping gallery image that duplicates main image");
            continue;
        }

        let Some(image_url) = store.ingest(&candidate.path, &gallery_asset_name(scope, index))
        else {
            continue;
        };

        let (preview_url, custom_preview) =
            resolve_preview(store, gallery_dir, &candidate.stem, scope, index)
                .map(|url| (url, true))
                .unwrap_or_else(|| (image_url.clone(), false));

        if gallery.contains_caption(&caption) {
            info!(caption = %caption, "found duplicate image name, skipping");
            continue;
        }

        gallery.push(image_url, caption, preview_url, custom_preview);
    }

    gallery
}

/// Ingest the entry's preview sidecar, if there is one and it converts.
fn resolve_preview<B: ImageBackend>(
    store: &mut AssetStore<'_, B>,
    gallery_dir: &Path,
    stem: &GalleryStem,
    scope: &str,
    index: u32,
) -> Option<String> {
    let preview_path = find_image_file(gallery_dir, &stem.preview_base())?;
    let url = store.ingest(&preview_path, &gallery_preview_asset_name(scope, index));
    if url.is_none() {
        warn!(
            path = %preview_path.display(),
            "gallery preview unusable, falling back to the gallery image"
        );
    }
    url
}

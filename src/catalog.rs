//! Catalog compilation: brands → materials → one JSON document.
//!
//! ## Traversal
//!
//! ```text
//! <source_dir>/
//! ├── acme/                          # brand (sorted by name)
//! │   ├── config.json
//! │   ├── acme_logo.png
//! │   └── materials/
//! │       └── shingle-a/             # material (sorted by name)
//! │           ├── config.json
//! │           ├── description.html
//! │           ├── shingle-a_main.jpg
//! │           ├── shingle-a_main_name.txt
//! │           ├── shingle-a_preview.png
//! │           └── gallery/
//! └── ...
//! ```
//!
//! Brand and material directories are visited in lexicographic order so the
//! same tree always compiles to the same document, and the same content
//! always claims the same stored file name.
//!
//! ## Failure policy
//!
//! Only an unreadable source root (or an unwritable output) fails the run.
//! A brand or material without a usable config is skipped; a missing or
//! unconvertible image leaves its URL empty. Each case is logged.
//!
//! ## Output
//!
//! The document maps brand id → brand object. Stored images go to the images
//! directory; files from earlier runs that this run did not write are kept
//! and listed in [`CompileResult::preserved`].

use crate::config::CatalogConfig;
use crate::gallery::resolve_gallery;
use crate::imaging::{ImageBackend, Quality, RustBackend};
use crate::naming::{
    GALLERY_DIR, MATERIALS_DIR, dir_id, find_image_file, logo_base, main_asset_name, main_base,
    main_caption_file, material_scope, preview_asset_name, preview_base,
};
use crate::record::{load_description, load_record, read_caption};
use crate::store::{AssetStore, CompileStats, scan_existing_assets};
use crate::types::{
    BRAND_COMPUTED_KEYS, Brand, Catalog, Gallery, MATERIAL_COMPUTED_KEYS, Material,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Cannot read source directory {0}: {1}")]
    SourceUnreadable(PathBuf, std::io::Error),
}

/// Everything a compilation run produced besides the files on disk.
#[derive(Debug)]
pub struct CompileResult {
    pub catalog: Catalog,
    pub stats: CompileStats,
    /// Distinct source contents stored this run.
    pub unique_assets: usize,
    /// Stored images present before the run.
    pub existing_assets: usize,
    /// Stored images from earlier runs not referenced by this run.
    pub preserved: BTreeSet<String>,
    pub catalog_path: PathBuf,
    pub images_dir: PathBuf,
}

/// Compile the catalog described by `config` with the production backend.
pub fn compile(config: &CatalogConfig) -> Result<CompileResult, CatalogError> {
    compile_with_backend(&RustBackend::new(), config)
}

/// Compile using a specific backend (allows testing with mock).
#[instrument(skip_all, fields(source = %config.source_dir.display()))]
pub fn compile_with_backend(
    backend: &impl ImageBackend,
    config: &CatalogConfig,
) -> Result<CompileResult, CatalogError> {
    let images_dir = config.images_path();
    fs::create_dir_all(&images_dir)?;

    let existing = scan_existing_assets(&images_dir)?;
    info!(count = existing.len(), "found existing images in output directory");

    let mut store = AssetStore::new(
        backend,
        &images_dir,
        &config.image_prefix,
        Quality::new(config.images.quality),
    );
    let catalog = build_catalog(&mut store, &config.source_dir)?;

    let catalog_path = config.catalog_path();
    write_catalog(&catalog_path, &catalog)?;

    let preserved = store.preserved_assets(&existing);
    for name in &preserved {
        info!(name = %name, "image not in new data but preserving");
    }

    Ok(CompileResult {
        catalog,
        stats: store.stats().clone(),
        unique_assets: store.unique_assets(),
        existing_assets: existing.len(),
        preserved,
        catalog_path,
        images_dir,
    })
}

/// Walk every brand under `source_root` and assemble the catalog.
pub fn build_catalog<B: ImageBackend>(
    store: &mut AssetStore<'_, B>,
    source_root: &Path,
) -> Result<Catalog, CatalogError> {
    let brand_dirs = subdirectories(source_root)
        .map_err(|e| CatalogError::SourceUnreadable(source_root.to_path_buf(), e))?;

    let mut catalog = Catalog::new();
    for brand_dir in brand_dirs {
        if let Some(brand) = compile_brand(store, &brand_dir) {
            catalog.insert(brand.id.clone(), brand);
        }
    }
    Ok(catalog)
}

/// Assemble one brand, or `None` when its config is unusable.
pub fn compile_brand<B: ImageBackend>(
    store: &mut AssetStore<'_, B>,
    brand_dir: &Path,
) -> Option<Brand> {
    let mut record = load_record(brand_dir)?;
    record.strip(BRAND_COMPUTED_KEYS);
    let brand_id = record.id.clone();

    let logo_name = logo_base(&brand_id);
    let logo = match find_image_file(brand_dir, &logo_name) {
        Some(path) => store.ingest(&path, &logo_name).unwrap_or_default(),
        None => {
            warn!(brand = %brand_id, "no logo for brand");
            String::new()
        }
    };

    let materials_dir = brand_dir.join(MATERIALS_DIR);
    let material_dirs = if materials_dir.is_dir() {
        subdirectories(&materials_dir).unwrap_or_else(|e| {
            warn!(dir = %materials_dir.display(), error = %e, "cannot read materials directory");
            Vec::new()
        })
    } else {
        Vec::new()
    };

    let materials = material_dirs
        .iter()
        .filter_map(|dir| compile_material(store, dir, &brand_id))
        .collect();

    Some(Brand {
        fields: record.fields,
        id: brand_id,
        logo,
        materials,
    })
}

/// Assemble one material, or `None` when its config is unusable.
pub fn compile_material<B: ImageBackend>(
    store: &mut AssetStore<'_, B>,
    material_dir: &Path,
    brand_id: &str,
) -> Option<Material> {
    let mut record = load_record(material_dir)?;
    let simple_mode = record.take_or("simpleMode", false);
    let enabled = record.take_or("enabled", true);
    record.strip(MATERIAL_COMPUTED_KEYS);

    let material_id = record.id.clone();
    let scope = material_scope(brand_id, &material_id);
    let description = load_description(material_dir);

    let image = match find_image_file(material_dir, &main_base(&material_id)) {
        Some(path) => store
            .ingest(&path, &main_asset_name(&scope))
            .unwrap_or_default(),
        None => {
            warn!(material = %material_id, "no main image for material");
            String::new()
        }
    };

    let main_caption = read_caption(&material_dir.join(main_caption_file(&material_id)));

    let custom_preview = find_image_file(material_dir, &preview_base(&material_id))
        .and_then(|path| {
            let url = store.ingest(&path, &preview_asset_name(&scope));
            if url.is_none() {
                warn!(material = %material_id, "preview image unusable, falling back to main image");
            }
            url
        });
    let (primary_preview_image, use_custom_primary_preview) = match custom_preview {
        Some(url) => (url, true),
        None => (image.clone(), false),
    };

    let gallery_dir = material_dir.join(GALLERY_DIR);
    let gallery = if gallery_dir.is_dir() {
        resolve_gallery(store, &gallery_dir, &scope, &main_caption)
    } else {
        Gallery::default()
    };

    Some(Material {
        fields: record.fields,
        id: material_id,
        description,
        image,
        primary_preview_image,
        use_custom_primary_preview,
        gallery,
        simple_mode,
        enabled,
    })
}

/// Serialize the catalog as pretty-printed JSON.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(catalog)?;
    fs::write(path, json)?;
    Ok(())
}

/// Non-hidden subdirectories of `path`, sorted by name.
fn subdirectories(path: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && !dir_id(p).starts_with('.'))
        .collect();
    dirs.sort();
    Ok(dirs)
}

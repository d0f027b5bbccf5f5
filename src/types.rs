//! Catalog document types.
//!
//! These are the shapes written to the catalog JSON. Config fields loaded
//! from disk are carried verbatim in `fields` and flattened into the same
//! object as the computed fields, so a brand or material object contains
//! everything its `config.json` had plus the keys below.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Keys the compiler computes for every material. Config values under these
/// names are replaced, never duplicated.
pub const MATERIAL_COMPUTED_KEYS: &[&str] = &[
    "id",
    "description",
    "image",
    "primaryPreviewImage",
    "useCustomPrimaryPreview",
    "galleryImages",
    "galleryImagesNames",
    "galleryPreviewImages",
    "useCustomGalleryPreviews",
    "simpleMode",
    "enabled",
];

/// Keys the compiler computes for every brand.
pub const BRAND_COMPUTED_KEYS: &[&str] = &["id", "logo", "materials"];

/// The whole catalog: brand id → brand, ordered by id.
pub type Catalog = BTreeMap<String, Brand>;

#[derive(Debug, Clone, Serialize)]
pub struct Brand {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub id: String,
    /// Logo URL, empty when the brand has no usable logo.
    pub logo: String,
    pub materials: Vec<Material>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub id: String,
    /// Raw HTML, empty when there is no description file.
    pub description: String,
    /// Main image URL, empty when missing or unconvertible.
    pub image: String,
    /// Dedicated preview URL, or `image` when there is none.
    pub primary_preview_image: String,
    pub use_custom_primary_preview: bool,
    #[serde(flatten)]
    pub gallery: Gallery,
    /// Display mode flag: `false` when absent, otherwise the configured value.
    pub simple_mode: Value,
    /// `true` when absent, otherwise the configured value.
    pub enabled: Value,
}

/// Auxiliary images of a material as four index-aligned lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    pub gallery_images: Vec<String>,
    pub gallery_images_names: Vec<String>,
    pub gallery_preview_images: Vec<String>,
    pub use_custom_gallery_previews: Vec<bool>,
}

impl Gallery {
    pub fn push(&mut self, image: String, caption: String, preview: String, custom: bool) {
        self.gallery_images.push(image);
        self.gallery_images_names.push(caption);
        self.gallery_preview_images.push(preview);
        self.use_custom_gallery_previews.push(custom);
    }

    pub fn len(&self) -> usize {
        self.gallery_images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gallery_images.is_empty()
    }

    pub fn contains_caption(&self, caption: &str) -> bool {
        self.gallery_images_names.iter().any(|c| c == caption)
    }
}

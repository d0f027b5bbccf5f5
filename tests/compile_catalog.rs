//! End-to-end compilation with the real WebP backend.

use material_catalog::catalog::{CatalogError, compile};
use material_catalog::config::CatalogConfig;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PREFIX: &str = "https://cdn.example.com/materials/";

fn write_image(path: &Path, seed: u8) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbImage::from_fn(32, 24, |x, y| image::Rgb([x as u8 * 8, y as u8 * 8, seed]))
        .save(path)
        .unwrap();
}

struct Project {
    tmp: TempDir,
}

impl Project {
    fn new() -> Self {
        Self {
            tmp: TempDir::new().unwrap(),
        }
    }

    fn brands(&self) -> PathBuf {
        self.tmp.path().join("brands")
    }

    fn config(&self) -> CatalogConfig {
        CatalogConfig {
            source_dir: self.brands(),
            output_dir: self.tmp.path().join("out"),
            image_prefix: PREFIX.to_string(),
            ..CatalogConfig::default()
        }
    }

    fn write(&self, rel: &str, contents: &str) {
        let path = self.brands().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn image(&self, rel: &str, seed: u8) {
        write_image(&self.brands().join(rel), seed);
    }

    fn document(&self) -> Value {
        let text = fs::read_to_string(self.config().catalog_path()).unwrap();
        serde_json::from_str(&text).unwrap()
    }
}

/// acme with a logo and one material with only a main image.
fn acme() -> Project {
    let project = Project::new();
    project.write("acme/config.json", r#"{"name": "  Acme Roofing  "}"#);
    project.image("acme/acme_logo.png", 1);
    project.write("acme/materials/shingle-a/config.json", r#"{"price": 12}"#);
    project.image("acme/materials/shingle-a/shingle-a_main.jpg", 2);
    project
}

#[test]
fn single_material_document_shape() {
    let project = acme();
    let result = compile(&project.config()).unwrap();
    let doc = project.document();

    let main_url = format!("{PREFIX}acme_shingle-a_main.webp");
    assert_eq!(doc["acme"]["id"], "acme");
    assert_eq!(doc["acme"]["name"], "Acme Roofing");
    assert_eq!(doc["acme"]["logo"], format!("{PREFIX}acme_logo.webp"));

    let material = &doc["acme"]["materials"][0];
    assert_eq!(material["id"], "shingle-a");
    assert_eq!(material["price"], 12);
    assert_eq!(material["description"], "");
    assert_eq!(material["image"], main_url.as_str());
    assert_eq!(material["primaryPreviewImage"], main_url.as_str());
    assert_eq!(material["useCustomPrimaryPreview"], false);
    assert_eq!(material["galleryImages"], json!([]));
    assert_eq!(material["galleryImagesNames"], json!([]));
    assert_eq!(material["galleryPreviewImages"], json!([]));
    assert_eq!(material["useCustomGalleryPreviews"], json!([]));
    assert_eq!(material["simpleMode"], false);
    assert_eq!(material["enabled"], true);

    assert_eq!(result.stats.images_processed, 2);
    assert_eq!(result.unique_assets, 2);
}

#[test]
fn stored_images_are_webp() {
    let project = acme();
    compile(&project.config()).unwrap();

    let images = project.config().images_path();
    for name in ["acme_logo.webp", "acme_shingle-a_main.webp"] {
        let bytes = fs::read(images.join(name)).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF", "{name}");
        assert_eq!(&bytes[8..12], b"WEBP", "{name}");
    }
}

#[test]
fn gallery_with_previews_and_captions() {
    let project = acme();
    let gallery = "acme/materials/shingle-a/gallery";
    project.image(&format!("{gallery}/roof_2.jpg"), 20);
    project.write(&format!("{gallery}/roof_2_name.txt"), "Autumn Blend\n");
    project.image(&format!("{gallery}/roof_1.png"), 10);
    project.write(&format!("{gallery}/roof_1_name.txt"), "Slate Gray");
    project.image(&format!("{gallery}/roof_1_preview.jpg"), 11);

    compile(&project.config()).unwrap();
    let material = &project.document()["acme"]["materials"][0];

    assert_eq!(
        material["galleryImages"],
        json!([
            format!("{PREFIX}acme_shingle-a_gallery_1.webp"),
            format!("{PREFIX}acme_shingle-a_gallery_2.webp"),
        ])
    );
    assert_eq!(
        material["galleryImagesNames"],
        json!(["Slate Gray", "Autumn Blend"])
    );
    assert_eq!(
        material["galleryPreviewImages"],
        json!([
            format!("{PREFIX}acme_shingle-a_gallery_preview_1.webp"),
            format!("{PREFIX}acme_shingle-a_gallery_2.webp"),
        ])
    );
    assert_eq!(material["useCustomGalleryPreviews"], json!([true, false]));
}

#[test]
fn images_are_decoded_by_content_not_extension() {
    let project = acme();
    let material = "acme/materials/shingle-b";
    project.write(&format!("{material}/config.json"), "{}");
    project.image(&format!("{material}/upload.png"), 9);
    fs::rename(
        project.brands().join(format!("{material}/upload.png")),
        project.brands().join(format!("{material}/shingle-b_main.jpg")),
    )
    .unwrap();

    let result = compile(&project.config()).unwrap();
    let material = &project.document()["acme"]["materials"][1];

    assert_eq!(material["id"], "shingle-b");
    assert_eq!(
        material["image"],
        format!("{PREFIX}acme_shingle-b_main.webp")
    );
    assert_eq!(result.stats.images_processed, 3);
}

#[test]
fn legacy_images_are_preserved() {
    let project = acme();
    let images = project.config().images_path();
    fs::create_dir_all(&images).unwrap();
    fs::write(images.join("legacy.webp"), b"old").unwrap();

    let result = compile(&project.config()).unwrap();

    assert!(images.join("legacy.webp").exists());
    assert_eq!(
        result.preserved.iter().collect::<Vec<_>>(),
        vec!["legacy.webp"]
    );
    assert_eq!(result.existing_assets, 1);
}

#[test]
fn missing_source_root_fails() {
    let project = Project::new();
    let result = compile(&project.config());
    assert!(matches!(result, Err(CatalogError::SourceUnreadable(..))));
}

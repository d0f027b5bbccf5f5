//! CLI output formatting for a compilation run.
//!
//! # Output Format
//!
//! ```text
//! Catalog
//!     2 brands, 5 materials
//!
//! Images
//!     Processed: 12
//!     Original: 3.21 MB
//!     WebP: 1.02 MB
//!     Saved: 2.19 MB (68.2%)
//!     Average saved: 187.3 KB per image
//!     Unique assets: 12
//!     Preserved: 1
//!         legacy.webp
//!
//! Output
//!     Catalog: output/all-companies.json
//!     Images: output/images
//!     URL prefix: https://catalog.sky-quote.com/RoofingMaterials/Images/
//!     Quality: 90
//! ```
//!
//! # Architecture
//!
//! [`format_compile_report`] returns `Vec<String>` for testability and
//! [`print_compile_report`] writes it to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::catalog::CompileResult;
use crate::config::CatalogConfig;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn megabytes(bytes: f64) -> String {
    format!("{:.2} MB", bytes / 1024.0 / 1024.0)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Format the end-of-run summary.
pub fn format_compile_report(result: &CompileResult, config: &CatalogConfig) -> Vec<String> {
    let mut lines = Vec::new();
    let stats = &result.stats;

    let material_count: usize = result.catalog.values().map(|b| b.materials.len()).sum();
    lines.push("Catalog".to_string());
    lines.push(format!(
        "{}{}, {}",
        indent(1),
        plural(result.catalog.len(), "brand", "brands"),
        plural(material_count, "material", "materials"),
    ));

    lines.push(String::new());
    lines.push("Images".to_string());
    lines.push(format!("{}Processed: {}", indent(1), stats.images_processed));
    lines.push(format!(
        "{}Original: {}",
        indent(1),
        megabytes(stats.bytes_before as f64)
    ));
    lines.push(format!(
        "{}WebP: {}",
        indent(1),
        megabytes(stats.bytes_after as f64)
    ));
    lines.push(format!(
        "{}Saved: {} ({:.1}%)",
        indent(1),
        megabytes(stats.bytes_saved() as f64),
        stats.reduction_percent()
    ));
    if let Some(avg) = stats.average_saved() {
        lines.push(format!(
            "{}Average saved: {:.1} KB per image",
            indent(1),
            avg / 1024.0
        ));
    }
    lines.push(format!("{}Unique assets: {}", indent(1), result.unique_assets));
    lines.push(format!("{}Preserved: {}", indent(1), result.preserved.len()));
    for name in &result.preserved {
        lines.push(format!("{}{}", indent(2), name));
    }

    lines.push(String::new());
    lines.push("Output".to_string());
    lines.push(format!(
        "{}Catalog: {}",
        indent(1),
        result.catalog_path.display()
    ));
    lines.push(format!("{}Images: {}", indent(1), result.images_dir.display()));
    lines.push(format!("{}URL prefix: {}", indent(1), config.image_prefix));
    lines.push(format!("{}Quality: {}", indent(1), config.images.quality));

    lines
}

/// Print the end-of-run summary to stdout.
pub fn print_compile_report(result: &CompileResult, config: &CatalogConfig) {
    for line in format_compile_report(result, config) {
        println!("{}", line);
    }
}

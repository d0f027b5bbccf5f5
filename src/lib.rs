//! # Material Catalog
//!
//! Compiles a tree of per-brand, per-material directories into a single JSON
//! catalog document plus a directory of WebP images served from a public URL
//! prefix. The filesystem is the data source: each brand and material is a
//! directory with a `config.json`, and images are found by naming convention.
//!
//! # Pipeline
//!
//! ```text
//! data/brands/  →  catalog::compile  →  output/all-companies.json
//!                                    →  output/images/*.webp
//! ```
//!
//! Compilation is a single pass. For every material the record loader reads
//! its config, the gallery resolver collects auxiliary images, and the asset
//! store transcodes each distinct image once. The assembler accumulates the
//! results into the catalog and writes it out.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Sorted traversal, brand/material assembly, document writing, preservation report |
//! | [`store`] | Content-addressed image store: hashing, transcoding, run statistics |
//! | [`record`] | `config.json` loading and normalization, descriptions, captions |
//! | [`gallery`] | Gallery discovery, ordering, caption dedup, preview fallback |
//! | [`naming`] | File naming conventions for sources and stored assets |
//! | [`imaging`] | WebP transcoding behind the [`imaging::ImageBackend`] trait |
//! | [`types`] | Serialized document shapes (`Brand`, `Material`, `Gallery`) |
//! | [`config`] | Optional `catalog.toml` loading and validation |
//! | [`output`] | End-of-run report formatting |
//!
//! # Design Decisions
//!
//! ## Content Addressing
//!
//! Images are identified by the SHA-256 digest of their bytes. The first slot
//! to reference some content names the stored file; every later reference to
//! identical bytes, under any name, reuses that URL without transcoding. A
//! swatch shared by twenty materials is converted once.
//!
//! ## Append-Only Image Store
//!
//! The images directory is never cleaned. Files written by earlier runs that
//! the current run does not reference are reported as preserved and left in
//! place, since published pages may still link to them.
//!
//! ## Sorted Traversal
//!
//! Brand, material, and gallery directories are enumerated in lexicographic
//! order. Which slot first claims a given content decides its stored name, so
//! a stable order makes both the document and the image store reproducible.
//!
//! ## Explicit Run State
//!
//! The digest map, used-name set, and statistics live in an
//! [`store::AssetStore`] created per run and passed down by `&mut`. Nothing
//! is global, so tests can compile several trees in one process.
//!
//! ## Forgiving Inputs
//!
//! Bad source data never aborts a run. A brand or material with a missing or
//! malformed config is skipped, a missing or corrupt image leaves an empty
//! URL, and every such case is logged through `tracing`. Only an unreadable
//! source root or an unwritable output fails compilation.

pub mod catalog;
pub mod config;
pub mod gallery;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod record;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

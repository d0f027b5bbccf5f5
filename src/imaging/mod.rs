//! Image transcoding: decode anything the catalog accepts, write lossy WebP.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (JPEG, PNG, GIF, BMP, TIFF, WebP) | `image::ImageReader` |
//! | **Encode → WebP** | `webp::Encoder` (libwebp, lossy) |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use params::{Quality, TranscodeParams};
pub use rust_backend::{RustBackend, supported_input_extensions};

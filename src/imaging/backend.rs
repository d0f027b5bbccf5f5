//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between catalog logic and pixel
//! work: the asset store only ever asks a backend to turn one source file
//! into one stored output file.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::TranscodeParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Decode `params.source` and write it re-encoded to `params.output`.
    ///
    /// On error the output file may or may not exist; callers must not
    /// reference it.
    fn transcode(&self, params: &TranscodeParams) -> Result<(), BackendError>;
}

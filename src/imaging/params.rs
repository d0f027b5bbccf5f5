//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. The
//! [`AssetStore`](crate::store::AssetStore) decides which file becomes which
//! stored asset; the [`backend`](super::backend) does the pixel work. Keeping
//! the two apart lets the store be tested against a mock backend.
//!
//! ## Types
//!
//! - [`Quality`]: lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`TranscodeParams`]: source, output path and quality of one transcode.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Parameters for a decode → re-encode operation.
///
/// The output format is inferred from the extension of `output`.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub quality: Quality,
}

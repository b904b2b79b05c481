//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the placeholder
//! pipeline needs: identify (read dimensions from encoded bytes) and
//! placeholder (decode, downsample, blur, re-encode as JPEG).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use super::params::PlaceholderParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Unrecognized image data: {0}")]
    UnknownFormat(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image backends.
///
/// `Sync` because placeholders for one batch are built concurrently on the
/// rayon pool, all sharing a single backend.
pub trait ImageBackend: Sync {
    /// Read dimensions from the encoded image header.
    fn identify(&self, source: &[u8]) -> Result<Dimensions, BackendError>;

    /// Produce encoded JPEG bytes for a placeholder.
    fn placeholder(&self, params: &PlaceholderParams<'_>) -> Result<Vec<u8>, BackendError>;
}

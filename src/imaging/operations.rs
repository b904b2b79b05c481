//! High-level image operations.
//!
//! Combines calculations with backend execution: read the source size,
//! decide the placeholder size, hand the work to the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::calculate_placeholder_dimensions;
use super::params::{Blur, PlaceholderParams, Quality};

/// Configuration for placeholder generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderConfig {
    /// Width bound in pixels. Height follows the aspect ratio.
    pub max_width: u32,
    pub blur: Blur,
    pub quality: Quality,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            max_width: 20,
            blur: Blur::default(),
            quality: Quality::default(),
        }
    }
}

/// Build encoded placeholder bytes from an encoded source image.
pub fn create_placeholder(
    backend: &(impl ImageBackend + ?Sized),
    source: &[u8],
    config: &PlaceholderConfig,
) -> Result<Vec<u8>, BackendError> {
    let dims = backend.identify(source)?;
    let (width, height) =
        calculate_placeholder_dimensions((dims.width, dims.height), config.max_width);

    backend.placeholder(&PlaceholderParams {
        source,
        width,
        height,
        blur: config.blur,
        quality: config.quality,
    })
}

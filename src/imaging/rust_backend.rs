//! Pure Rust placeholder backend built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, WebP, GIF) | `image::ImageReader::decode` (format sniffed) |
//! | Downsample | `DynamicImage::resize_exact` with `Triangle` filter |
//! | Blur | `image::imageops::blur` (Gaussian) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder::new_with_quality` |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::PlaceholderParams;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

/// Backend using the `image` crate's pure Rust codecs.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn reader(source: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, BackendError> {
    ImageReader::new(Cursor::new(source))
        .with_guessed_format()
        .map_err(|e| BackendError::UnknownFormat(e.to_string()))
}

fn decode(source: &[u8]) -> Result<DynamicImage, BackendError> {
    reader(source)?
        .decode()
        .map_err(|e| BackendError::ProcessingFailed(format!("Failed to decode: {e}")))
}

/// Encode as baseline JPEG. JPEG has no alpha channel, so flatten to RGB first.
fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, BackendError> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut out = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {e}")))?;
    Ok(out)
}

impl ImageBackend for RustBackend {
    fn identify(&self, source: &[u8]) -> Result<Dimensions, BackendError> {
        let (width, height) = reader(source)?.into_dimensions().map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {e}"))
        })?;
        Ok(Dimensions { width, height })
    }

    fn placeholder(&self, params: &PlaceholderParams<'_>) -> Result<Vec<u8>, BackendError> {
        let img = decode(params.source)?;
        let small = img.resize_exact(params.width, params.height, FilterType::Triangle);

        let blurred = if params.blur.is_noop() {
            small
        } else {
            DynamicImage::from(image::imageops::blur(&small, params.blur.sigma))
        };

        encode_jpeg(&blurred, params.quality.value() as u8)
    }
}

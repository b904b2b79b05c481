//! Parameter types for placeholder encoding.
//!
//! These structs describe *what* to produce, not *how*. They sit between
//! [`operations`](super::operations), which decides the target size, and the
//! [`backend`](super::backend), which does the pixel work.
//!
//! - [`Quality`]: JPEG quality (1–100). Clamped on construction.
//! - [`Blur`]: Gaussian blur sigma applied after downsampling.
//! - [`PlaceholderParams`]: source bytes, output dimensions, blur, quality.

/// Quality setting for lossy JPEG encoding (1-100).
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
        Self(20)
    }
}

/// Gaussian blur applied to the downsampled placeholder.
///
/// A sigma of 0 disables the blur.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blur {
    pub sigma: f32,
}

impl Blur {
    pub fn new(sigma: f32) -> Self {
        Self {
            sigma: if sigma.is_finite() { sigma.max(0.0) } else { 0.0 },
        }
    }

    pub fn is_noop(self) -> bool {
        self.sigma == 0.0
    }
}

impl Default for Blur {
    fn default() -> Self {
        Self { sigma: 3.0 }
    }
}

/// Everything the backend needs for one placeholder encode.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderParams<'a> {
    /// Encoded source image (JPEG, PNG, WebP or GIF).
    pub source: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub blur: Blur,
    pub quality: Quality,
}

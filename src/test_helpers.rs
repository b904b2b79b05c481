//! Shared test utilities for the gallery-lqip test suite.
//!
//! Provides sample content documents, an in-memory [`MockSource`] standing in
//! for the image host, and synthetic encoded images.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let source = MockSource::new()
//!     .with_image("a.jpg", b"400x300")
//!     .with_status("b.jpg", 404);
//! let ids = scan(&sample_document());
//! ```

use crate::content::Document;
use crate::remote::{FetchError, ImageSource};
use image::{DynamicImage, ImageEncoder, RgbImage, RgbaImage};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// =========================================================================
// Documents
// =========================================================================

/// Wrap a JSON literal as a document. Panics if `sections` is missing.
pub fn doc(value: Value) -> Document {
    Document::from_value(value).unwrap()
}

/// One of each section kind, with `a.jpg` referenced twice.
///
/// ```text
/// gallery          a.jpg b.jpg
/// galleryWithTags  c.jpg | tag Ink: d.jpg a.jpg | tag Wood: e.jpg
/// info             portrait.jpg
/// contact          (unknown type)
/// ```
pub fn sample_document() -> Document {
    doc(json!({
        "title": "Studio",
        "sections": [
            {"type": "gallery", "title": "Prints", "items": [
                {"fileName": "a.jpg", "alt": "first"},
                {"fileName": "b.jpg"}
            ]},
            {"type": "galleryWithTags", "title": "Works",
             "items": [{"fileName": "c.jpg"}],
             "tags": [
                {"name": "Ink", "items": [{"fileName": "d.jpg"}, {"fileName": "a.jpg"}]},
                {"name": "Wood", "items": [{"fileName": "e.jpg"}]}
             ]},
            {"type": "info", "imageId": "portrait.jpg", "text": "About me"},
            {"type": "contact", "email": "hello@example.com"}
        ]
    }))
}

// =========================================================================
// Image source double
// =========================================================================

/// A single step recorded by [`MockSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    Started(String),
    Finished(String),
}

enum MockResponse {
    Bytes(Vec<u8>),
    Status(u16),
}

/// In-memory image host. Unknown identifiers answer HTTP 404.
///
/// Records start/finish order and the peak number of concurrent fetches so
/// tests can check batching.
#[derive(Default)]
pub struct MockSource {
    responses: HashMap<String, MockResponse>,
    delay: Duration,
    log: Mutex<Vec<SourceEvent>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, identifier: &str, bytes: &[u8]) -> Self {
        self.responses
            .insert(identifier.to_string(), MockResponse::Bytes(bytes.to_vec()));
        self
    }

    pub fn with_status(mut self, identifier: &str, status: u16) -> Self {
        self.responses
            .insert(identifier.to_string(), MockResponse::Status(status));
        self
    }

    /// Make every fetch take at least `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn events(&self) -> Vec<SourceEvent> {
        self.log.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SourceEvent::Started(_)))
            .count()
    }

    pub fn fetched(&self, identifier: &str) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SourceEvent::Started(id) if id == identifier))
            .count()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl ImageSource for MockSource {
    fn fetch(&self, identifier: &str) -> Result<Vec<u8>, FetchError> {
        self.log
            .lock()
            .unwrap()
            .push(SourceEvent::Started(identifier.to_string()));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        let url = format!("mock://{identifier}");
        let result = match self.responses.get(identifier) {
            Some(MockResponse::Bytes(bytes)) => Ok(bytes.clone()),
            Some(MockResponse::Status(status)) => Err(FetchError::Status {
                url,
                status: *status,
            }),
            None => Err(FetchError::Status { url, status: 404 }),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.log
            .lock()
            .unwrap()
            .push(SourceEvent::Finished(identifier.to_string()));
        result
    }
}

// =========================================================================
// Synthetic images
// =========================================================================

/// A gradient JPEG of the given size.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    out
}

/// A half-transparent PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        image::Rgba([200, (x % 256) as u8, 40, if x % 2 == 0 { 255 } else { 0 }])
    });
    let mut out = std::io::Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

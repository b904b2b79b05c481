//! Placeholder image processing in pure Rust with the `image` crate codecs.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Downsample** | `resize_exact` (Triangle) to a width-capped size |
//! | **Blur** | `image::imageops::blur` |
//! | **Encode** | `JpegEncoder` at low quality |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing an encode
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::calculate_placeholder_dimensions;
pub use operations::{PlaceholderConfig, create_placeholder};
pub use params::{Blur, PlaceholderParams, Quality};
pub use rust_backend::RustBackend;

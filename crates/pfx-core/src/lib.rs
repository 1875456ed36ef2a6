//! # pfx-core
//!
//! Core types for RGBA pixel effects.
//!
//! This crate provides the foundational types used throughout pfx-rs:
//!
//! - [`Pixel`] - One RGBA sample on the byte scale, `f32` for intermediate math
//! - [`PixelBuffer`] - Row-major RGBA8 raster with bounds-checked access
//! - [`Hsv`] and the [`hsv`] conversions - RGB ↔ HSV primitives
//! - [`Intensity`] - Named luminance estimators
//!
//! ## Crate Structure
//!
//! ```text
//! pfx-core (this crate)
//!    ^
//!    |
//!    +-- pfx-ops (algorithms, engine, resolver)
//!           ^
//!           |
//!           +-- pfx-queue (per-target sequencer)
//! ```
//!
//! Decoding images into a [`PixelBuffer`] and encoding them back out is left
//! to callers; this crate only defines the raster.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod hsv;
pub mod intensity;
pub mod pixel;

// Re-exports for convenience
pub use buffer::{PixelBuffer, CHANNELS};
pub use error::{Error, Result};
pub use hsv::{hsv_to_rgb, normalize_hue, rgb_to_hsv, Hsv};
pub use intensity::Intensity;
pub use pixel::{clamp_channel, quantize, Pixel, CHANNEL_MAX};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use pfx_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::error::{Error, Result};
    pub use crate::hsv::Hsv;
    pub use crate::intensity::Intensity;
    pub use crate::pixel::Pixel;
}

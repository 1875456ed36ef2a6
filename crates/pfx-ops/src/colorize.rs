//! Per-channel color blending.
//!
//! Applies a [`BlendMode`] independently to red, green and blue, each with its
//! own amount. An optional grayscale pre-step collapses the pixel to one
//! intensity first, which turns the blend into a tint.
//!
//! # Example
//!
//! ```rust
//! use pfx_ops::{BlendMode, Colorize};
//! use pfx_core::{Intensity, Pixel};
//!
//! // +25% green on top of an average grayscale
//! let tint = Colorize::new(BlendMode::Add, [0.0, 0.25, 0.0]).with_grayscale(Intensity::Average);
//! let px = tint.apply_pixel(Pixel::new(30.0, 60.0, 90.0, 255.0));
//! assert_eq!(px.to_bytes(), [60, 124, 60, 255]);
//! ```

use crate::blend::BlendMode;
use crate::grayscale::Grayscale;
use crate::op::{PixelOp, Sample};
use pfx_core::{Intensity, Pixel};

/// Colorize parameters, amounts already converted to ratios.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Colorize {
    /// Blend mode applied to each channel.
    pub mode: BlendMode,
    /// Red amount (negative = keep, in replace mode).
    pub r: f32,
    /// Green amount.
    pub g: f32,
    /// Blue amount.
    pub b: f32,
    /// Grayscale pre-step, run before the blend.
    pub grayscale: Option<Grayscale>,
}

impl Colorize {
    /// Colorize with per-channel amounts `[r, g, b]`.
    pub fn new(mode: BlendMode, rgb: [f32; 3]) -> Self {
        Self {
            mode,
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            grayscale: None,
        }
    }

    /// Adds a grayscale pre-step.
    pub fn with_grayscale(mut self, estimator: Intensity) -> Self {
        self.grayscale = Some(Grayscale::new(estimator));
        self
    }

    /// Colorizes a single pixel.
    #[inline]
    pub fn apply_pixel(&self, px: Pixel) -> Pixel {
        let px = match &self.grayscale {
            Some(gray) => gray.apply_pixel(px),
            None => px,
        };
        px.with_rgb([
            self.mode.channel(px.r, self.r),
            self.mode.channel(px.g, self.g),
            self.mode.channel(px.b, self.b),
        ])
    }
}

impl PixelOp for Colorize {
    fn name(&self) -> &'static str {
        "colorize"
    }

    fn apply(&self, px: Pixel, _at: &Sample<'_>) -> Pixel {
        self.apply_pixel(px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PX: Pixel = Pixel::new(100.0, 100.0, 100.0, 50.0);

    #[test]
    fn test_add() {
        let c = Colorize::new(BlendMode::Add, [0.0, 0.2, -0.2]);
        assert_eq!(c.apply_pixel(PX).to_bytes(), [100, 151, 49, 50]);
    }

    #[test]
    fn test_multiply() {
        let c = Colorize::new(BlendMode::Multiply, [0.25, 2.0, -1.0]);
        assert_eq!(c.apply_pixel(PX).to_bytes(), [125, 255, 0, 50]);
    }

    #[test]
    fn test_replace_keeps_negative_channels() {
        let c = Colorize::new(BlendMode::Replace, [-0.01, 0.25, -0.01]);
        assert_eq!(c.apply_pixel(PX).to_bytes(), [100, 64, 100, 50]);
    }

    #[test]
    fn test_grayscale_runs_first() {
        let c = Colorize::new(BlendMode::Add, [0.0, 0.0, 0.0]).with_grayscale(Intensity::Red);
        let px = c.apply_pixel(Pixel::new(10.0, 20.0, 30.0, 255.0));
        assert_eq!(px.rgb(), [10.0, 10.0, 10.0]);
    }
}

//! Grayscale conversion.
//!
//! Sets `r = g = b` to one [`Intensity`] estimate. Alpha is kept.

use crate::op::{PixelOp, Sample};
use pfx_core::{Intensity, Pixel};

/// Grayscale parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grayscale {
    /// Estimator assigned to all three color channels.
    pub estimator: Intensity,
}

impl Grayscale {
    /// Grayscale with the given estimator.
    pub fn new(estimator: Intensity) -> Self {
        Self { estimator }
    }

    /// Converts a single pixel.
    #[inline]
    pub fn apply_pixel(&self, px: Pixel) -> Pixel {
        px.with_gray(self.estimator.estimate(&px))
    }
}

impl PixelOp for Grayscale {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn apply(&self, px: Pixel, _at: &Sample<'_>) -> Pixel {
        self.apply_pixel(px)
    }
}

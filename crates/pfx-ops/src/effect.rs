//! Effects: inversion, threshold solarization and circular blur.
//!
//! # Effects
//!
//! - [`Inverse`] - `c' = 255 - c` on red, green and blue
//! - [`Solarize`] - [`Inverse`] applied only where an intensity estimate passes a threshold
//! - [`Blur`] - mean of the color channels over a disc of neighbors
//!
//! [`Blur`] is the one neighborhood operation: it reads pixels around the one
//! it writes and therefore declares [`Access::Neighborhood`]. The engine
//! serves its reads from a snapshot taken before the pass.
//!
//! # Example
//!
//! ```rust
//! use pfx_ops::effect::{Comparison, Solarize};
//! use pfx_core::{Intensity, Pixel};
//!
//! let solarize = Solarize::new(127.5, Comparison::Less, Intensity::Average);
//! assert_eq!(solarize.apply_pixel(Pixel::new(10.0, 10.0, 10.0, 255.0)).to_bytes(), [245, 245, 245, 255]);
//! assert_eq!(solarize.apply_pixel(Pixel::new(240.0, 240.0, 240.0, 255.0)).to_bytes(), [240, 240, 240, 255]);
//! ```

use crate::op::{Access, PixelOp, Sample};
use pfx_core::{Intensity, Pixel, CHANNEL_MAX};

/// Default blur radius in pixels.
pub const DEFAULT_BLUR_RADIUS: u32 = 3;

// ============================================================================
// Inverse
// ============================================================================

/// Color inversion. Alpha is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inverse;

impl Inverse {
    /// Inverts a single pixel.
    #[inline]
    pub fn apply_pixel(&self, px: Pixel) -> Pixel {
        px.map_rgb(|c| CHANNEL_MAX - c)
    }
}

impl PixelOp for Inverse {
    fn name(&self) -> &'static str {
        "effect.inverse"
    }

    fn apply(&self, px: Pixel, _at: &Sample<'_>) -> Pixel {
        self.apply_pixel(px)
    }
}

// ============================================================================
// Solarize
// ============================================================================

/// Threshold comparison for [`Solarize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Comparison {
    /// Invert when `intensity <= threshold`.
    #[default]
    Less,
    /// Invert when `intensity >= threshold`.
    Greater,
}

impl Comparison {
    /// Looks up a comparison by its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "less" => Some(Self::Less),
            "greater" => Some(Self::Greater),
            _ => None,
        }
    }

    /// Tests `intensity` against `threshold`. Both bounds are inclusive.
    #[inline]
    pub fn passes(self, intensity: f32, threshold: f32) -> bool {
        match self {
            Self::Less => intensity <= threshold,
            Self::Greater => intensity >= threshold,
        }
    }
}

/// Threshold-triggered inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solarize {
    /// Threshold on the byte scale (a request value of 50 arrives as 127.5).
    pub threshold: f32,
    /// Which side of the threshold is inverted.
    pub operator: Comparison,
    /// Estimator measured on the original pixel.
    pub intensity: Intensity,
}

impl Default for Solarize {
    fn default() -> Self {
        Self {
            threshold: 50.0 * 2.55,
            operator: Comparison::Less,
            intensity: Intensity::Average,
        }
    }
}

impl Solarize {
    /// Creates a solarize effect with a byte-scale threshold.
    pub fn new(threshold: f32, operator: Comparison, intensity: Intensity) -> Self {
        Self {
            threshold,
            operator,
            intensity,
        }
    }

    /// Solarizes a single pixel.
    #[inline]
    pub fn apply_pixel(&self, px: Pixel) -> Pixel {
        if self.operator.passes(self.intensity.estimate(&px), self.threshold) {
            Inverse.apply_pixel(px)
        } else {
            px
        }
    }
}

impl PixelOp for Solarize {
    fn name(&self) -> &'static str {
        "effect.solarize"
    }

    fn apply(&self, px: Pixel, _at: &Sample<'_>) -> Pixel {
        self.apply_pixel(px)
    }
}

// ============================================================================
// Blur
// ============================================================================

/// Circular box blur.
///
/// Each output pixel is the mean of every source pixel at offset `(dx, dy)`
/// with `dx² + dy² <= radius²`, skipping offsets outside the buffer. Alpha is
/// kept. A radius of 0 is the identity.
///
/// Only in-bounds rows and columns of the disc are visited, so a radius far
/// larger than the image costs no more than a whole-image mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blur {
    radius: u32,
}

impl Default for Blur {
    fn default() -> Self {
        Self::new(DEFAULT_BLUR_RADIUS)
    }
}

impl Blur {
    /// Creates a blur with the given radius in pixels.
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }

    /// Radius in pixels.
    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Half-width of the disc row at vertical offset `dy`.
    #[inline]
    fn span(&self, dy: i64) -> i64 {
        let r = self.radius as u128;
        let dy = dy.unsigned_abs() as u128;
        // u128 keeps r² exact for any u32 radius
        (r * r - dy * dy).isqrt() as i64
    }
}

impl PixelOp for Blur {
    fn name(&self) -> &'static str {
        "effect.blur"
    }

    fn access(&self) -> Access {
        Access::Neighborhood
    }

    fn apply(&self, px: Pixel, at: &Sample<'_>) -> Pixel {
        let Some(src) = at.source() else {
            return px;
        };
        let (x, y) = (at.x() as i64, at.y() as i64);
        let r = self.radius as i64;
        let (w, h) = (src.width() as i64, src.height() as i64);

        let mut sum = [0.0f32; 3];
        let mut count = 0u32;

        for ny in (y - r).max(0)..=(y + r).min(h - 1) {
            let span = self.span(ny - y);
            for nx in (x - span).max(0)..=(x + span).min(w - 1) {
                if let Some(n) = src.get(nx, ny) {
                    sum[0] += n.r;
                    sum[1] += n.g;
                    sum[2] += n.b;
                    count += 1;
                }
            }
        }

        if count == 0 {
            return px;
        }
        let inv = 1.0 / count as f32;
        px.with_rgb([sum[0] * inv, sum[1] * inv, sum[2] * inv])
    }
}

//! Hue / saturation / value adjustment.
//!
//! The pixel goes through HSV: hue is always rotated additively (whatever the
//! blend mode), saturation and value follow the [`BlendMode`] ratio rules, and
//! the result is converted back to rounded RGB. Alpha is kept.
//!
//! # Example
//!
//! ```rust
//! use pfx_ops::{BlendMode, HueShift};
//! use pfx_core::Pixel;
//!
//! let shift = HueShift::new(BlendMode::Add, 120.0, 0.0, 0.0);
//! let px = shift.apply_pixel(Pixel::new(255.0, 0.0, 0.0, 255.0));
//! assert_eq!(px.to_bytes(), [0, 255, 0, 255]);
//! ```

use crate::blend::BlendMode;
use crate::op::{PixelOp, Sample};
use pfx_core::hsv::{hsv_to_rgb, normalize_hue, Hsv};
use pfx_core::Pixel;

/// HSV adjustment parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HueShift {
    /// Mode for saturation and value.
    pub mode: BlendMode,
    /// Hue rotation in degrees, `[0, 360)`.
    pub hue: f32,
    /// Saturation amount (ratio; negative = keep, in replace mode).
    pub saturation: f32,
    /// Value amount (ratio; negative = keep, in replace mode).
    pub value: f32,
}

impl HueShift {
    /// Creates an adjustment; the hue angle is wrapped into `[0, 360)`.
    pub fn new(mode: BlendMode, hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            mode,
            hue: normalize_hue(hue),
            saturation,
            value,
        }
    }

    /// Adjusts a single pixel.
    #[inline]
    pub fn apply_pixel(&self, px: Pixel) -> Pixel {
        let hsv = Hsv::from_rgb(px.rgb());
        let h = normalize_hue(hsv.h + self.hue);
        let s = self.mode.ratio(hsv.s, self.saturation);
        let v = self.mode.ratio(hsv.v, self.value);
        px.with_rgb(hsv_to_rgb(h, s, v))
    }
}

impl PixelOp for HueShift {
    fn name(&self) -> &'static str {
        "hue"
    }

    fn apply(&self, px: Pixel, _at: &Sample<'_>) -> Pixel {
        self.apply_pixel(px)
    }
}

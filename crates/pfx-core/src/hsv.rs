//! RGB ↔ HSV conversion.
//!
//! RGB channels are on the byte scale (0-255). HSV uses degrees for hue,
//! `[0, 360)`, and ratios for saturation and value, `[0, 1]`.
//!
//! Achromatic colors (black, grays, white) have no meaningful hue. They are
//! reported with `h = 0` and `s = 0`; since [`hsv_to_rgb`] ignores hue when
//! saturation is zero, no conversion ever produces `NaN`.
//!
//! # Example
//!
//! ```
//! use pfx_core::hsv::{hsv_to_rgb, rgb_to_hsv};
//!
//! let hsv = rgb_to_hsv(255.0, 0.0, 0.0);
//! assert_eq!(hsv.h, 0.0);
//! assert_eq!(hsv.s, 1.0);
//!
//! let rgb = hsv_to_rgb(120.0, 1.0, 1.0);
//! assert_eq!(rgb, [0.0, 255.0, 0.0]);
//! ```

use crate::pixel::CHANNEL_MAX;

/// Degrees in a full hue turn.
pub const HUE_TURN: f32 = 360.0;

/// Degrees per hue sextant.
const SEXTANT: f32 = 60.0;

/// A color in hue/saturation/value form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    /// Hue in degrees, `[0, 360)`
    pub h: f32,
    /// Saturation ratio, `[0, 1]`
    pub s: f32,
    /// Value ratio, `[0, 1]`
    pub v: f32,
}

impl Hsv {
    /// Creates an HSV triple, normalizing hue and clamping the ratios.
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self {
            h: normalize_hue(h),
            s: clamp_unit(s),
            v: clamp_unit(v),
        }
    }

    /// Converts byte-scale RGB to HSV. See [`rgb_to_hsv`].
    #[inline]
    pub fn from_rgb(rgb: [f32; 3]) -> Self {
        rgb_to_hsv(rgb[0], rgb[1], rgb[2])
    }

    /// Converts back to rounded byte-scale RGB. See [`hsv_to_rgb`].
    #[inline]
    pub fn to_rgb(self) -> [f32; 3] {
        hsv_to_rgb(self.h, self.s, self.v)
    }

    /// `true` when the color carries no hue information.
    #[inline]
    pub fn is_achromatic(&self) -> bool {
        self.s == 0.0
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
///
/// ```
/// use pfx_core::hsv::normalize_hue;
///
/// assert_eq!(normalize_hue(-30.0), 330.0);
/// assert_eq!(normalize_hue(360.0), 0.0);
/// assert_eq!(normalize_hue(725.0), 5.0);
/// ```
#[inline]
pub fn normalize_hue(h: f32) -> f32 {
    let wrapped = h.rem_euclid(HUE_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= HUE_TURN { 0.0 } else { wrapped }
}

/// Clamps a ratio into `[0, 1]`.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Converts byte-scale RGB to HSV.
///
/// `v = max / 255`, `s = (max - min) / max`, and hue follows the 60°-per-sextant
/// piecewise formula keyed on whichever channel is largest.
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let v = max / CHANNEL_MAX;

    if max <= 0.0 {
        return Hsv { h: 0.0, s: 0.0, v };
    }

    let s = delta / max;
    if delta == 0.0 {
        return Hsv { h: 0.0, s, v };
    }

    let sextant = if r == max {
        (g - b) / delta
    } else if g == max {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };

    Hsv {
        h: normalize_hue(sextant * SEXTANT),
        s,
        v,
    }
}

/// Converts HSV to byte-scale RGB, rounded to whole numbers.
///
/// Hue is wrapped into `[0, 360)` first. With zero saturation the result is
/// the achromatic triple `(v, v, v) * 255`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        let h = normalize_hue(h) / SEXTANT;
        let i = h.floor();
        let f = h - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match i as u32 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };

    [
        (r * CHANNEL_MAX).round(),
        (g * CHANNEL_MAX).round(),
        (b * CHANNEL_MAX).round(),
    ]
}

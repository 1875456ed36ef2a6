//! Scalar intensity estimators.
//!
//! Each [`Intensity`] reduces an RGB sample to one luminance-like value on the
//! byte scale. The estimators drive grayscale conversion and the solarize
//! threshold test.
//!
//! | Estimator    | Formula                              |
//! |--------------|--------------------------------------|
//! | `average`    | `(R + G + B) / 3`                    |
//! | `lightness`  | `(max(R,G,B) + min(R,G,B)) / 2`      |
//! | `luminosity` | `0.2126 R + 0.7152 G + 0.0722 B`     |
//! | `natural`    | `0.299 R + 0.587 G + 0.114 B`        |
//! | `red`        | `R`                                  |
//! | `green`      | `G`                                  |
//! | `blue`       | `B`                                  |
//!
//! # Example
//!
//! ```
//! use pfx_core::{Intensity, Pixel};
//!
//! let px = Pixel::new(30.0, 60.0, 90.0, 255.0);
//! assert_eq!(Intensity::Average.estimate(&px), 60.0);
//! assert_eq!(Intensity::from_name("lightness"), Some(Intensity::Lightness));
//! ```

use crate::pixel::Pixel;
use std::fmt;

/// Rec.709 luminance coefficient for red channel.
pub const REC709_LUMA_R: f32 = 0.2126;
/// Rec.709 luminance coefficient for green channel.
pub const REC709_LUMA_G: f32 = 0.7152;
/// Rec.709 luminance coefficient for blue channel.
pub const REC709_LUMA_B: f32 = 0.0722;

/// Rec.601 luma coefficient for red channel.
pub const REC601_LUMA_R: f32 = 0.299;
/// Rec.601 luma coefficient for green channel.
pub const REC601_LUMA_G: f32 = 0.587;
/// Rec.601 luma coefficient for blue channel.
pub const REC601_LUMA_B: f32 = 0.114;

/// Named intensity estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Intensity {
    /// Mean of the three channels.
    #[default]
    Average,
    /// Midpoint of the brightest and darkest channel.
    Lightness,
    /// Rec.709 weighted sum.
    Luminosity,
    /// Rec.601 weighted sum.
    Natural,
    /// Red channel passthrough.
    Red,
    /// Green channel passthrough.
    Green,
    /// Blue channel passthrough.
    Blue,
}

impl Intensity {
    /// All estimators, in declaration order.
    pub const ALL: [Intensity; 7] = [
        Self::Average,
        Self::Lightness,
        Self::Luminosity,
        Self::Natural,
        Self::Red,
        Self::Green,
        Self::Blue,
    ];

    /// Looks up an estimator by its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }

    /// Lowercase name used in request options.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::Lightness => "lightness",
            Self::Luminosity => "luminosity",
            Self::Natural => "natural",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }

    /// Computes the intensity of a pixel. Alpha is ignored.
    #[inline]
    pub fn estimate(self, px: &Pixel) -> f32 {
        match self {
            Self::Average => (px.r + px.g + px.b) / 3.0,
            Self::Lightness => (px.max_rgb() + px.min_rgb()) / 2.0,
            Self::Luminosity => {
                px.r * REC709_LUMA_R + px.g * REC709_LUMA_G + px.b * REC709_LUMA_B
            }
            Self::Natural => px.r * REC601_LUMA_R + px.g * REC601_LUMA_G + px.b * REC601_LUMA_B,
            Self::Red => px.r,
            Self::Green => px.g,
            Self::Blue => px.b,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PX: Pixel = Pixel::new(30.0, 60.0, 90.0, 255.0);

    #[test]
    fn test_estimators() {
        assert_relative_eq!(Intensity::Average.estimate(&PX), 60.0);
        assert_relative_eq!(Intensity::Lightness.estimate(&PX), 60.0);
        assert_relative_eq!(
            Intensity::Luminosity.estimate(&PX),
            30.0 * 0.2126 + 60.0 * 0.7152 + 90.0 * 0.0722,
            epsilon = 1e-4
        );
        assert_relative_eq!(
            Intensity::Natural.estimate(&PX),
            30.0 * 0.299 + 60.0 * 0.587 + 90.0 * 0.114,
            epsilon = 1e-4
        );
        assert_eq!(Intensity::Red.estimate(&PX), 30.0);
        assert_eq!(Intensity::Green.estimate(&PX), 60.0);
        assert_eq!(Intensity::Blue.estimate(&PX), 90.0);
    }

    #[test]
    fn test_white_is_full_scale() {
        let white = Pixel::new(255.0, 255.0, 255.0, 255.0);
        for e in Intensity::ALL {
            assert_relative_eq!(e.estimate(&white), 255.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_names_roundtrip() {
        for e in Intensity::ALL {
            assert_eq!(Intensity::from_name(e.name()), Some(e));
        }
        assert_eq!(Intensity::from_name("sepia"), None);
        assert_eq!(Intensity::default().to_string(), "average");
    }
}

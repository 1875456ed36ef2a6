//! RGBA pixel samples.
//!
//! A [`Pixel`] is the working form of one image sample. Channels are stored as
//! `f32` on the byte scale (0-255) so that algorithms can chain intermediate
//! results (a grayscale pre-step followed by a color blend, for example)
//! without rounding in between. Rounding and clamping happen once, when the
//! pixel is written back into a [`PixelBuffer`](crate::PixelBuffer).
//!
//! # Example
//!
//! ```
//! use pfx_core::Pixel;
//!
//! let px = Pixel::from_bytes([30, 60, 90, 255]);
//! assert_eq!(px.g, 60.0);
//! assert_eq!(Pixel::new(127.5, 300.0, -4.0, 255.0).to_bytes(), [128, 255, 0, 255]);
//! ```

/// Largest value a channel may hold once written back.
pub const CHANNEL_MAX: f32 = 255.0;

/// Clamps a byte-scale channel value into `[0, 255]`.
#[inline]
pub fn clamp_channel(value: f32) -> f32 {
    value.clamp(0.0, CHANNEL_MAX)
}

/// Converts a byte-scale channel value to a stored byte.
///
/// Rounds to the nearest integer (halves away from zero) and saturates.
/// `NaN` maps to 0.
#[inline]
pub fn quantize(value: f32) -> u8 {
    clamp_channel(value.round()) as u8
}

/// One RGBA sample, byte scale, floating point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pixel {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Pixel {
    /// Creates a pixel from byte-scale channel values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a pixel from stored RGBA bytes.
    #[inline]
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            r: bytes[0] as f32,
            g: bytes[1] as f32,
            b: bytes[2] as f32,
            a: bytes[3] as f32,
        }
    }

    /// Rounds and clamps every channel into RGBA bytes.
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [quantize(self.r), quantize(self.g), quantize(self.b), quantize(self.a)]
    }

    /// Returns the color channels as `[r, g, b]`.
    #[inline]
    pub fn rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns a copy with the color channels replaced, alpha kept.
    #[inline]
    pub fn with_rgb(self, rgb: [f32; 3]) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a: self.a,
        }
    }

    /// Returns a copy with all three color channels set to `value`.
    #[inline]
    pub fn with_gray(self, value: f32) -> Self {
        self.with_rgb([value; 3])
    }

    /// Largest of the three color channels.
    #[inline]
    pub fn max_rgb(&self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    /// Smallest of the three color channels.
    #[inline]
    pub fn min_rgb(&self) -> f32 {
        self.r.min(self.g).min(self.b)
    }

    /// Maps every color channel through `f`, alpha kept.
    #[inline]
    pub fn map_rgb(self, mut f: impl FnMut(f32) -> f32) -> Self {
        self.with_rgb([f(self.r), f(self.g), f(self.b)])
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Pixel> for [u8; 4] {
    fn from(px: Pixel) -> Self {
        px.to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_rounds_and_saturates() {
        assert_eq!(quantize(127.5), 128);
        assert_eq!(quantize(127.49), 127);
        assert_eq!(quantize(-20.0), 0);
        assert_eq!(quantize(512.0), 255);
        assert_eq!(quantize(f32::NAN), 0);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let bytes = [1, 2, 250, 128];
        assert_eq!(Pixel::from_bytes(bytes).to_bytes(), bytes);
    }

    #[test]
    fn test_min_max() {
        let px = Pixel::new(30.0, 60.0, 90.0, 255.0);
        assert_eq!(px.max_rgb(), 90.0);
        assert_eq!(px.min_rgb(), 30.0);
    }

    #[test]
    fn test_map_rgb_keeps_alpha() {
        let px = Pixel::new(10.0, 20.0, 30.0, 40.0).map_rgb(|c| c * 2.0);
        assert_eq!(px, Pixel::new(20.0, 40.0, 60.0, 40.0));
    }
}

//! Alpha channel adjustment.
//!
//! Uses the same [`BlendMode`] byte-channel rules as color channels, applied
//! to alpha only.

use crate::blend::BlendMode;
use crate::op::{PixelOp, Sample};
use pfx_core::Pixel;

/// Opacity parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opacity {
    /// Blend mode for alpha.
    pub mode: BlendMode,
    /// Amount as a ratio (`0.5` = 50%).
    pub opacity: f32,
}

impl Default for Opacity {
    fn default() -> Self {
        Self {
            mode: BlendMode::Replace,
            opacity: 1.0,
        }
    }
}

impl Opacity {
    /// Creates an opacity adjustment.
    pub fn new(mode: BlendMode, opacity: f32) -> Self {
        Self { mode, opacity }
    }

    /// Adjusts a single pixel.
    #[inline]
    pub fn apply_pixel(&self, mut px: Pixel) -> Pixel {
        px.a = self.mode.channel(px.a, self.opacity);
        px
    }
}

impl PixelOp for Opacity {
    fn name(&self) -> &'static str {
        "opacity"
    }

    fn apply(&self, px: Pixel, _at: &Sample<'_>) -> Pixel {
        self.apply_pixel(px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_half() {
        let op = Opacity::new(BlendMode::Replace, 0.5);
        for a in [0.0, 77.0, 255.0] {
            let px = op.apply_pixel(Pixel::new(1.0, 2.0, 3.0, a));
            let alpha = px.to_bytes()[3];
            assert!(alpha == 127 || alpha == 128);
            assert_eq!(&px.to_bytes()[..3], &[1, 2, 3]);
        }
    }

    #[test]
    fn test_default_is_opaque() {
        let px = Opacity::default().apply_pixel(Pixel::new(0.0, 0.0, 0.0, 12.0));
        assert_eq!(px.a, 255.0);
    }

    #[test]
    fn test_add_and_multiply() {
        let px = Pixel::new(0.0, 0.0, 0.0, 200.0);
        assert_eq!(Opacity::new(BlendMode::Add, 0.5).apply_pixel(px).a, 255.0);
        assert_eq!(Opacity::new(BlendMode::Multiply, -0.5).apply_pixel(px).a, 100.0);
    }
}

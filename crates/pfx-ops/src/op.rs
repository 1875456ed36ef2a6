//! The pixel-operation seam.
//!
//! Every algorithm implements [`PixelOp`]: a pure function from one pixel (plus
//! its position) to a new pixel. Operations that read other pixels declare
//! [`Access::Neighborhood`]; the engine then hands them a [`Sample`] backed by
//! a pre-pass snapshot of the buffer, so neighbor reads never observe values
//! written earlier in the same pass.

use pfx_core::{Pixel, PixelBuffer};

/// What a [`PixelOp`] reads besides the pixel it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    /// Only the pixel itself.
    #[default]
    Pointwise,
    /// Other pixels of the unmodified source.
    Neighborhood,
}

/// Position of the pixel being processed, with optional source access.
#[derive(Debug, Clone, Copy)]
pub struct Sample<'a> {
    x: u32,
    y: u32,
    source: Option<&'a PixelBuffer>,
}

impl<'a> Sample<'a> {
    /// Context for a pointwise operation. Neighbor reads return `None`.
    #[inline]
    pub fn pointwise(x: u32, y: u32) -> Self {
        Self { x, y, source: None }
    }

    /// Context backed by a read-only source snapshot.
    #[inline]
    pub fn with_source(x: u32, y: u32, source: &'a PixelBuffer) -> Self {
        Self {
            x,
            y,
            source: Some(source),
        }
    }

    /// Column of the pixel being processed.
    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Row of the pixel being processed.
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// The pre-pass snapshot, if this is a neighborhood context.
    #[inline]
    pub fn source(&self) -> Option<&'a PixelBuffer> {
        self.source
    }

    /// Reads the source pixel at offset `(dx, dy)` from this position.
    ///
    /// `None` when outside the buffer or when there is no source.
    #[inline]
    pub fn neighbor(&self, dx: i64, dy: i64) -> Option<Pixel> {
        self.source?.get(self.x as i64 + dx, self.y as i64 + dy)
    }
}

/// A per-pixel algorithm.
pub trait PixelOp: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// What the operation reads. Defaults to [`Access::Pointwise`].
    fn access(&self) -> Access {
        Access::Pointwise
    }

    /// Computes the new value of `px` at `at`.
    fn apply(&self, px: Pixel, at: &Sample<'_>) -> Pixel;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointwise_sample_has_no_neighbors() {
        let at = Sample::pointwise(1, 1);
        assert_eq!(at.neighbor(0, 0), None);
        assert!(at.source().is_none());
    }

    #[test]
    fn test_neighbor_offsets() {
        let mut buf = PixelBuffer::new(3, 3);
        buf.set(2, 1, Pixel::new(7.0, 0.0, 0.0, 0.0));
        let at = Sample::with_source(1, 1, &buf);
        assert_eq!(at.neighbor(1, 0).map(|p| p.r), Some(7.0));
        assert_eq!(at.neighbor(-2, 0), None);
        assert_eq!(at.neighbor(0, 2), None);
    }
}

//! RGBA pixel buffer with bounds-checked access.
//!
//! [`PixelBuffer`] owns `width * height * 4` bytes in row-major RGBA order,
//! top-to-bottom:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  ← Row 0
//!         [R G B A R G B A ...]  ← Row 1
//!         ...
//! ```
//!
//! The byte offset of `(x, y)` is `4 * (y * width + x)`.
//!
//! Accessors take signed coordinates so that neighborhood scans can probe
//! `x - radius` without casting. [`get`](PixelBuffer::get) returns `None` and
//! [`set`](PixelBuffer::set) does nothing for coordinates outside the buffer.
//!
//! # Snapshots
//!
//! Bytes live behind an [`Arc`], so `clone()` is a cheap snapshot. The first
//! write through [`set`](PixelBuffer::set) or
//! [`bytes_mut`](PixelBuffer::bytes_mut) detaches the written buffer
//! (copy-on-write), leaving the snapshot untouched. Neighborhood algorithms
//! rely on this to read pre-pass values while the pass writes results.
//!
//! # Example
//!
//! ```
//! use pfx_core::{Pixel, PixelBuffer};
//!
//! let mut buf = PixelBuffer::filled(4, 4, [10, 20, 30, 255]);
//! let snapshot = buf.clone();
//!
//! buf.set(0, 0, Pixel::new(1.0, 2.0, 3.0, 4.0));
//! assert_eq!(buf.get(0, 0).map(Pixel::to_bytes), Some([1, 2, 3, 4]));
//! assert_eq!(snapshot.get(0, 0).map(Pixel::to_bytes), Some([10, 20, 30, 255]));
//! assert_eq!(buf.get(-1, 0), None);
//! ```

use crate::{Error, Pixel, Result};
use std::sync::Arc;

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Owned RGBA8 raster.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Pixel bytes (Arc for cheap snapshots)
    data: Arc<Vec<u8>>,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
}

impl PixelBuffer {
    /// Creates a transparent black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Creates a buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&rgba);
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Wraps decoded RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * 4`, or if that product overflows.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "byte length overflows"))?;

        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }

        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the buffer has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bytes per row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable RGBA bytes, detaching from any snapshot first.
    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Consumes the buffer, returning its bytes.
    ///
    /// Copies only if a snapshot still shares the data.
    pub fn into_raw(self) -> Vec<u8> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }

    /// `true` if `(x, y)` lies inside the buffer.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Byte offset of `(x, y)`, or `None` when outside the buffer.
    #[inline]
    pub fn offset(&self, x: i64, y: i64) -> Option<usize> {
        self.contains(x, y)
            .then(|| (y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Reads the pixel at `(x, y)`, or `None` when outside the buffer.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<Pixel> {
        let i = self.offset(x, y)?;
        let px = &self.data[i..i + CHANNELS];
        Some(Pixel::from_bytes([px[0], px[1], px[2], px[3]]))
    }

    /// Reads the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when `(x, y)` is outside the buffer.
    pub fn try_get(&self, x: i64, y: i64) -> Result<Pixel> {
        self.get(x, y)
            .ok_or_else(|| Error::out_of_bounds(x, y, self.width, self.height))
    }

    /// Writes all four channels of `px` at `(x, y)`, rounding and clamping.
    ///
    /// Does nothing when `(x, y)` is outside the buffer.
    #[inline]
    pub fn set(&mut self, x: i64, y: i64, px: Pixel) {
        if let Some(i) = self.offset(x, y) {
            let bytes = px.to_bytes();
            self.bytes_mut()[i..i + CHANNELS].copy_from_slice(&bytes);
        }
    }

    /// Iterates `(x, y, pixel)` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Pixel)> + '_ {
        let width = self.width.max(1);
        self.data
            .chunks_exact(CHANNELS)
            .enumerate()
            .map(move |(i, px)| {
                let i = i as u32;
                (i % width, i / width, Pixel::from_bytes([px[0], px[1], px[2], px[3]]))
            })
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_new() {
        let buf = PixelBuffer::new(8, 4);
        assert_eq!(buf.dimensions(), (8, 4));
        assert_eq!(buf.pixel_count(), 32);
        assert_eq!(buf.as_bytes().len(), 128);
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_from_raw_wrong_size() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 15]).is_err());
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
        assert!(PixelBuffer::from_raw(0, 0, Vec::new()).is_ok());
    }

    #[test]
    fn test_offset_is_row_major() {
        let buf = PixelBuffer::new(5, 3);
        assert_eq!(buf.offset(0, 0), Some(0));
        assert_eq!(buf.offset(1, 0), Some(4));
        assert_eq!(buf.offset(0, 1), Some(20));
        assert_eq!(buf.offset(4, 2), Some(4 * (2 * 5 + 4)));
        assert_eq!(buf.offset(5, 0), None);
        assert_eq!(buf.offset(0, 3), None);
    }

    #[test]
    fn test_get_set() {
        let mut buf = PixelBuffer::new(3, 3);
        buf.set(1, 2, Pixel::new(10.4, 300.0, -5.0, 127.5));
        assert_eq!(buf.get(1, 2).map(Pixel::to_bytes), Some([10, 255, 0, 128]));
        assert_eq!(buf.get(0, 0).map(Pixel::to_bytes), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_out_of_bounds_is_lenient() {
        let mut buf = PixelBuffer::filled(2, 2, [9, 9, 9, 9]);
        let before = buf.clone();
        buf.set(-1, 0, Pixel::default());
        buf.set(2, 1, Pixel::default());
        buf.set(0, 2, Pixel::default());
        assert_eq!(buf, before);
        assert_eq!(buf.get(-1, -1), None);
        assert!(matches!(buf.try_get(2, 0), Err(Error::OutOfBounds { x: 2, y: 0, .. })));
    }

    #[test]
    fn test_snapshot_copy_on_write() {
        let mut buf = PixelBuffer::filled(2, 2, [1, 2, 3, 4]);
        let snapshot = buf.clone();
        buf.set(1, 1, Pixel::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(snapshot.get(1, 1).map(Pixel::to_bytes), Some([1, 2, 3, 4]));
        assert_eq!(buf.get(1, 1).map(Pixel::to_bytes), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_pixels_iteration_order() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set(1, 0, Pixel::new(1.0, 0.0, 0.0, 0.0));
        buf.set(0, 1, Pixel::new(2.0, 0.0, 0.0, 0.0));
        let coords: Vec<_> = buf.pixels().map(|(x, y, px)| (x, y, px.r)).collect();
        assert_eq!(coords, vec![(0, 0, 0.0), (1, 0, 1.0), (0, 1, 2.0), (1, 1, 0.0)]);
    }

    #[test]
    fn test_into_raw_with_live_snapshot() {
        let buf = PixelBuffer::filled(1, 1, [5, 6, 7, 8]);
        let snapshot = buf.clone();
        assert_eq!(buf.into_raw(), vec![5, 6, 7, 8]);
        assert_eq!(snapshot.as_bytes(), &[5, 6, 7, 8]);
    }
}

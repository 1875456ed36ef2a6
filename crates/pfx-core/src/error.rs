//! Error types for pfx-core operations.
//!
//! The core layer only fails in two ways: a byte array that does not match
//! the declared dimensions, and strict pixel access outside the buffer.
//! Lenient accessors ([`PixelBuffer::get`](crate::PixelBuffer::get),
//! [`PixelBuffer::set`](crate::PixelBuffer::set)) never produce errors; they
//! return `None` or do nothing instead.
//!
//! # Usage
//!
//! ```rust
//! use pfx_core::{Error, PixelBuffer};
//!
//! let err = PixelBuffer::from_raw(2, 2, vec![0; 3]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or accessing pixel buffers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Pixel coordinates are outside buffer bounds.
    ///
    /// Only returned by the strict accessor
    /// [`PixelBuffer::try_get`](crate::PixelBuffer::try_get).
    #[error("pixel ({x}, {y}) out of bounds for buffer {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: i64,
        /// Y coordinate that was out of bounds
        y: i64,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// Byte array length does not match `width * height * 4`.
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Description of the mismatch
        reason: String,
    },
}

impl Error {
    /// Creates an [`InvalidDimensions`](Error::InvalidDimensions) error.
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`OutOfBounds`](Error::OutOfBounds) error.
    pub fn out_of_bounds(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self::OutOfBounds { x, y, width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::out_of_bounds(-1, 5, 4, 4);
        assert_eq!(err.to_string(), "pixel (-1, 5) out of bounds for buffer 4x4");

        let err = Error::invalid_dimensions(2, 2, "expected 16 bytes, got 3");
        assert!(err.to_string().contains("16 bytes"));
    }
}

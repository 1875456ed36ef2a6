//! Caller-supplied pixel functions.
//!
//! A [`CustomOp`] wraps a closure and runs through the engine exactly like a
//! built-in. Closures that read neighbors must be built with
//! [`CustomOp::with_neighbors`] so the engine serves them a pre-pass snapshot.
//!
//! # Example
//!
//! ```rust
//! use pfx_ops::{execute, CustomOp};
//! use pfx_core::{Pixel, PixelBuffer};
//!
//! // swap red and blue
//! let swap = CustomOp::new(|px: Pixel, _at| Pixel::new(px.b, px.g, px.r, px.a));
//!
//! let mut buf = PixelBuffer::filled(2, 2, [1, 2, 3, 4]);
//! execute(&mut buf, &swap);
//! assert_eq!(buf.get(1, 1).map(Pixel::to_bytes), Some([3, 2, 1, 4]));
//! ```

use crate::op::{Access, PixelOp, Sample};
use pfx_core::Pixel;
use std::sync::Arc;

/// Signature of a custom pixel function.
pub type PixelFn = dyn Fn(Pixel, &Sample<'_>) -> Pixel + Send + Sync;

/// A pixel function supplied by the caller.
#[derive(Clone)]
pub struct CustomOp {
    f: Arc<PixelFn>,
    access: Access,
}

impl CustomOp {
    /// Wraps a pointwise function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Pixel, &Sample<'_>) -> Pixel + Send + Sync + 'static,
    {
        Self {
            f: Arc::new(f),
            access: Access::Pointwise,
        }
    }

    /// Wraps a function that reads neighbors through [`Sample::neighbor`].
    pub fn with_neighbors<F>(f: F) -> Self
    where
        F: Fn(Pixel, &Sample<'_>) -> Pixel + Send + Sync + 'static,
    {
        Self {
            f: Arc::new(f),
            access: Access::Neighborhood,
        }
    }
}

impl PixelOp for CustomOp {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn access(&self) -> Access {
        self.access
    }

    fn apply(&self, px: Pixel, at: &Sample<'_>) -> Pixel {
        (self.f)(px, at)
    }
}

impl std::fmt::Debug for CustomOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomOp")
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

//! # pfx-ops
//!
//! Pixel transformation algorithms and the engine that runs them.
//!
//! Every algorithm is a [`PixelOp`]: a pure function from one pixel (plus,
//! for neighborhood operations, read access to the pre-pass buffer) to one
//! pixel. The engine applies it over a [`PixelBuffer`](pfx_core::PixelBuffer)
//! in place.
//!
//! # Modules
//!
//! - [`blend`] - `add` / `multiply` / `replace` blend modes
//! - [`colorize`], [`grayscale`], [`hue`], [`opacity`] - adjustable color operations
//! - [`effect`] - inverse, solarize and blur
//! - [`custom`] - caller-supplied pixel functions
//! - [`options`] - request records (serde, YAML/JSON)
//! - [`resolve`] - request → typed [`Operation`] with defaults and unit conversion
//! - [`engine`] - pass execution and [`apply_request`]
//!
//! # Example
//!
//! ```rust
//! use pfx_ops::{apply_all, RequestList};
//! use pfx_core::{Pixel, PixelBuffer};
//!
//! let chain = RequestList::from_yaml(r#"
//! - operation: grayscale
//! - operation: effect
//!   options: { mode: inverse }
//! "#).unwrap();
//!
//! let mut buf = PixelBuffer::filled(8, 8, [30, 60, 90, 255]);
//! let outcomes = apply_all(&mut buf, &chain.requests);
//! assert!(outcomes.iter().all(|o| o.is_applied()));
//! assert_eq!(buf.get(0, 0).map(Pixel::to_bytes), Some([195, 195, 195, 255]));
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - row-parallel execution with rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod blend;
pub mod colorize;
pub mod custom;
pub mod effect;
pub mod engine;
pub mod grayscale;
pub mod hue;
pub mod op;
pub mod opacity;
pub mod options;
pub mod resolve;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use blend::BlendMode;
pub use colorize::Colorize;
pub use custom::{CustomOp, PixelFn};
pub use effect::{Blur, Comparison, Inverse, Solarize};
pub use engine::{apply_all, apply_request, execute, execute_sequential, Outcome};
pub use error::{OpsError, OpsResult};
pub use grayscale::Grayscale;
pub use hue::HueShift;
pub use op::{Access, PixelOp, Sample};
pub use opacity::Opacity;
pub use options::{RawOptions, Request, RequestList};
pub use resolve::{Operation, OperationKind};

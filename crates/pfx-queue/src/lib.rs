//! # pfx-queue
//!
//! Async sequencing of pixel transforms against image sources.
//!
//! A transform on a real image is not a pure computation: the source must be
//! decoded into a [`PixelBuffer`](pfx_core::PixelBuffer), processed, and
//! encoded back before the next transform can read it. [`Sequencer`] makes
//! that round-trip atomic per target:
//!
//! - transforms on one target run one at a time, in submit order
//! - each starts from the source the previous one stored
//! - different targets do not wait on each other
//!
//! The decode/encode boundary is the [`Codec`] trait; [`RawCodec`] handles
//! in-memory RGBA8 images.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod codec;
mod error;
pub mod sequencer;

pub use codec::{Codec, RawCodec, RawImage};
pub use error::{QueueError, QueueResult};
pub use sequencer::{Pending, Sequencer};

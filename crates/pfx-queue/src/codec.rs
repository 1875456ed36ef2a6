//! Decode/encode boundary between an image source and a [`PixelBuffer`].
//!
//! The sequencer never looks inside a source. It asks the [`Codec`] for a
//! buffer, runs the pixel pass, and asks the codec to turn the result back
//! into a source, which then replaces the old one.

use crate::{QueueError, QueueResult};
use pfx_core::PixelBuffer;
use std::future::Future;

/// Converts sources to buffers and back.
///
/// Both directions are async: real sources may need I/O or a round-trip
/// through another subsystem before pixels are available.
pub trait Codec: Send + Sync + 'static {
    /// What a target holds between transforms.
    type Source: Clone + Send + Sync + 'static;

    /// Produces the pixels of `source`.
    fn decode(&self, source: &Self::Source) -> impl Future<Output = QueueResult<PixelBuffer>> + Send;

    /// Turns processed pixels into a new source.
    fn encode(&self, buffer: PixelBuffer) -> impl Future<Output = QueueResult<Self::Source>> + Send;
}

/// Uncompressed RGBA8 image held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA bytes.
    pub data: Vec<u8>,
}

impl RawImage {
    /// Wraps raw bytes. Length is checked on decode, not here.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self { width, height, data }
    }
}

impl From<PixelBuffer> for RawImage {
    fn from(buffer: PixelBuffer) -> Self {
        let (width, height) = buffer.dimensions();
        Self::new(width, height, buffer.into_raw())
    }
}

/// Codec for [`RawImage`] sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCodec;

impl Codec for RawCodec {
    type Source = RawImage;

    async fn decode(&self, source: &RawImage) -> QueueResult<PixelBuffer> {
        PixelBuffer::from_raw(source.width, source.height, source.data.clone()).map_err(QueueError::codec)
    }

    async fn encode(&self, buffer: PixelBuffer) -> QueueResult<RawImage> {
        Ok(RawImage::from(buffer))
    }
}

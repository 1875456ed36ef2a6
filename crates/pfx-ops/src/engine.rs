//! Execution engine.
//!
//! Runs a [`PixelOp`] over every pixel of a [`PixelBuffer`] in row-major
//! order and writes each result back in place.
//!
//! Pointwise operations read and write the same bytes. Neighborhood
//! operations ([`Access::Neighborhood`]) get a snapshot of the buffer taken
//! before the pass; all their reads go to the snapshot, so scan order never
//! leaks into the result.
//!
//! # Example
//!
//! ```rust
//! use pfx_ops::{apply_request, Outcome, Request};
//! use pfx_core::{Pixel, PixelBuffer};
//!
//! let mut buf = PixelBuffer::filled(4, 4, [30, 60, 90, 255]);
//! let outcome = apply_request(&mut buf, &Request::grayscale("average"));
//! assert!(outcome.is_applied());
//! assert_eq!(buf.get(0, 0).map(Pixel::to_bytes), Some([60, 60, 60, 255]));
//!
//! // unknown modes leave the buffer alone
//! let before = buf.clone();
//! let outcome = apply_request(&mut buf, &Request::grayscale("sepia"));
//! assert!(matches!(outcome, Outcome::Skipped(_)));
//! assert_eq!(buf, before);
//! ```

use crate::op::{Access, PixelOp, Sample};
use crate::options::Request;
use crate::resolve::{Operation, OperationKind};
use crate::OpsError;
use pfx_core::{Pixel, PixelBuffer, CHANNELS};
use tracing::{trace, warn};

/// Result of applying a request.
#[derive(Debug)]
pub enum Outcome {
    /// The operation ran over the whole buffer.
    Applied(OperationKind),
    /// The request did not resolve; the buffer is unchanged.
    Skipped(OpsError),
}

impl Outcome {
    /// `true` if the buffer was processed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Runs `op` over every pixel of `buffer`.
///
/// Uses the rayon row-parallel engine when the `parallel` feature is
/// enabled. Results are identical either way.
pub fn execute(buffer: &mut PixelBuffer, op: &dyn PixelOp) {
    #[cfg(feature = "parallel")]
    crate::parallel::execute(buffer, op);
    #[cfg(not(feature = "parallel"))]
    execute_sequential(buffer, op);
}

/// Runs `op` over every pixel of `buffer` on the calling thread.
pub fn execute_sequential(buffer: &mut PixelBuffer, op: &dyn PixelOp) {
    if buffer.is_empty() {
        return;
    }
    let access = op.access();
    trace!(width = buffer.width(), height = buffer.height(), op = op.name(), ?access, "execute");

    let stride = buffer.row_stride();
    match access {
        Access::Pointwise => {
            for (y, row) in buffer.bytes_mut().chunks_exact_mut(stride).enumerate() {
                process_row(row, y as u32, op, None);
            }
        }
        Access::Neighborhood => {
            let snapshot = buffer.clone();
            for (y, row) in buffer.bytes_mut().chunks_exact_mut(stride).enumerate() {
                process_row(row, y as u32, op, Some(&snapshot));
            }
        }
    }
}

/// Applies `op` to one row of RGBA bytes in place.
#[inline]
pub(crate) fn process_row(row: &mut [u8], y: u32, op: &dyn PixelOp, source: Option<&PixelBuffer>) {
    for (x, chunk) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let x = x as u32;
        let px = Pixel::from_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let at = match source {
            Some(src) => Sample::with_source(x, y, src),
            None => Sample::pointwise(x, y),
        };
        chunk.copy_from_slice(&op.apply(px, &at).to_bytes());
    }
}

/// Resolves `request` and runs it over `buffer`.
///
/// A request that does not resolve leaves the buffer byte-for-byte
/// unchanged and is reported as [`Outcome::Skipped`].
pub fn apply_request(buffer: &mut PixelBuffer, request: &Request) -> Outcome {
    match Operation::resolve(request) {
        Ok(op) => {
            execute(buffer, &op);
            Outcome::Applied(op.kind())
        }
        Err(err) => {
            warn!(operation = %request.operation, error = %err, "request not resolved, buffer left unchanged");
            Outcome::Skipped(err)
        }
    }
}

/// Applies requests one after another, each on the previous result.
pub fn apply_all<'a>(
    buffer: &mut PixelBuffer,
    requests: impl IntoIterator<Item = &'a Request>,
) -> Vec<Outcome> {
    requests
        .into_iter()
        .map(|request| apply_request(buffer, request))
        .collect()
}

//! Row-parallel execution using Rayon.
//!
//! Same contract as [`execute_sequential`](crate::execute_sequential): every
//! algorithm is a pure function of its pixel (and, for neighborhood
//! operations, of the pre-pass snapshot), so splitting rows across threads
//! does not change a single byte of the output.
//!
//! # Example
//!
//! ```rust
//! use pfx_ops::{parallel, effect::Blur};
//! use pfx_core::PixelBuffer;
//!
//! let mut buf = PixelBuffer::filled(256, 256, [10, 20, 30, 255]);
//! parallel::execute(&mut buf, &Blur::new(2));
//! ```

use crate::engine::process_row;
use crate::op::{Access, PixelOp};
use pfx_core::PixelBuffer;
use rayon::prelude::*;
use tracing::trace;

/// Runs `op` over every pixel of `buffer`, one rayon task per row.
pub fn execute(buffer: &mut PixelBuffer, op: &dyn PixelOp) {
    if buffer.is_empty() {
        return;
    }
    let access = op.access();
    trace!(width = buffer.width(), height = buffer.height(), op = op.name(), ?access, "execute (parallel)");

    let stride = buffer.row_stride();
    match access {
        Access::Pointwise => {
            buffer
                .bytes_mut()
                .par_chunks_exact_mut(stride)
                .enumerate()
                .for_each(|(y, row)| process_row(row, y as u32, op, None));
        }
        Access::Neighborhood => {
            let snapshot = buffer.clone();
            buffer
                .bytes_mut()
                .par_chunks_exact_mut(stride)
                .enumerate()
                .for_each(|(y, row)| process_row(row, y as u32, op, Some(&snapshot)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{Blur, Solarize};
    use crate::execute_sequential;
    use crate::hue::HueShift;
    use crate::BlendMode;

    fn noise(width: u32, height: u32) -> PixelBuffer {
        let mut state = 0x2545_f491_u32;
        let data = (0..width * height * 4)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect();
        PixelBuffer::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn test_matches_sequential() {
        let original = noise(33, 17);
        let ops: [&dyn PixelOp; 3] = [
            &Blur::new(3),
            &Solarize::default(),
            &HueShift::new(BlendMode::Multiply, 45.0, 0.2, -0.1),
        ];
        for op in ops {
            let mut seq = original.clone();
            let mut par = original.clone();
            execute_sequential(&mut seq, op);
            execute(&mut par, op);
            assert_eq!(seq, par, "{}", op.name());
        }
    }
}

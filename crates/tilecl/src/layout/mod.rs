//! Tile layouts: the mapping from logical (row, column) positions to linear
//! offsets within a backing buffer.

mod matrix;
pub use matrix::*;
mod swizzle;
pub use swizzle::*;

use core::fmt::{self, Write};

use bytemuck::Zeroable;

use crate::Element;

/// A per-thread register fragment: the one tile that owns its storage.
///
/// Unlike [`Tile`](crate::Tile), which borrows memory managed elsewhere, a
/// register tile holds its elements inline so the compiler can keep them in
/// registers. The contents are laid out row-major and contiguous.
///
/// `LEN` must equal `ROWS * COLS`; stable Rust cannot derive the array length
/// from the extents, so it is spelled out and checked at compile time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegTile<T: Element, const ROWS: usize, const COLS: usize, const LEN: usize> {
    data: [T; LEN],
}

impl<T: Element, const ROWS: usize, const COLS: usize, const LEN: usize>
    RegTile<T, ROWS, COLS, LEN>
{
    pub const ROWS: usize = ROWS;
    pub const COLS: usize = COLS;
    pub const NUMEL: usize = LEN;

    /// A zero-initialized fragment.
    pub fn new() -> Self {
        const {
            assert!(LEN == ROWS * COLS, "register tile length must equal rows * cols");
            assert!(ROWS > 0 && COLS > 0, "register tile extents must be strictly positive");
        }
        Self { data: Zeroable::zeroed() }
    }

    pub fn clear(&mut self) {
        self.data = Zeroable::zeroed();
    }

    const fn offset(i: usize, j: usize) -> usize {
        debug_assert!(i < ROWS && j < COLS);
        i * COLS + j
    }

    pub fn at(&self, i: usize, j: usize) -> T {
        self.data[Self::offset(i, j)]
    }

    pub fn at_mut(&mut self, i: usize, j: usize) -> &mut T {
        &mut self.data[Self::offset(i, j)]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Renders the fragment's contents as a `%.2f` grid (host diagnostic).
    pub fn dump<W: Write>(&self, out: &mut W) -> fmt::Result {
        for i in 0..ROWS {
            for j in 0..COLS {
                write!(out, "{:.2}, ", self.at(i, j).to_f32())?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl<T: Element, const ROWS: usize, const COLS: usize, const LEN: usize> Default
    for RegTile<T, ROWS, COLS, LEN>
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::bf16;

    #[test]
    fn starts_zeroed() {
        let tile = RegTile::<f32, 2, 4, 8>::new();
        assert!(tile.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn row_major_accumulation() {
        let mut tile = RegTile::<f32, 2, 4, 8>::new();
        *tile.at_mut(1, 2) += 3.0;
        assert_eq!(tile.at(1, 2), 3.0);
        assert_eq!(tile.as_slice()[6], 3.0);

        tile.clear();
        assert!(tile.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn half_precision_fragment() {
        let mut tile = RegTile::<bf16, 2, 2, 4>::new();
        *tile.at_mut(0, 1) = bf16::from_f32(1.5);
        assert_eq!(tile.at(0, 1).to_f32(), 1.5);
    }

    #[test]
    fn dumps_contents() {
        let mut tile = RegTile::<f32, 1, 2, 2>::new();
        *tile.at_mut(0, 0) = 1.0;
        let mut out = String::new();
        tile.dump(&mut out).unwrap();
        assert_eq!(out, "1.00, 0.00, \n");
    }
}

use core::fmt;

use serde::{Deserialize, Serialize};

/// Orientation of a 2D layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutKind {
    RowMajor,
    ColMajor,
}

impl LayoutKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            LayoutKind::RowMajor => "RowMajor",
            LayoutKind::ColMajor => "ColMajor",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static 2D-to-linear address mapping.
///
/// Implementors are zero-sized descriptions: all metadata lives in associated
/// consts and the offset function is pure. Out-of-range positions are the
/// caller's contract; `offset` performs no checks of its own.
pub trait Layout2D: Copy + Default + 'static {
    const ROWS: usize;
    const COLS: usize;
    const ROW_STRIDE: usize;
    const COL_STRIDE: usize;
    const KIND: LayoutKind;
    const NUMEL: usize = Self::ROWS * Self::COLS;

    /// Linear offset (in elements) of logical position `(i, j)`,
    /// valid for `0 <= i < ROWS`, `0 <= j < COLS`.
    fn offset(i: usize, j: usize) -> usize;
}

/// A `ROWS x COLS` layout with independent row and column strides, all known
/// at compile time.
///
/// The orientation is deduced from the strides: a unit column stride means
/// row-major, anything else column-major. `MatrixLayout<1, 1, 1, 1>` is
/// therefore reported as row-major even though the distinction is vacuous.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MatrixLayout<
    const ROWS: usize,
    const COLS: usize,
    const ROW_STRIDE: usize,
    const COL_STRIDE: usize,
>;

impl<const ROWS: usize, const COLS: usize, const ROW_STRIDE: usize, const COL_STRIDE: usize>
    MatrixLayout<ROWS, COLS, ROW_STRIDE, COL_STRIDE>
{
    pub const fn offset(i: usize, j: usize) -> usize {
        debug_assert!(i < ROWS && j < COLS);
        i * ROW_STRIDE + j * COL_STRIDE
    }
}

impl<const ROWS: usize, const COLS: usize, const ROW_STRIDE: usize, const COL_STRIDE: usize>
    Layout2D for MatrixLayout<ROWS, COLS, ROW_STRIDE, COL_STRIDE>
{
    const ROWS: usize = ROWS;
    const COLS: usize = COLS;
    const ROW_STRIDE: usize = ROW_STRIDE;
    const COL_STRIDE: usize = COL_STRIDE;
    const KIND: LayoutKind = if COL_STRIDE == 1 {
        LayoutKind::RowMajor
    } else {
        LayoutKind::ColMajor
    };
    const NUMEL: usize = {
        assert!(ROWS > 0 && COLS > 0, "layout extents must be strictly positive");
        ROWS * COLS
    };

    fn offset(i: usize, j: usize) -> usize {
        Self::offset(i, j)
    }
}

impl<const ROWS: usize, const COLS: usize, const ROW_STRIDE: usize, const COL_STRIDE: usize>
    fmt::Display for MatrixLayout<ROWS, COLS, ROW_STRIDE, COL_STRIDE>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}<{}, {}>, Strides<{}, {}>, Numel = {}",
            Self::KIND.as_str(),
            ROWS,
            COLS,
            ROW_STRIDE,
            COL_STRIDE,
            <Self as Layout2D>::NUMEL
        )
    }
}

/// Row-major layout whose contiguous dimension is the last one.
pub type RowMajor<const ROWS: usize, const COLS: usize> = MatrixLayout<ROWS, COLS, COLS, 1>;

/// Row-major layout with an explicit (possibly padded) row stride.
pub type RowMajorStrided<const ROWS: usize, const COLS: usize, const STRIDE: usize> =
    MatrixLayout<ROWS, COLS, STRIDE, 1>;

/// Column-major layout whose contiguous dimension is the first one.
pub type ColMajor<const ROWS: usize, const COLS: usize> = MatrixLayout<ROWS, COLS, 1, ROWS>;

/// Column-major layout with an explicit (possibly padded) column stride.
pub type ColMajorStrided<const ROWS: usize, const COLS: usize, const STRIDE: usize> =
    MatrixLayout<ROWS, COLS, 1, STRIDE>;

use core::fmt;
use core::marker::PhantomData;

use crate::layout::{Layout2D, LayoutKind};

/// XOR swizzle over a 1D index space of `2^B * 2^S * 2^M` elements.
///
/// The index is viewed as bit fields `| B | S | M |`: the `M` low bits select
/// an element within a vector access, and the `S` field is XORed with the `B`
/// field. Applied to shared-memory offsets this spreads the rows of a tile
/// across banks so that column accesses do not conflict.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Swizzle<const B: u32, const M: u32, const S: u32>;

impl<const B: u32, const M: u32, const S: u32> Swizzle<B, M, S> {
    /// Permute a 1D index within the `2^B * 2^S * 2^M` swizzle space.
    pub const fn apply(idx: usize) -> usize {
        let bs = idx >> M;
        // (x, y) as a 2D coordinate over the (B, S) fields.
        let y = bs & ((1 << S) - 1);
        let x = bs >> S;

        let swizzled_y = x ^ y;

        (x << (M + S)) | (swizzled_y << M) | (idx & ((1 << M) - 1))
    }
}

/// A base layout composed with a [`Swizzle`].
///
/// The layout maps a 2D coordinate to a canonical 1D index, the swizzle
/// permutes that index, and the permuted index is re-interpreted as a 2D
/// coordinate in the same space before the base layout's offset function is
/// applied. The composition preserves the base layout's static metadata, so a
/// swizzled layout can stand in anywhere a plain one can.
///
/// Extents are constrained at compile time: a row-major base must be
/// `2^B x 2^(M+S)`, a column-major base the transpose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwizzledLayout<L, const B: u32, const M: u32, const S: u32>(PhantomData<L>);

impl<L: Layout2D, const B: u32, const M: u32, const S: u32> Layout2D
    for SwizzledLayout<L, B, M, S>
{
    const ROWS: usize = L::ROWS;
    const COLS: usize = L::COLS;
    const ROW_STRIDE: usize = L::ROW_STRIDE;
    const COL_STRIDE: usize = L::COL_STRIDE;
    const KIND: LayoutKind = L::KIND;
    const NUMEL: usize = L::NUMEL;

    fn offset(i: usize, j: usize) -> usize {
        const {
            match L::KIND {
                LayoutKind::RowMajor => {
                    assert!(L::ROWS == 1 << B, "a swizzled row-major layout requires 2^B rows");
                    assert!(
                        L::COLS == 1 << (M + S),
                        "a swizzled row-major layout requires 2^S * 2^M columns"
                    );
                }
                LayoutKind::ColMajor => {
                    assert!(
                        L::ROWS == 1 << (M + S),
                        "a swizzled col-major layout requires 2^S * 2^M rows"
                    );
                    assert!(L::COLS == 1 << B, "a swizzled col-major layout requires 2^B columns");
                }
            }
        }

        let coord_mask = (1 << (M + S)) - 1;
        match L::KIND {
            LayoutKind::RowMajor => {
                let idx = (i << (M + S)) | j;
                let swizzled = Swizzle::<B, M, S>::apply(idx);
                L::offset(swizzled >> (M + S), swizzled & coord_mask)
            }
            LayoutKind::ColMajor => {
                let idx = (j << (B + M)) | i;
                let swizzled = Swizzle::<B, M, S>::apply(idx);
                L::offset(swizzled & coord_mask, swizzled >> (M + S))
            }
        }
    }
}

impl<L: Layout2D + fmt::Display, const B: u32, const M: u32, const S: u32> fmt::Display
    for SwizzledLayout<L, B, M, S>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SwizzledLayout {{ {}, Swizzle<{}, {}, {}> }}", L::default(), B, M, S)
    }
}

/// Canonical swizzle parameters for one swizzle atom: the smallest tile that
/// a `Swizzle<B, M, S>` permutes as a unit, for a given element width and
/// atom size (64 or 128 bytes per row).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwizzleAtom {
    pub rows: usize,
    pub cols: usize,
    pub b: u32,
    pub m: u32,
    pub s: u32,
}

impl SwizzleAtom {
    /// Atom for elements of `elem_bits` width and rows of `atom_bytes` bytes.
    ///
    /// `elem_bits` must be a power of two no wider than 32 bits and
    /// `atom_bytes` one of 64 or 128.
    pub const fn new(elem_bits: usize, atom_bytes: usize) -> Self {
        assert!(elem_bits.is_power_of_two() && elem_bits <= 32);
        assert!(atom_bytes == 64 || atom_bytes == 128);

        let cols = atom_bytes * 8 / elem_bits;
        let rows = atom_bytes / 16;
        // M covers one 128-bit vector access, S the rest of the row.
        let m = (128 / elem_bits).trailing_zeros();
        let s = cols.trailing_zeros() - m;

        Self { rows, cols, b: rows.trailing_zeros(), m, s }
    }
}

use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::Tile;
use crate::layout::{Layout2D, LayoutKind, MatrixLayout};
use crate::shape::Underscore;

/// Linear offset of stripe `(x, y)` in a grid of `chunk_rows x chunk_cols`
/// chunks over a parent with the given strides.
const fn chunk_offset(
    kind: LayoutKind,
    x: usize,
    y: usize,
    chunk_rows: usize,
    chunk_cols: usize,
    row_stride: usize,
    col_stride: usize,
) -> usize {
    match kind {
        LayoutKind::RowMajor => x * (chunk_rows * row_stride) + y * chunk_cols,
        LayoutKind::ColMajor => x * chunk_rows + y * (col_stride * chunk_cols),
    }
}

/// Partitions a tile into a fixed grid of `CHUNK_ROWS x CHUNK_COLS` chunks
/// and exposes indexed access to them.
///
/// The stripe counts [`SC0`](Self::SC0) and [`SC1`](Self::SC1) are derived at
/// compile time; a chunk shape that does not evenly divide the tile shape
/// fails to compile. The iterator never moves or copies data — every access
/// is a pure offset computation over the shared base pointer, so any number
/// of execution units may index the same iterator concurrently. Sub-tiles
/// keep the parent's strides; only their logical extents shrink.
///
/// Access forms, dispatched through [`StripeIndex`]:
/// - `get((x, y))` returns the concrete sub-[`Tile`] at that stripe.
/// - `get(i)` is valid only for 1D stripe grids and maps `i` onto whichever
///   axis has more than one stripe.
/// - `get((x, Underscore))` / `get((Underscore, y))` fix one coordinate and
///   return a narrower iterator over the remaining axis.
pub struct TileIterator<
    'a,
    T,
    const ROWS: usize,
    const COLS: usize,
    const ROW_STRIDE: usize,
    const COL_STRIDE: usize,
    const CHUNK_ROWS: usize,
    const CHUNK_COLS: usize,
> {
    ptr: NonNull<T>,
    _borrow: PhantomData<&'a mut T>,
}

impl<
    'a,
    T,
    const ROWS: usize,
    const COLS: usize,
    const ROW_STRIDE: usize,
    const COL_STRIDE: usize,
    const CHUNK_ROWS: usize,
    const CHUNK_COLS: usize,
> TileIterator<'a, T, ROWS, COLS, ROW_STRIDE, COL_STRIDE, CHUNK_ROWS, CHUNK_COLS>
{
    /// Stripe count along the row axis.
    pub const SC0: usize = {
        assert!(ROWS % CHUNK_ROWS == 0, "chunk rows must evenly divide the tile rows");
        ROWS / CHUNK_ROWS
    };

    /// Stripe count along the column axis.
    pub const SC1: usize = {
        assert!(COLS % CHUNK_COLS == 0, "chunk cols must evenly divide the tile cols");
        COLS / CHUNK_COLS
    };

    pub const KIND: LayoutKind =
        <MatrixLayout<ROWS, COLS, ROW_STRIDE, COL_STRIDE> as Layout2D>::KIND;

    pub const NUMEL: usize = ROWS * COLS;

    /// Wraps `tile` in an iterator over its stripe grid.
    pub fn new(tile: Tile<'a, T, MatrixLayout<ROWS, COLS, ROW_STRIDE, COL_STRIDE>>) -> Self {
        // Forces the divisibility checks at monomorphization.
        let _ = (Self::SC0, Self::SC1);
        // SAFETY: the tile's pointer covers at least its own span, which
        // equals the region this iterator addresses.
        unsafe { Self::from_raw(tile.as_mut_ptr()) }
    }

    /// Creates an iterator from a raw base pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null (debug-asserted) and point to a region covering
    /// the parent tile's span for the duration of `'a`.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        debug_assert!(!ptr.is_null(), "tile iterator constructed from a null pointer");
        let _ = (Self::SC0, Self::SC1);
        Self {
            // SAFETY: non-null per the caller's contract.
            ptr: unsafe { NonNull::new_unchecked(ptr) },
            _borrow: PhantomData,
        }
    }

    /// Indexes the stripe grid; see the type-level docs for the accepted
    /// index forms and what each returns.
    pub fn get<I: StripeIndex<Self>>(&self, index: I) -> I::Output {
        index.index_into(self)
    }

    /// The entire underlying region as one tile, for consumers that do not
    /// care about the chunking.
    pub fn to_tile(&self) -> Tile<'a, T, MatrixLayout<ROWS, COLS, ROW_STRIDE, COL_STRIDE>> {
        // SAFETY: same region, same span, same lifetime.
        unsafe { Tile::from_raw(self.ptr.as_ptr()) }
    }

    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    pub fn as_mut_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<
    'a,
    T,
    const ROWS: usize,
    const COLS: usize,
    const ROW_STRIDE: usize,
    const COL_STRIDE: usize,
    const CHUNK_ROWS: usize,
    const CHUNK_COLS: usize,
> Clone for TileIterator<'a, T, ROWS, COLS, ROW_STRIDE, COL_STRIDE, CHUNK_ROWS, CHUNK_COLS>
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<
    'a,
    T,
    const ROWS: usize,
    const COLS: usize,
    const ROW_STRIDE: usize,
    const COL_STRIDE: usize,
    const CHUNK_ROWS: usize,
    const CHUNK_COLS: usize,
> Copy for TileIterator<'a, T, ROWS, COLS, ROW_STRIDE, COL_STRIDE, CHUNK_ROWS, CHUNK_COLS>
{
}

impl<
    'a,
    T,
    const ROWS: usize,
    const COLS: usize,
    const ROW_STRIDE: usize,
    const COL_STRIDE: usize,
    const CHUNK_ROWS: usize,
    const CHUNK_COLS: usize,
> fmt::Display for TileIterator<'a, T, ROWS, COLS, ROW_STRIDE, COL_STRIDE, CHUNK_ROWS, CHUNK_COLS>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "numel = {}, ChunkShape = ({}, {}), stripe count = ({}, {})",
            Self::NUMEL,
            CHUNK_ROWS,
            CHUNK_COLS,
            Self::SC0,
            Self::SC1
        )
    }
}

/// One of the index forms accepted by [`TileIterator::get`].
///
/// Integer coordinates select a concrete sub-tile; an [`Underscore`] in
/// either position keeps that axis whole and selects a narrower iterator.
/// Implementing this per index type keeps the resolution exhaustive at the
/// type level, so a slice can never be mistaken for a full index.
pub trait StripeIndex<I> {
    type Output;

    fn index_into(self, iter: &I) -> Self::Output;
}

impl<
    'a,
    T,
    const R: usize,
    const C: usize,
    const RS: usize,
    const CS: usize,
    const C0: usize,
    const C1: usize,
> StripeIndex<TileIterator<'a, T, R, C, RS, CS, C0, C1>> for (usize, usize)
{
    type Output = Tile<'a, T, MatrixLayout<C0, C1, RS, CS>>;

    fn index_into(self, iter: &TileIterator<'a, T, R, C, RS, CS, C0, C1>) -> Self::Output {
        let (x, y) = self;
        debug_assert!(
            x < TileIterator::<'a, T, R, C, RS, CS, C0, C1>::SC0
                && y < TileIterator::<'a, T, R, C, RS, CS, C0, C1>::SC1,
            "stripe coordinate out of range"
        );

        let offset = chunk_offset(
            TileIterator::<'a, T, R, C, RS, CS, C0, C1>::KIND,
            x,
            y,
            C0,
            C1,
            RS,
            CS,
        );
        // SAFETY: in-range stripes stay within the parent's span, and the
        // sub-tile inherits the parent's lifetime.
        unsafe { Tile::from_raw(iter.as_mut_ptr().add(offset)) }
    }
}

impl<
    'a,
    T,
    const R: usize,
    const C: usize,
    const RS: usize,
    const CS: usize,
    const C0: usize,
    const C1: usize,
> StripeIndex<TileIterator<'a, T, R, C, RS, CS, C0, C1>> for usize
{
    type Output = Tile<'a, T, MatrixLayout<C0, C1, RS, CS>>;

    fn index_into(self, iter: &TileIterator<'a, T, R, C, RS, CS, C0, C1>) -> Self::Output {
        const {
            assert!(R % C0 == 0 && C % C1 == 0, "chunk shape must evenly divide the tile shape");
            assert!(
                R / C0 == 1 || C / C1 == 1,
                "a single index is supported only when one stripe count is 1"
            );
        }

        // The index addresses whichever axis has more than one stripe.
        let (x, y) = if R / C0 == 1 { (0, self) } else { (self, 0) };
        (x, y).index_into(iter)
    }
}

impl<
    'a,
    T,
    const R: usize,
    const C: usize,
    const RS: usize,
    const CS: usize,
    const C0: usize,
    const C1: usize,
> StripeIndex<TileIterator<'a, T, R, C, RS, CS, C0, C1>> for (usize, Underscore)
{
    type Output = TileIterator<'a, T, C0, C, RS, CS, C0, C1>;

    fn index_into(self, iter: &TileIterator<'a, T, R, C, RS, CS, C0, C1>) -> Self::Output {
        let (x, _) = self;
        debug_assert!(
            x < TileIterator::<'a, T, R, C, RS, CS, C0, C1>::SC0,
            "stripe coordinate out of range"
        );

        // The sliced region keeps the parent's strides and full column
        // extent; only the row extent shrinks, so the row axis collapses to
        // a single stripe in the returned iterator.
        let offset = match TileIterator::<'a, T, R, C, RS, CS, C0, C1>::KIND {
            LayoutKind::RowMajor => x * (C0 * C),
            LayoutKind::ColMajor => x * C0,
        };
        // SAFETY: the selected stripe lies within the parent's span.
        unsafe { TileIterator::from_raw(iter.as_mut_ptr().add(offset)) }
    }
}

impl<
    'a,
    T,
    const R: usize,
    const C: usize,
    const RS: usize,
    const CS: usize,
    const C0: usize,
    const C1: usize,
> StripeIndex<TileIterator<'a, T, R, C, RS, CS, C0, C1>> for (Underscore, usize)
{
    type Output = TileIterator<'a, T, R, C1, RS, CS, C0, C1>;

    fn index_into(self, iter: &TileIterator<'a, T, R, C, RS, CS, C0, C1>) -> Self::Output {
        let (_, y) = self;
        debug_assert!(
            y < TileIterator::<'a, T, R, C, RS, CS, C0, C1>::SC1,
            "stripe coordinate out of range"
        );

        let offset = match TileIterator::<'a, T, R, C, RS, CS, C0, C1>::KIND {
            LayoutKind::RowMajor => y * C1,
            LayoutKind::ColMajor => y * (R * C1),
        };
        // SAFETY: the selected stripe lies within the parent's span.
        unsafe { TileIterator::from_raw(iter.as_mut_ptr().add(offset)) }
    }
}

use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::layout::Layout2D;

/// A non-owning, strided 2D view over a contiguous memory region.
///
/// A tile is a base pointer plus a compile-time [`Layout2D`]; it addresses
/// one tile of data at any level of the memory hierarchy (global, shared or
/// register storage). Copying a tile copies the view only, and sub-tiles
/// produced by a [`TileIterator`](crate::TileIterator) alias their parent's
/// memory by design. The `'a` lifetime ties every view back to the borrow of
/// the backing buffer; the buffer's owner manages its allocation.
///
/// The addressing math is pure and immediately valid for any copy of the
/// view. Whether the *contents* behind a computed address are ready to read
/// is a synchronization question the caller owns.
pub struct Tile<'a, T, L: Layout2D> {
    ptr: NonNull<T>,
    _borrow: PhantomData<&'a mut T>,
    _layout: PhantomData<L>,
}

impl<'a, T, L: Layout2D> Tile<'a, T, L> {
    pub const ROWS: usize = L::ROWS;
    pub const COLS: usize = L::COLS;
    pub const ROW_STRIDE: usize = L::ROW_STRIDE;
    pub const COL_STRIDE: usize = L::COL_STRIDE;
    pub const NUMEL: usize = L::NUMEL;

    /// Elements spanned by the layout, from the base pointer to one past the
    /// furthest addressable element.
    pub const SPAN: usize = (L::ROWS - 1) * L::ROW_STRIDE + (L::COLS - 1) * L::COL_STRIDE + 1;

    /// Creates a view over `data`, which must cover the layout's span.
    ///
    /// A short slice is a contract violation (debug assertion), not an error.
    pub fn from_slice(data: &'a mut [T]) -> Self {
        debug_assert!(data.len() >= Self::SPAN, "backing slice is shorter than the tile's span");
        // SAFETY: a slice pointer is never null, and the span was checked.
        unsafe { Self::from_raw(data.as_mut_ptr()) }
    }

    /// Creates a view from a raw base pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null (debug-asserted) and point to a region of at
    /// least [`Self::SPAN`] elements that stays valid for `'a`.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        debug_assert!(!ptr.is_null(), "tile constructed from a null pointer");
        Self {
            // SAFETY: non-null per the caller's contract.
            ptr: unsafe { NonNull::new_unchecked(ptr) },
            _borrow: PhantomData,
            _layout: PhantomData,
        }
    }

    /// Linear offset (in elements) of logical position `(i, j)`.
    pub fn offset(i: usize, j: usize) -> usize {
        L::offset(i, j)
    }

    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    pub fn as_mut_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Reads the element at logical position `(i, j)`.
    ///
    /// # Safety
    ///
    /// The position must be in range (debug-asserted) and the addressed
    /// element must be initialized and not written concurrently.
    pub unsafe fn read(&self, i: usize, j: usize) -> T {
        debug_assert!(i < L::ROWS && j < L::COLS, "tile position out of range");
        // SAFETY: in-range offsets stay within the span per the constructor.
        unsafe { self.ptr.as_ptr().add(L::offset(i, j)).read() }
    }

    /// Writes the element at logical position `(i, j)`.
    ///
    /// # Safety
    ///
    /// The position must be in range (debug-asserted) and no other view may
    /// access the addressed element concurrently.
    pub unsafe fn write(&self, i: usize, j: usize, value: T) {
        debug_assert!(i < L::ROWS && j < L::COLS, "tile position out of range");
        // SAFETY: see `read`.
        unsafe { self.ptr.as_ptr().add(L::offset(i, j)).write(value) }
    }
}

impl<'a, T, L: Layout2D> Clone for Tile<'a, T, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, L: Layout2D> Copy for Tile<'a, T, L> {}

impl<'a, T, L: Layout2D + fmt::Display> fmt::Display for Tile<'a, T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile {{ {} }}", L::default())
    }
}

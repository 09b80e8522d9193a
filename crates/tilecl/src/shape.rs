/// Compile-time 2D extent descriptor.
///
/// Zero-sized; the extents only exist as const generic parameters. Used as
/// the chunk shape when partitioning a tile into a stripe grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileShape<const D0: usize, const D1: usize>;

impl<const D0: usize, const D1: usize> TileShape<D0, D1> {
    pub const DIM0: usize = D0;
    pub const DIM1: usize = D1;

    /// Product of the extents. Extents must be strictly positive.
    pub const NUMEL: usize = {
        assert!(D0 > 0 && D1 > 0, "tile shape extents must be strictly positive");
        D0 * D1
    };

    pub const fn dims() -> [usize; 2] {
        [D0, D1]
    }

    pub const fn numel() -> usize {
        Self::NUMEL
    }
}

/// Wildcard index marker used for slicing.
///
/// Passing `Underscore` in place of a stripe coordinate keeps that axis whole
/// and turns the access into a slice: the iterator returns a narrower
/// iterator instead of a single sub-tile. Being a distinct type (rather than
/// a sentinel integer) makes the full-index and sliced-index operations
/// resolve to different [`StripeIndex`](crate::StripeIndex) impls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Underscore;

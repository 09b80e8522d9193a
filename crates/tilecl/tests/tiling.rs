//! End-to-end properties of the tile partitioning protocol: a stripe grid
//! must tile its parent exactly, slicing must commute with direct indexing,
//! and every derived view must keep the parent's strides.

use std::collections::HashSet;

use tilecl::layout::{ColMajor, MatrixLayout, RowMajor};
use tilecl::{Tile, TileIterator, Underscore};

fn element_offset<T>(base: *const T, ptr: *const T) -> usize {
    (ptr as usize - base as usize) / std::mem::size_of::<T>()
}

/// Absolute offsets of every element addressed by a `2x2` sub-tile rooted at
/// `sub`, relative to the parent buffer's base.
fn chunk_offsets(base: *const f32, sub: &Tile<'_, f32, MatrixLayout<2, 2, 8, 1>>) -> Vec<usize> {
    let start = element_offset(base, sub.as_ptr());
    (0..2)
        .flat_map(|i| (0..2).map(move |j| start + Tile::<f32, MatrixLayout<2, 2, 8, 1>>::offset(i, j)))
        .collect()
}

#[test]
fn stripe_grid_partitions_the_parent_exactly() {
    let mut data = vec![0.0f32; 32];
    let base = data.as_ptr();
    let tile = Tile::<f32, RowMajor<4, 8>>::from_slice(&mut data);
    let iter = TileIterator::<f32, 4, 8, 8, 1, 2, 2>::new(tile);

    // Every stripe contributes 4 addresses; together they must cover the
    // parent's 32 elements with no overlap and no gap.
    let mut seen = HashSet::new();
    for x in 0..2usize {
        for y in 0..4usize {
            let sub = iter.get((x, y));
            for offset in chunk_offsets(base, &sub) {
                assert!(seen.insert(offset), "stripes overlap at element {offset}");
            }
        }
    }
    assert_eq!(seen, (0..32).collect::<HashSet<_>>());
}

#[test]
fn known_stripe_addresses_row_major() {
    let mut data = vec![0.0f32; 32];
    let base = data.as_ptr();
    let tile = Tile::<f32, RowMajor<4, 8>>::from_slice(&mut data);
    let iter = TileIterator::<f32, 4, 8, 8, 1, 2, 2>::new(tile);

    assert_eq!(TileIterator::<f32, 4, 8, 8, 1, 2, 2>::SC0, 2);
    assert_eq!(TileIterator::<f32, 4, 8, 8, 1, 2, 2>::SC1, 4);

    // Stripe (1, 2): one chunk-row of 2 full rows down, two 2-wide chunks in.
    let sub = iter.get((1usize, 2usize));
    assert_eq!(element_offset(base, sub.as_ptr()), 20);
}

#[test]
fn slicing_and_indexing_commute() {
    let mut data = vec![0.0f32; 32];
    let base = data.as_ptr();
    let tile = Tile::<f32, RowMajor<4, 8>>::from_slice(&mut data);
    let iter = TileIterator::<f32, 4, 8, 8, 1, 2, 2>::new(tile);

    for x in 0..2usize {
        let sliced = iter.get((x, Underscore));
        assert_eq!(element_offset(base, sliced.as_ptr()), x * 16);
        for y in 0..4usize {
            // The sliced iterator's row axis is collapsed, so its single
            // index walks the column axis.
            assert_eq!(sliced.get(y).as_ptr(), iter.get((x, y)).as_ptr());
        }
    }

    for y in 0..4usize {
        let sliced = iter.get((Underscore, y));
        for x in 0..2usize {
            assert_eq!(sliced.get(x).as_ptr(), iter.get((x, y)).as_ptr());
        }
    }
}

#[test]
fn col_major_stripes_follow_column_strides() {
    let mut data = vec![0.0f32; 32];
    let base = data.as_ptr();
    let tile = Tile::<f32, ColMajor<4, 8>>::from_slice(&mut data);
    let iter = TileIterator::<f32, 4, 8, 1, 4, 2, 2>::new(tile);

    let mut seen = HashSet::new();
    for x in 0..2usize {
        for y in 0..4usize {
            let sub = iter.get((x, y));
            let start = element_offset(base, sub.as_ptr());
            assert_eq!(start, x * 2 + y * 8);
            for i in 0..2 {
                for j in 0..2 {
                    assert!(seen.insert(start + Tile::<f32, MatrixLayout<2, 2, 1, 4>>::offset(i, j)));
                }
            }
        }
    }
    assert_eq!(seen, (0..32).collect::<HashSet<_>>());

    // Col-major row slice advances along the contiguous row axis.
    let sliced = iter.get((1usize, Underscore));
    assert_eq!(element_offset(base, sliced.as_ptr()), 2);
    // Col-major column slice jumps whole columns.
    let sliced = iter.get((Underscore, 1usize));
    assert_eq!(element_offset(base, sliced.as_ptr()), 8);
}

#[test]
fn to_tile_recovers_the_unchunked_view() {
    let mut data: Vec<f32> = (0..32).map(|x| x as f32).collect();
    let base = data.as_ptr();
    let tile = Tile::<f32, RowMajor<4, 8>>::from_slice(&mut data);
    let iter = TileIterator::<f32, 4, 8, 8, 1, 2, 2>::new(tile);

    let whole = iter.to_tile();
    assert_eq!(whole.as_ptr(), base);
    assert_eq!(unsafe { whole.read(3, 7) }, 31.0);

    // A sliced iterator's to_tile covers the slice's region with the
    // parent's strides.
    let sliced = iter.get((1usize, Underscore));
    let slice_tile = sliced.to_tile();
    assert_eq!(element_offset(base, slice_tile.as_ptr()), 16);
    assert_eq!(unsafe { slice_tile.read(1, 3) }, 27.0);
}

#[test]
fn sub_tiles_write_through_to_the_parent_buffer() {
    let mut data = vec![0.0f32; 32];
    {
        let tile = Tile::<f32, RowMajor<4, 8>>::from_slice(&mut data);
        let iter = TileIterator::<f32, 4, 8, 8, 1, 2, 2>::new(tile);
        let sub = iter.get((1usize, 2usize));
        unsafe {
            sub.write(0, 0, 1.0);
            sub.write(1, 1, 2.0);
        }
    }
    // (1, 2) starts at 20; (1, 1) within the chunk adds one row stride + 1.
    assert_eq!(data[20], 1.0);
    assert_eq!(data[29], 2.0);
}

#[test]
fn nested_chunking_reaches_register_fragments() {
    let mut data = vec![0.0f32; 64 * 64];
    let base = data.as_ptr();
    let tile = Tile::<f32, RowMajor<64, 64>>::from_slice(&mut data);

    // A 64x64 panel in 16x64 warp stripes, each further chunked 16x16.
    let warps = TileIterator::<f32, 64, 64, 64, 1, 16, 64>::new(tile);
    let warp = warps.get(2usize);
    assert_eq!(element_offset(base, warp.as_ptr()), 2 * 16 * 64);

    let frags = TileIterator::<f32, 16, 64, 64, 1, 16, 16>::new(warp);
    let frag = frags.get(3usize);
    assert_eq!(element_offset(base, frag.as_ptr()), 2 * 16 * 64 + 3 * 16);
}

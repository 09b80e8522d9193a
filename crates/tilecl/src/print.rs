//! Host-side diagnostic rendering of tile contents.
//!
//! Static shape/stride metadata prints through the `Display` impls on the
//! layout, tile and iterator types; this module renders the *data* behind a
//! tile, which requires reading through the view.

use core::fmt::{self, Write};

use crate::layout::Layout2D;
use crate::{Element, Tile};

/// Renders a tile's contents as a `%.2f` grid, one line per row, with a
/// blank separator line every 16 rows.
///
/// # Safety
///
/// Every element addressed by the tile's layout must be initialized and not
/// written concurrently while the dump runs.
pub unsafe fn dump_tile<T: Element, L: Layout2D, W: Write>(
    out: &mut W,
    tile: &Tile<'_, T, L>,
) -> fmt::Result {
    for i in 0..L::ROWS {
        for j in 0..L::COLS {
            // SAFETY: (i, j) is in range; initialization is the caller's contract.
            let value = unsafe { tile.read(i, j) };
            write!(out, "{:.2}, ", value.to_f32())?;
        }
        writeln!(out)?;

        if i > 0 && (i + 1) % 16 == 0 {
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RowMajor;

    #[test]
    fn dumps_row_major_contents() {
        let mut data: Vec<f32> = (0..6).map(|x| x as f32).collect();
        let tile = Tile::<f32, RowMajor<2, 3>>::from_slice(&mut data);

        let mut out = String::new();
        unsafe { dump_tile(&mut out, &tile).unwrap() };
        assert_eq!(out, "0.00, 1.00, 2.00, \n3.00, 4.00, 5.00, \n");
    }

    #[test]
    fn separates_blocks_of_16_rows() {
        let mut data = vec![half::f16::from_f32(1.0); 32];
        let tile = Tile::<half::f16, RowMajor<32, 1>>::from_slice(&mut data);

        let mut out = String::new();
        unsafe { dump_tile(&mut out, &tile).unwrap() };
        // 32 data rows plus two separator lines.
        assert_eq!(out.lines().filter(|l| l.is_empty()).count(), 2);
        assert!(out.starts_with("1.00, \n"));
    }
}

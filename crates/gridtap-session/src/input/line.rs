//! Integer line rasterization between board cells.

use gridtap_core::CellIndex;

/// Returns every cell on the straight raster line from `from` to `to`,
/// inclusive of both endpoints.
///
/// Used by the long-press drag: the pointer is sampled at frame rate, so a
/// fast sweep can jump several cells between samples. Filling the
/// rasterized path keeps the selection contiguous no matter how fast the
/// pointer moves.
///
/// # Examples
///
/// ```
/// use gridtap_core::CellIndex;
/// use gridtap_session::input::line::raster_line;
///
/// // A knight-ish jump from r1c1 to r2c2 passes through both.
/// let line = raster_line(CellIndex::new(0), CellIndex::new(10));
/// assert_eq!(line.first(), Some(&CellIndex::new(0)));
/// assert_eq!(line.last(), Some(&CellIndex::new(10)));
/// ```
#[must_use]
pub fn raster_line(from: CellIndex, to: CellIndex) -> Vec<CellIndex> {
    if from == to {
        return vec![from];
    }

    let (r1, c1) = (i16::from(from.row()), i16::from(from.col()));
    let (r2, c2) = (i16::from(to.row()), i16::from(to.col()));

    let step_r: i16 = if r2 > r1 { 1 } else { -1 };
    let step_c: i16 = if c2 > c1 { 1 } else { -1 };
    let dr = (r2 - r1).abs();
    let dc = (c2 - c1).abs();

    let mut cells = Vec::with_capacity((dr.max(dc) + 1) as usize);
    let (mut r, mut c) = (r1, c1);
    cells.push(cell_at(r, c));

    if dc > dr {
        // Mostly horizontal.
        let mut err = dc / 2;
        while c != c2 {
            err -= dr;
            if err < 0 {
                r += step_r;
                err += dc;
            }
            c += step_c;
            cells.push(cell_at(r, c));
        }
    } else {
        // Mostly vertical (ties included).
        let mut err = dr / 2;
        while r != r2 {
            err -= dc;
            if err < 0 {
                c += step_c;
                err += dr;
            }
            r += step_r;
            cells.push(cell_at(r, c));
        }
    }
    cells
}

#[expect(clippy::cast_sign_loss)]
fn cell_at(r: i16, c: i16) -> CellIndex {
    debug_assert!((0..9).contains(&r) && (0..9).contains(&c));
    CellIndex::from_row_col(r as u8, c as u8)
}

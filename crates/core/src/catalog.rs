//! Piece catalog - shape matrices and the rotation transform.
//!
//! Each kind has one canonical spawn matrix; rotation states are derived at
//! runtime by a 90-degree transpose-then-row-reverse on the piece's own copy.
//! Every spawn hands out a fresh matrix, so rotating one piece can never alias
//! the catalog template or another piece.

use tui_blockfall_types::PieceKind;

/// A square matrix of cell values describing one piece in one rotation state.
///
/// Side lengths are 2 (O), 3 (T/L/J/S/Z) or 4 (I). Filled cells carry the
/// kind's fixed cell value; empty cells are 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMatrix {
    rows: Vec<Vec<u8>>,
}

impl ShapeMatrix {
    fn from_rows(rows: Vec<Vec<u8>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == rows.len()));
        Self { rows }
    }

    /// Side length of the square matrix.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Cell value at (row, col). Callers stay within `0..size()`.
    pub fn value_at(&self, row: usize, col: usize) -> u8 {
        self.rows[row][col]
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Iterate over the filled cells as `(row, col, value)`.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, v)| **v != 0)
                .map(move |(c, v)| (r, c, *v))
        })
    }

    /// Rotate 90 degrees clockwise in place: transpose, then reverse each row.
    pub fn rotate_cw(&mut self) {
        let n = self.rows.len();
        for r in 0..n {
            for c in 0..r {
                let tmp = self.rows[r][c];
                self.rows[r][c] = self.rows[c][r];
                self.rows[c][r] = tmp;
            }
        }
        for row in &mut self.rows {
            row.reverse();
        }
    }
}

/// Produce a fresh, independently-mutable shape matrix for `kind`.
///
/// Pure and stateless; the fill value matches [`PieceKind::cell_value`].
pub fn spawn_shape(kind: PieceKind) -> ShapeMatrix {
    let rows = match kind {
        PieceKind::T => vec![
            vec![0, 1, 0], //
            vec![1, 1, 1],
            vec![0, 0, 0],
        ],
        PieceKind::O => vec![
            vec![2, 2], //
            vec![2, 2],
        ],
        PieceKind::L => vec![
            vec![0, 0, 3], //
            vec![3, 3, 3],
            vec![0, 0, 0],
        ],
        PieceKind::J => vec![
            vec![4, 0, 0], //
            vec![4, 4, 4],
            vec![0, 0, 0],
        ],
        PieceKind::I => vec![
            vec![0, 0, 0, 0],
            vec![5, 5, 5, 5],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ],
        PieceKind::S => vec![
            vec![0, 6, 6], //
            vec![6, 6, 0],
            vec![0, 0, 0],
        ],
        PieceKind::Z => vec![
            vec![7, 7, 0], //
            vec![0, 7, 7],
            vec![0, 0, 0],
        ],
    };
    ShapeMatrix::from_rows(rows)
}

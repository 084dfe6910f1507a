//! Grid module - the locked-cell matrix.
//!
//! Flat row-major `Vec<u8>` storage for configurable dimensions, indexed as
//! `y * width + x`. 0 is empty; 1-7 identify the piece kind that locked there.
//!
//! Collision rule for rows above the visible grid: cells whose target row is
//! negative are skipped entirely. No content or horizontal-bounds check applies
//! above row 0, so a freshly spawned piece overlapping the top edge never
//! reports a false lock.

use crate::piece::ActivePiece;

/// The playfield grid holding locked cell values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    cells: Vec<u8>,
}

impl Grid {
    /// Create an empty grid. Dimensions are validated upstream by
    /// [`crate::config::EngineConfig`].
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Cell value at (x, y), or `None` when out of bounds.
    pub fn get(&self, x: i16, y: i16) -> Option<u8> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set a cell. Returns false when out of bounds.
    pub fn set(&mut self, x: i16, y: i16, value: u8) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// True iff any filled cell of the piece, translated by its position,
    /// overlaps a non-empty grid cell or exceeds the left, right or bottom
    /// bounds. Rows above the top are never colliding.
    pub fn collides(&self, piece: &ActivePiece) -> bool {
        for (r, c, _) in piece.shape().filled_cells() {
            let x = piece.x() + c as i16;
            let y = piece.y() + r as i16;
            if y < 0 {
                continue;
            }
            match self.get(x, y) {
                Some(0) => {}
                // Occupied, or outside [0,width) / below the floor.
                _ => return true,
            }
        }
        false
    }

    /// Write the piece's filled cells into the grid.
    ///
    /// Precondition: the caller has confirmed `!collides(piece)` at this
    /// position; merge does not re-check. Filled cells above row 0 are
    /// dropped.
    pub fn merge(&mut self, piece: &ActivePiece) {
        for (r, c, v) in piece.shape().filled_cells() {
            let x = piece.x() + c as i16;
            let y = piece.y() + r as i16;
            if y >= 0 {
                self.set(x, y, v);
            }
        }
    }

    /// True when row `y` has no empty cell.
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        let start = y * self.width as usize;
        let end = start + self.width as usize;
        self.cells[start..end].iter().all(|&v| v != 0)
    }

    /// Remove every full row, insert empty rows at the top, and return the
    /// count removed.
    ///
    /// Bottom-up two-pointer compaction: full rows are skipped while the
    /// remaining rows slide down, so simultaneous full rows can never be
    /// missed through index shifting.
    pub fn sweep(&mut self) -> u32 {
        let width = self.width as usize;
        let mut cleared = 0u32;
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    let dst = write_y * width;
                    self.cells.copy_within(src..src + width, dst);
                }
            }
        }

        // Blank the freed rows at the top.
        self.cells[..write_y * width].fill(0);
        cleared
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Read-only view of the flat cell array, row-major.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

//! ActivePiece - the currently falling piece.
//!
//! Owns its shape matrix (deep-copied from the catalog at spawn) and a
//! grid-relative position. Movement and rotation are tentative: the mutation
//! is applied, checked against the grid, and reverted on collision.

use tui_blockfall_types::PieceKind;

use crate::catalog::{spawn_shape, ShapeMatrix};
use crate::grid::Grid;

/// Wall-kick search offsets, in priority order. The first offset that yields a
/// non-colliding placement wins.
pub const KICK_OFFSETS: [i16; 5] = [0, -1, 1, -2, 2];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    shape: ShapeMatrix,
    x: i16,
    y: i16,
}

impl ActivePiece {
    /// Spawn a fresh piece horizontally centered on row 0.
    ///
    /// The caller must immediately check [`Grid::collides`] to detect top-out.
    pub fn spawn(kind: PieceKind, grid_width: u8) -> Self {
        let shape = spawn_shape(kind);
        let x = (grid_width as i16 - shape.size() as i16) / 2;
        Self {
            kind,
            shape,
            x,
            y: 0,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> &ShapeMatrix {
        &self.shape
    }

    pub fn x(&self) -> i16 {
        self.x
    }

    pub fn y(&self) -> i16 {
        self.y
    }

    /// Tentatively move horizontally by `dx`. Reverts and reports failure on
    /// collision.
    pub fn translate(&mut self, grid: &Grid, dx: i16) -> bool {
        self.x += dx;
        if grid.collides(self) {
            self.x -= dx;
            return false;
        }
        true
    }

    /// Tentatively advance one row down. A failed advance is the lock signal;
    /// the caller merges at the reverted position.
    pub fn step_down(&mut self, grid: &Grid) -> bool {
        self.y += 1;
        if grid.collides(self) {
            self.y -= 1;
            return false;
        }
        true
    }

    /// Rotate 90 degrees clockwise with a wall-kick search.
    ///
    /// The rotation is applied to a working copy and tried at each
    /// [`KICK_OFFSETS`] entry from the pre-rotation x. The first non-colliding
    /// offset commits both the rotated matrix and the shifted position; if
    /// none succeeds the piece is left exactly as it was.
    pub fn rotate(&mut self, grid: &Grid) -> bool {
        let original_x = self.x;
        let mut rotated = self.shape.clone();
        rotated.rotate_cw();
        let upright = std::mem::replace(&mut self.shape, rotated);

        for dx in KICK_OFFSETS {
            self.x = original_x + dx;
            if !grid.collides(self) {
                return true;
            }
        }

        // All kicks collided: discard the rotation entirely.
        self.shape = upright;
        self.x = original_x;
        false
    }
}

//! Read-only state snapshots handed to presenters.
//!
//! A snapshot is a plain value copied out of the session; renderers never
//! borrow live game state across a frame.

use tui_blockfall_types::{Phase, PieceKind};

use crate::catalog::ShapeMatrix;
use crate::piece::ActivePiece;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub x: i16,
    pub y: i16,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(piece: &ActivePiece) -> Self {
        Self {
            kind: piece.kind(),
            shape: piece.shape().clone(),
            x: piece.x(),
            y: piece.y(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Settled cells, row-major, without the active piece.
    pub cells: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub drop_interval_ms: f64,
}

impl GameSnapshot {
    /// Cell value at `(x, y)` with the active piece composited on top.
    /// Out-of-range coordinates read as empty.
    pub fn cell_at(&self, x: u8, y: u8) -> u8 {
        if let Some(active) = &self.active {
            let size = active.shape.size() as i16;
            let (dx, dy) = (x as i16 - active.x, y as i16 - active.y);
            if (0..size).contains(&dx) && (0..size).contains(&dy) {
                let value = active.shape.value_at(dy as usize, dx as usize);
                if value != 0 {
                    return value;
                }
            }
        }
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    pub fn playable(&self) -> bool {
        self.phase.running()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            active: None,
            phase: Phase::Idle,
            score: 0,
            level: 1,
            drop_interval_ms: 0.0,
        }
    }
}

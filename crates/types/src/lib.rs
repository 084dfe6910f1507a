//! Shared types and constants for the blockfall engine.
//!
//! Pure data with no external dependencies, usable from the core engine,
//! the input router and the terminal presenter alike.

/// Default grid dimensions (columns x rows).
pub const DEFAULT_GRID_WIDTH: u8 = 12;
pub const DEFAULT_GRID_HEIGHT: u8 = 20;

/// Fixed timestep for the frame loop (milliseconds, ~60 FPS).
pub const TICK_MS: u32 = 16;

/// Gravity curve: interval at level 1, per-level decay factor, and the floor
/// the interval never drops below.
pub const BASE_DROP_INTERVAL_MS: f64 = 1000.0;
pub const DROP_INTERVAL_DECAY: f64 = 0.85;
pub const DROP_INTERVAL_FLOOR_MS: f64 = 120.0;

/// Scoring: fixed points per cleared row; level advances every
/// `POINTS_PER_LEVEL` points.
pub const POINTS_PER_LINE: u32 = 10;
pub const POINTS_PER_LEVEL: u32 = 50;

/// DAS/ARR timing for the terminal input handler (milliseconds).
pub const DEFAULT_DAS_MS: u32 = 150;
pub const DEFAULT_ARR_MS: u32 = 50;
pub const SOFT_DROP_DAS_MS: u32 = 0;
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// The seven piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,
    O,
    L,
    J,
    I,
    S,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// The non-zero cell value this kind writes into grid and shape cells.
    ///
    /// Grid cells and shape-matrix cells share this value space, so locking a
    /// piece is a direct assignment.
    pub fn cell_value(&self) -> u8 {
        match self {
            PieceKind::T => 1,
            PieceKind::O => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::I => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`cell_value`](Self::cell_value). Returns `None` for 0 and
    /// out-of-range values.
    pub fn from_cell_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(PieceKind::T),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::J),
            5 => Some(PieceKind::I),
            6 => Some(PieceKind::S),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "T",
            PieceKind::O => "O",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::I => "I",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }
}

/// Engine commands issued by an input router.
///
/// `Pause` is an intent: the caller dispatches it to `pause()` or `resume()`
/// depending on the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Pause,
    Restart,
}

/// Session lifecycle phase. The variants are mutually exclusive by
/// construction; a session cannot be paused and game-over at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Created but never started.
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl Phase {
    pub fn running(&self) -> bool {
        matches!(self, Phase::Running)
    }

    pub fn paused(&self) -> bool {
        matches!(self, Phase::Paused)
    }

    pub fn game_over(&self) -> bool {
        matches!(self, Phase::GameOver)
    }
}

/// Events emitted by the engine, in occurrence order, one list per command.
///
/// Presenters key their cues off these instead of the engine calling into
/// audio or rendering directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Horizontal move committed.
    Moved,
    /// Rotation committed (possibly with a kick offset).
    Rotated,
    /// The active piece advanced one row down.
    RowAdvanced,
    /// The active piece merged into the grid.
    Locked,
    /// `count` full rows were swept.
    LinesCleared { count: u32 },
    /// The level changed as a result of scoring.
    LeveledUp { new_level: u32 },
    /// A freshly spawned piece collided; the session is over.
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_values_roundtrip() {
        for kind in PieceKind::ALL {
            let v = kind.cell_value();
            assert!((1..=7).contains(&v));
            assert_eq!(PieceKind::from_cell_value(v), Some(kind));
        }
        assert_eq!(PieceKind::from_cell_value(0), None);
        assert_eq!(PieceKind::from_cell_value(8), None);
    }

    #[test]
    fn test_cell_values_are_distinct() {
        let mut seen = [false; 8];
        for kind in PieceKind::ALL {
            let v = kind.cell_value() as usize;
            assert!(!seen[v], "duplicate cell value {}", v);
            seen[v] = true;
        }
    }

    #[test]
    fn test_phase_flags_are_mutually_exclusive() {
        for phase in [Phase::Idle, Phase::Running, Phase::Paused, Phase::GameOver] {
            let flags = [phase.running(), phase.paused(), phase.game_over()];
            assert!(flags.iter().filter(|f| **f).count() <= 1);
        }
    }
}

//! Core game logic - pure, deterministic, and testable.
//!
//! This crate contains all game rules and state management. It has zero
//! dependencies on UI or I/O:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Headless**: drives equally well from a terminal loop or a test
//!
//! # Module Structure
//!
//! - [`catalog`]: piece shape matrices and clockwise rotation
//! - [`grid`]: the settled playfield with collision, merge and row sweeping
//! - [`piece`]: the falling piece with translate, step and kicked rotation
//! - [`session`]: lifecycle, command handling, timing, scoring
//! - [`snapshot`]: plain-value state copies for presenters
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::{EngineConfig, GameSession};
//!
//! let mut session = GameSession::new(EngineConfig::default(), 42);
//! session.start();
//! session.move_piece(-1);
//! session.soft_drop();
//! assert!(session.running());
//! ```
//!
//! # Timing
//!
//! The session owns no clock. Call [`GameSession::tick`] every frame with the
//! elapsed milliseconds; a piece advances one row whenever the accumulated
//! time exceeds the current drop interval.

pub mod catalog;
pub mod config;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tui_blockfall_types as types;

pub use catalog::{spawn_shape, ShapeMatrix};
pub use config::{ConfigError, EngineConfig};
pub use grid::Grid;
pub use piece::{ActivePiece, KICK_OFFSETS};
pub use rng::{PieceSampler, SimpleRng};
pub use scoring::{drop_interval_for_level, level_for_score, score_for_clear};
pub use session::{Events, GameSession};
pub use snapshot::{ActiveSnapshot, GameSnapshot};

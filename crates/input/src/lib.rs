//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::Command`] and provides a
//! DAS/ARR input router suitable for terminal environments (including terminals
//! without key-release events).

pub mod map;
pub mod router;

pub use tui_blockfall_types as types;

pub use map::{map_key_event, should_quit};
pub use router::InputRouter;

//! Engine configuration, validated at construction.
//!
//! Malformed dimensions or intervals are programmer/config errors and fail
//! fast here; nothing inside a running session returns a `Result`.

use thiserror::Error;

use tui_blockfall_types::{BASE_DROP_INTERVAL_MS, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u8, height: u8 },
    #[error("base drop interval must be positive and finite, got {0} ms")]
    InvalidDropInterval(f64),
}

/// Validated session configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    width: u8,
    height: u8,
    base_drop_interval_ms: f64,
}

impl EngineConfig {
    /// Configuration with the default gravity curve base.
    pub fn new(width: u8, height: u8) -> Result<Self, ConfigError> {
        Self::with_base_interval(width, height, BASE_DROP_INTERVAL_MS)
    }

    pub fn with_base_interval(
        width: u8,
        height: u8,
        base_drop_interval_ms: f64,
    ) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        if !base_drop_interval_ms.is_finite() || base_drop_interval_ms <= 0.0 {
            return Err(ConfigError::InvalidDropInterval(base_drop_interval_ms));
        }
        Ok(Self {
            width,
            height,
            base_drop_interval_ms,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn base_drop_interval_ms(&self) -> f64 {
        self.base_drop_interval_ms
    }
}

impl Default for EngineConfig {
    /// The reference 12x20 grid with a 1000 ms base interval.
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            base_drop_interval_ms: BASE_DROP_INTERVAL_MS,
        }
    }
}

//! Persist the best score to disk (XDG config or ~/.config/tui-blockfall).

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

const FILENAME: &str = "best_score";

/// Returns the path to the best score file (config dir / tui-blockfall / best_score).
fn config_path() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if xdg.is_empty() {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".config")
        } else {
            PathBuf::from(xdg)
        }
    } else {
        std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".config"))
            .unwrap_or_else(|_| PathBuf::from("."))
    };
    base.join("tui-blockfall").join(FILENAME)
}

/// Load the best score from disk; 0 on missing or unparsable file.
pub fn load_best_score() -> u32 {
    fs::read_to_string(config_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

/// Save the best score to disk. Creates the config directory if needed.
pub fn save_best_score(score: u32) -> Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{}\n", score))?;
    Ok(())
}

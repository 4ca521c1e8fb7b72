//! Level file I/O

use super::decoder::Plan;
use super::level::Level;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a level file: one row per line, `#` wall, `.` empty, `G` goal, `B` box, `P` player
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<Level> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read level file: {}", path.as_ref().display()))?;

    let level = Level::parse(&content)
        .with_context(|| format!("Failed to parse level file: {}", path.as_ref().display()))?;

    log::debug!(
        "loaded level {}: {} boxes, {} goals",
        path.as_ref().display(),
        level.boxes().len(),
        level.goals().len()
    );
    Ok(level)
}

/// Write a level in the same text format
pub fn save_level<P: AsRef<Path>>(level: &Level, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, level.to_text())
        .with_context(|| format!("Failed to write level file: {}", path.as_ref().display()))?;
    Ok(())
}

/// Write the move string of a plan, newline terminated
pub fn save_moves<P: AsRef<Path>>(plan: &Plan, path: P) -> Result<()> {
    std::fs::write(&path, format!("{}\n", plan.move_string()))
        .with_context(|| format!("Failed to write moves: {}", path.as_ref().display()))?;
    Ok(())
}

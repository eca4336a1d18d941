//! History persistence.
//!
//! Sessions are saved in the export shape:
//!
//! ```json
//! { "total_people": 72, "group_size": 12,
//!   "rounds": [ { "round": 1, "groups": [["ByteKnight", "..."], ...] } ] }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use grouping_kernel::HistoryExport;

/// Default file name, e.g. `grouping_history_20260108_010530.json`.
pub fn default_history_path() -> PathBuf {
    PathBuf::from(format!(
        "grouping_history_{}.json",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Save history as pretty-printed UTF-8 JSON.
pub fn save_history(history: &HistoryExport, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(history)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write history to {}", path.display()))?;
    Ok(())
}

/// Load a previously saved history.
pub fn load_history(path: impl AsRef<Path>) -> Result<HistoryExport> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read history from {}", path.display()))?;
    let history = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a grouping history", path.display()))?;
    Ok(history)
}

// crates/livewall-ui/src/paths.rs
// Single source of truth for where LiveWall keeps its config and preferences.

use std::path::PathBuf;

pub const APP_ID:      &str = "LiveWall";
pub const CONFIG_FILE: &str = "config.json";
pub const PREFS_FILE:  &str = "prefs.json";

/// eframe's per-app storage dir, e.g. `~/.local/share/LiveWall` on Linux.
/// Falls back to the temp dir when the platform reports none.
pub fn app_data_dir() -> PathBuf {
    eframe::storage_dir(APP_ID).unwrap_or_else(|| std::env::temp_dir().join(APP_ID))
}

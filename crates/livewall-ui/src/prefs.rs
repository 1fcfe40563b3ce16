// crates/livewall-ui/src/prefs.rs
//
// Durable key/value preferences in `prefs.json`. The whole map is rewritten on
// every set; the last write wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use livewall_core::targets::PreferenceStore;

pub struct JsonFileStore {
    path:   PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open `path`, starting empty if it is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match read_map(&path) {
            Ok(v) => v,
            Err(e) => {
                warn!("[prefs] {e:#}; starting with empty preferences");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    fn flush(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let text = serde_json::to_string_pretty(&self.values).context("encoding preferences")?;
        fs::write(&self.path, text)
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

fn read_map(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))
}

impl PreferenceStore for JsonFileStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            warn!("[prefs] {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livewall_core::targets::PREFS_KEY;
    use tempfile::TempDir;

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get_string(PREFS_KEY), None);
        store.set_string(PREFS_KEY, r#"{"opera":false,"gx":true}"#.into());

        let reopened = JsonFileStore::open(&path);
        assert_eq!(
            reopened.get_string(PREFS_KEY).as_deref(),
            Some(r#"{"opera":false,"gx":true}"#),
        );
    }

    #[test]
    fn last_write_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        let mut store = JsonFileStore::open(&path);
        store.set_string("k", "1".into());
        store.set_string("k", "2".into());
        assert_eq!(JsonFileStore::open(&path).get_string("k").as_deref(), Some("2"));
    }

    #[test]
    fn corrupt_file_starts_empty_and_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get_string("k"), None);
        store.set_string("k", "v".into());
        assert_eq!(JsonFileStore::open(&path).get_string("k").as_deref(), Some("v"));
    }
}

// crates/livewall-ui/src/config.rs
//
// AppConfig: optional `config.json` in the app data dir. Every field has a
// default, so a partial file is fine and a missing file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use livewall_media::{resolve_program, BridgeCommand};

use crate::paths::CONFIG_FILE;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend program. `$LIVEWALL_BRIDGE` still wins over this.
    pub bridge_program: Option<PathBuf>,
    pub bridge_args:    Vec<String>,
    /// false: skip the native dialog and show the path field straight away.
    pub native_dialog:  bool,
    /// EnvFilter directive used when RUST_LOG is unset.
    pub log_filter:     String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bridge_program: None,
            bridge_args:    Vec::new(),
            native_dialog:  true,
            log_filter:     "info".into(),
        }
    }
}

impl AppConfig {
    /// Read `config.json` from `dir`. A missing file is not an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))
    }

    pub fn bridge(&self) -> BridgeCommand {
        BridgeCommand::new(
            resolve_program(self.bridge_program.as_deref()),
            self.bridge_args.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load(dir.path()).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert!(cfg.native_dialog);
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"native_dialog": false, "bridge_args": ["--json"]}"#,
        ).unwrap();
        let cfg = AppConfig::load(dir.path()).unwrap();
        assert!(!cfg.native_dialog);
        assert_eq!(cfg.bridge_args, vec!["--json"]);
        assert_eq!(cfg.bridge_program, None);
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn broken_file_is_an_error_naming_the_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{ nope").unwrap();
        let err = AppConfig::load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains(CONFIG_FILE));
    }

    #[test]
    fn configured_program_is_used_when_present() {
        let dir = TempDir::new().unwrap();
        let prog = dir.path().join("my-bridge");
        fs::write(&prog, "").unwrap();
        let cfg = AppConfig {
            bridge_program: Some(prog.clone()),
            bridge_args:    vec!["serve".into()],
            ..AppConfig::default()
        };
        let bridge = cfg.bridge();
        // $LIVEWALL_BRIDGE is not set in the test environment.
        if std::env::var_os(livewall_media::resolve::ENV_OVERRIDE).is_none() {
            assert_eq!(bridge.program, prog);
        }
        assert_eq!(bridge.args, vec!["serve"]);
    }
}

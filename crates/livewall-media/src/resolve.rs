// crates/livewall-media/src/resolve.rs
//
// Locate the backend program. Apps launched from a desktop session often get
// a minimal PATH, so a few well-known install directories are searched too.
//
// Order: $LIVEWALL_BRIDGE → configured path → PATH → common dirs → bare name.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub const ENV_OVERRIDE: &str = "LIVEWALL_BRIDGE";
pub const PROGRAM_NAME: &str = "livewall-bridge";

#[cfg(target_os = "macos")]
const COMMON_DIRS: &[&str] = &["/opt/homebrew/bin", "/usr/local/bin", "/usr/bin"];
#[cfg(not(target_os = "macos"))]
const COMMON_DIRS: &[&str] = &["/usr/local/bin", "/usr/bin", "/bin"];

/// Resolve against the live process environment.
pub fn resolve_program(configured: Option<&Path>) -> PathBuf {
    resolve_with(env::var_os(ENV_OVERRIDE), configured, env::var_os("PATH"), COMMON_DIRS)
}

/// Resolution with every input explicit.
pub fn resolve_with(
    env_value:  Option<OsString>,
    configured: Option<&Path>,
    path_var:   Option<OsString>,
    common:     &[&str],
) -> PathBuf {
    if let Some(val) = env_value.filter(|v| !v.is_empty()) {
        let p = PathBuf::from(val);
        if p.is_file() {
            debug!("[bridge] using ${ENV_OVERRIDE}: {}", p.display());
            return p;
        }
        warn!("[bridge] ${ENV_OVERRIDE} points at missing file {}", p.display());
    }

    if let Some(p) = configured {
        if p.is_file() {
            debug!("[bridge] using configured program {}", p.display());
            return p.to_path_buf();
        }
        warn!("[bridge] configured program {} not found", p.display());
    }

    let file_name = format!("{PROGRAM_NAME}{}", env::consts::EXE_SUFFIX);

    let on_path = path_var
        .iter()
        .flat_map(env::split_paths)
        .chain(common.iter().map(PathBuf::from))
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file());

    match on_path {
        Some(p) => {
            debug!("[bridge] found {}", p.display());
            p
        }
        None => {
            warn!("[bridge] {file_name} not found; relying on spawn-time lookup");
            PathBuf::from(file_name)
        }
    }
}

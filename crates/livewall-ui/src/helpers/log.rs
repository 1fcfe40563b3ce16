// crates/livewall-ui/src/helpers/log.rs
//
// Logging for every crate in the app.
//
// In release builds with `windows_subsystem = "windows"` (double-click launch)
// there is no console, so stderr output is silently discarded. Everything is
// therefore also appended to a file in the OS temp directory.
//
// File: %TEMP%\livewall.log (or $TMPDIR/livewall.log), append-only.
//
// Usage: plain tracing macros with a bracketed subsystem prefix:
//   tracing::info!("[export] job {job_id} done → {zip}");

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_FILE: &str = "livewall.log";

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE)
}

/// `RUST_LOG` if set, else `default_filter`, else plain `info`.
pub fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber: stderr plus the temp log file.
/// Never panics. A log file that cannot be opened just drops that layer.
pub fn init_logging(default_filter: &str) {
    let file_layer = match OpenOptions::new().create(true).append(true).open(log_path()) {
        Ok(f) => Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(f))),
        Err(e) => {
            eprintln!("[log] cannot open {}: {e}", log_path().display());
            None
        }
    };

    let installed = tracing_subscriber::registry()
        .with(build_filter(default_filter))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();

    if let Err(e) = installed {
        eprintln!("[log] subscriber already installed: {e}");
    }
}

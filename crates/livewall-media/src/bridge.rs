// crates/livewall-media/src/bridge.rs
//
// One request, one process. The backend program is spawned per call, fed the
// request on stdin and expected to print a single reply envelope on stdout.
// Blocking: only ever called from a worker thread.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use livewall_core::error::BackendError;

use crate::protocol::{decode_reply, BridgeRequest};

#[derive(Clone, Debug)]
pub struct BridgeCommand {
    pub program: PathBuf,
    /// Extra leading arguments. The request itself goes on stdin.
    pub args:    Vec<String>,
}

impl BridgeCommand {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    /// Run one command and return its `ok` payload.
    pub fn call(&self, req: &BridgeRequest) -> Result<Value, BackendError> {
        let name = req.name();
        let out = self.run(req)
            .map_err(|e| BackendError::Unavailable(format!("{e:#}")))?;

        if let Some(reply) = decode_reply(&out.stdout) {
            debug!("[bridge] {name} replied ({} bytes, {})", out.stdout.len(), out.status);
            return reply;
        }

        let tail = stderr_tail(&out.stderr);
        if !out.status.success() {
            return Err(BackendError::Command(match tail {
                Some(line) => format!("{name} exited with {}: {line}", out.status),
                None       => format!("{name} exited with {}", out.status),
            }));
        }
        Err(BackendError::malformed(name, match tail {
            Some(line) => format!("no reply on stdout ({line})"),
            None       => "no reply on stdout".to_string(),
        }))
    }

    fn run(&self, req: &BridgeRequest) -> Result<Output> {
        let mut payload = serde_json::to_vec(req).context("encoding request")?;
        payload.push(b'\n');

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawning {}", self.program.display()))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A backend that ignores its input may already have exited; its
            // reply (or exit status) still decides the outcome.
            if let Err(e) = stdin.write_all(&payload) {
                debug!("[bridge] {}: stdin write failed: {e}", req.name());
            }
        }

        child.wait_with_output()
            .with_context(|| format!("waiting for {}", self.program.display()))
    }
}

fn stderr_tail(stderr: &[u8]) -> Option<String> {
    String::from_utf8_lossy(stderr)
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

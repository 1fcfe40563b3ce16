// crates/livewall-core/src/error.rs
//
// Errors that cross the command boundary or stop a submit before dispatch.
// Both are always turned into display text at the Session boundary.

use thiserror::Error;

/// Failure of one external command call (probe, detect, export).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    /// Reason reported by the backend itself. Displayed verbatim.
    #[error("{0}")]
    Command(String),

    /// The backend program could not be started or talked to.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The reply arrived but failed shape validation.
    #[error("malformed {command} reply: {detail}")]
    Malformed { command: &'static str, detail: String },

    #[error("worker shutting down")]
    ShuttingDown,
}

impl BackendError {
    pub fn malformed(command: &'static str, detail: impl Into<String>) -> Self {
        Self::Malformed { command, detail: detail.into() }
    }
}

/// Reasons a SubmitRequested never reaches the backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("No video selected")]
    NoFile,

    /// A probe or an export is still running.
    #[error("Busy, wait for the current operation to finish")]
    Busy,

    #[error("Trim end ({end}s) must be after trim start ({start}s)")]
    EmptyTrimWindow { start: f64, end: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_reason_is_displayed_verbatim() {
        let e = BackendError::Command("ffprobe exited with 1: moov atom not found".into());
        assert_eq!(e.to_string(), "ffprobe exited with 1: moov atom not found");
    }

    #[test]
    fn malformed_names_the_command() {
        let e = BackendError::malformed("probe_video", "missing field `duration`");
        assert_eq!(e.to_string(), "malformed probe_video reply: missing field `duration`");
    }
}

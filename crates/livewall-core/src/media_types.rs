// crates/livewall-core/src/media_types.rs
//
// Types that flow across the command boundary between livewall-media and the
// coordinator. Field names are the wire names; do not rename them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BackendError;

/// Reply of `probe_video`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoMeta {
    pub path:     String,
    /// Seconds.
    pub duration: f64,
    pub width:    u32,
    pub height:   u32,
    pub fps:      f64,
    /// Variable frame rate.
    pub vfr:      bool,
    pub codec:    String,
}

impl VideoMeta {
    /// Reject replies that deserialize fine but cannot be planned against.
    pub fn validate(&self) -> Result<(), BackendError> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(BackendError::malformed(
                "probe_video",
                format!("duration must be a non-negative number, got {}", self.duration),
            ));
        }
        if !self.fps.is_finite() || self.fps < 0.0 {
            return Err(BackendError::malformed(
                "probe_video",
                format!("fps must be a non-negative number, got {}", self.fps),
            ));
        }
        Ok(())
    }
}

/// Argument of `export_package`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub path:    String,
    pub start:   f64,
    pub end:     f64,
    /// Pixel heights, at most one entry (resolution choice is exclusive).
    pub sizes:   Vec<u32>,
    /// Source file name without its extension.
    pub name:    String,
    /// Discovered theme directories of the selected targets, in registry order.
    pub targets: Vec<String>,
}

/// Reply of `export_package`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportResponse {
    #[serde(rename = "zipPath")]
    pub zip_path: String,
}

/// Completions sent from the backend worker threads to the UI thread.
///
/// Every variant carries the identity captured when the call was issued so the
/// coordinator can drop results that a newer intake or job has superseded.
#[derive(Clone, Debug, PartialEq)]
pub enum BackendResult {
    Probed {
        session: Uuid,
        path:    PathBuf,
        result:  Result<VideoMeta, BackendError>,
    },
    TargetsDetected(Result<Vec<String>, BackendError>),
    Exported {
        job_id: Uuid,
        result: Result<ExportResponse, BackendError>,
    },
}

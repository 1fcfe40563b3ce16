// crates/livewall-media/src/protocol.rs
//
// JSON wire format spoken with the native backend program.
//
//   → {"command": "probe_video", "args": {"path": "/tmp/clip.mp4"}}
//   ← {"ok": {...}}   or   {"error": "reason"}
//
// Replies are untrusted: every decoder checks shape before handing a typed
// value to the coordinator.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use livewall_core::error::BackendError;
use livewall_core::media_types::{ExportRequest, ExportResponse, VideoMeta};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "command", content = "args", rename_all = "snake_case")]
pub enum BridgeRequest {
    ProbeVideo { path: String },
    DetectThemeTargets,
    ExportPackage { req: ExportRequest },
}

impl BridgeRequest {
    pub fn name(&self) -> &'static str {
        match self {
            BridgeRequest::ProbeVideo { .. }    => "probe_video",
            BridgeRequest::DetectThemeTargets   => "detect_theme_targets",
            BridgeRequest::ExportPackage { .. } => "export_package",
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum Reply {
    Ok(Value),
    Error(String),
}

/// The historical backend answered export with a bare path string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExportReply {
    Object(ExportResponse),
    Bare(String),
}

/// Parse raw stdout into the `ok` payload.
///
/// Returns `None` when no reply envelope can be found at all, so the caller
/// can fall back to the exit status and stderr.
pub fn decode_reply(stdout: &[u8]) -> Option<Result<Value, BackendError>> {
    let text = String::from_utf8_lossy(stdout);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    // Whole output first, then the last line in case the backend chatters.
    let reply = serde_json::from_str::<Reply>(text).ok().or_else(|| {
        text.lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .and_then(|l| serde_json::from_str::<Reply>(l.trim()).ok())
    })?;

    Some(match reply {
        Reply::Ok(v)      => Ok(v),
        Reply::Error(msg) => Err(BackendError::Command(msg)),
    })
}

pub fn decode_probe(value: Value) -> Result<VideoMeta, BackendError> {
    let meta: VideoMeta = serde_json::from_value(value)
        .map_err(|e| BackendError::malformed("probe_video", e.to_string()))?;
    meta.validate()?;
    Ok(meta)
}

pub fn decode_targets(value: Value) -> Result<Vec<String>, BackendError> {
    serde_json::from_value(value)
        .map_err(|e| BackendError::malformed("detect_theme_targets", e.to_string()))
}

pub fn decode_export(value: Value) -> Result<ExportResponse, BackendError> {
    let reply: ExportReply = serde_json::from_value(value)
        .map_err(|e| BackendError::malformed("export_package", e.to_string()))?;
    let zip_path = match reply {
        ExportReply::Object(r) => r.zip_path,
        ExportReply::Bare(s)   => s,
    };
    if zip_path.trim().is_empty() {
        return Err(BackendError::malformed("export_package", "empty archive path"));
    }
    Ok(ExportResponse { zip_path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requests_are_adjacently_tagged() {
        let probe = BridgeRequest::ProbeVideo { path: "/tmp/clip.mp4".into() };
        assert_eq!(
            serde_json::to_value(&probe).unwrap(),
            json!({"command": "probe_video", "args": {"path": "/tmp/clip.mp4"}}),
        );

        let detect = serde_json::to_value(BridgeRequest::DetectThemeTargets).unwrap();
        assert_eq!(detect["command"], "detect_theme_targets");

        let export = BridgeRequest::ExportPackage {
            req: ExportRequest {
                path:    "/tmp/clip.mp4".into(),
                start:   0.0,
                end:     60.0,
                sizes:   vec![1440],
                name:    "clip".into(),
                targets: vec!["/t".into()],
            },
        };
        let v = serde_json::to_value(&export).unwrap();
        assert_eq!(v["command"], "export_package");
        assert_eq!(v["args"]["req"]["sizes"], json!([1440]));
        assert_eq!(v["args"]["req"]["name"], "clip");
        assert_eq!(export.name(), "export_package");
    }

    #[test]
    fn ok_and_error_envelopes() {
        assert_eq!(decode_reply(br#"{"ok": [1, 2]}"#), Some(Ok(json!([1, 2]))));
        assert_eq!(
            decode_reply(br#"{"error": "no video stream"}"#),
            Some(Err(BackendError::Command("no video stream".into()))),
        );
    }

    #[test]
    fn reply_on_last_line_after_chatter() {
        let out = b"ffprobe version 6.1\nsomething else\n{\"ok\": \"/x.zip\"}\n";
        assert_eq!(decode_reply(out), Some(Ok(json!("/x.zip"))));
    }

    #[test]
    fn no_envelope_is_none() {
        assert_eq!(decode_reply(b""), None);
        assert_eq!(decode_reply(b"   \n"), None);
        assert_eq!(decode_reply(b"segfault"), None);
        assert_eq!(decode_reply(br#"{"result": 1}"#), None);
    }

    #[test]
    fn probe_shape_is_validated() {
        let good = json!({
            "path": "/tmp/a.mp4", "duration": 12.5, "width": 1280, "height": 720,
            "fps": 24.0, "vfr": true, "codec": "hevc",
        });
        let meta = decode_probe(good).unwrap();
        assert_eq!((meta.width, meta.height), (1280, 720));
        assert!(meta.vfr);

        let missing = json!({"path": "/tmp/a.mp4", "duration": 12.5});
        assert!(matches!(decode_probe(missing), Err(BackendError::Malformed { .. })));

        let negative = json!({
            "path": "/tmp/a.mp4", "duration": -3.0, "width": 0, "height": 0,
            "fps": 0.0, "vfr": false, "codec": "",
        });
        assert!(matches!(decode_probe(negative), Err(BackendError::Malformed { .. })));
    }

    #[test]
    fn targets_must_be_strings() {
        assert_eq!(decode_targets(json!(["/a", "/b"])).unwrap(), vec!["/a", "/b"]);
        assert!(decode_targets(json!([1, 2])).is_err());
        assert!(decode_targets(json!({"paths": []})).is_err());
    }

    #[test]
    fn export_accepts_object_or_bare_string() {
        assert_eq!(decode_export(json!({"zipPath": "/x/a.zip"})).unwrap().zip_path, "/x/a.zip");
        assert_eq!(decode_export(json!("/x/b.zip")).unwrap().zip_path, "/x/b.zip");
        assert!(decode_export(json!("")).is_err());
        assert!(decode_export(json!(42)).is_err());
    }
}

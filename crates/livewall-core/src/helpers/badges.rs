// crates/livewall-core/src/helpers/badges.rs
//
// Metadata summary shown after a probe. Kept here rather than in the UI crate
// so the exact texts are unit-testable without egui.

use std::path::Path;

use crate::helpers::time::format_seconds;
use crate::media_types::VideoMeta;
use crate::state::display_name;

#[derive(Clone, Debug, PartialEq)]
pub struct Badge {
    pub text: String,
    /// Drawn in the warning colour.
    pub warn: bool,
}

impl Badge {
    fn plain(text: impl Into<String>) -> Self { Self { text: text.into(), warn: false } }
    fn warn(text: impl Into<String>) -> Self  { Self { text: text.into(), warn: true } }
}

/// Name, duration, size, frame rate, and a VFR warning when flagged.
pub fn summary(path: &Path, meta: &VideoMeta) -> Vec<Badge> {
    let size = if meta.width > 0 && meta.height > 0 {
        format!("{}×{}", meta.width, meta.height)
    } else {
        "?×?".to_string()
    };
    let fps = if meta.fps > 0.0 { format!("{:.2}", meta.fps) } else { "?".to_string() };

    let mut out = vec![
        Badge::plain(display_name(path)),
        Badge::plain(format_seconds(meta.duration)),
        Badge::plain(size),
        Badge::plain(format!("{fps} FPS")),
    ];
    if meta.vfr {
        out.push(Badge::warn("VFR"));
    }
    out
}

/// Single warning badge replacing the summary after a failed probe.
pub fn probe_failed(reason: &str) -> Badge {
    Badge::warn(format!("probe failed: {reason}"))
}

// crates/livewall-core/src/state.rs
// Session data: no egui, no processes, no runtime handles.
// Owned by ExportCoordinator; the UI only ever sees it through SessionView.
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::helpers::time::format_field;
use crate::media_types::VideoMeta;
use crate::trim::TrimPlan;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Probing,
    Ready,
    Exporting,
    Done,
    Failed,
}

/// The three export heights offered. Exactly zero or one is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resolution {
    P1080,
    P1440,
    P2160,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::P1080, Resolution::P1440, Resolution::P2160];

    pub fn height(self) -> u32 {
        match self {
            Resolution::P1080 => 1080,
            Resolution::P1440 => 1440,
            Resolution::P2160 => 2160,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Resolution::P1080 => "1080p",
            Resolution::P1440 => "1440p",
            Resolution::P2160 => "2160p (4K)",
        }
    }
}

/// Mutually exclusive resolution choice.
///
/// Storing a single Option makes {1080, 1440} unrepresentable; checking one
/// option implicitly unchecks the other two on every change, not at submit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizeSelection {
    selected: Option<Resolution>,
}

impl SizeSelection {
    /// Apply one checkbox change event.
    pub fn set(&mut self, size: Resolution, checked: bool) {
        if checked {
            self.selected = Some(size);
        } else if self.selected == Some(size) {
            self.selected = None;
        }
    }

    pub fn is_selected(&self, size: Resolution) -> bool {
        self.selected == Some(size)
    }

    pub fn selected(&self) -> Option<Resolution> {
        self.selected
    }

    /// Heights in wire form.
    pub fn heights(&self) -> Vec<u32> {
        self.selected.map(|r| vec![r.height()]).unwrap_or_default()
    }
}

/// Raw text of the two editable trim fields.
///
/// Parsed only when a request is built; anything unparsable reads as 0.
#[derive(Clone, Debug, PartialEq)]
pub struct TrimFields {
    pub start:   String,
    pub end:     String,
    pub visible: bool,
}

impl Default for TrimFields {
    fn default() -> Self {
        Self { start: "0".into(), end: "0".into(), visible: false }
    }
}

impl TrimFields {
    pub fn from_plan(plan: TrimPlan) -> Self {
        Self {
            start:   format_field(plan.start),
            end:     format_field(plan.end),
            visible: plan.visible,
        }
    }
}

/// The live unit of work for one selected file.
#[derive(Clone, Debug)]
pub struct Session {
    /// Issued at intake; probe completions must carry it back.
    pub id:          Uuid,
    pub path:        PathBuf,
    pub metadata:    Option<VideoMeta>,
    pub trim:        TrimFields,
    pub lifecycle:   Lifecycle,
    /// Reason text of the last failed probe, cleared by the next intake.
    pub probe_error: Option<String>,
    /// Export job dispatched for this session, if any.
    pub export_job:  Option<Uuid>,
}

impl Session {
    pub fn new(path: PathBuf) -> Self {
        Self {
            id:          Uuid::new_v4(),
            path,
            metadata:    None,
            trim:        TrimFields::default(),
            lifecycle:   Lifecycle::Idle,
            probe_error: None,
            export_job:  None,
        }
    }

    pub fn file_name(&self) -> String {
        display_name(&self.path)
    }
}

/// Last path component, or the whole path when there is none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// The single status line shown under the drop zone.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Notice {
    #[default]
    Prompt,
    Selected(String),
    Exporting,
    Done(String),
    ExportFailed(String),
    Rejected(String),
}

impl Notice {
    pub fn text(&self) -> String {
        match self {
            Notice::Prompt          => "Drop a video here or click Add".into(),
            Notice::Selected(name)  => format!("Selected: {name}"),
            Notice::Exporting       => "Exporting…".into(),
            Notice::Done(zip)       => format!("Done: {zip}"),
            Notice::ExportFailed(e) => format!("Export failed: {e}"),
            Notice::Rejected(msg)   => msg.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::ExportFailed(_) | Notice::Rejected(_))
    }
}

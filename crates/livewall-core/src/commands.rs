// crates/livewall-core/src/commands.rs
//
// Every user action that touches the session is a SessionCommand.
// UI panels emit these; app.rs feeds them to ExportCoordinator::handle after
// the UI pass. The vocabulary is closed: a new feature is a new variant here
// plus one match arm in coordinator.rs.

use std::path::PathBuf;

use crate::state::Resolution;
use crate::targets::TargetId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrimField {
    Start,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionCommand {
    /// Canonical intake event from the Intake Adapter. Always starts a new session.
    FileSelected(PathBuf),
    /// Raw text of one trim field after an edit. Parsed only at submit.
    TrimEdited { field: TrimField, text: String },
    TargetToggled { target: TargetId, selected: bool },
    /// One resolution checkbox changed. Checking one unchecks the others.
    SizeSelected { size: Resolution, checked: bool },
    /// The Install button.
    SubmitRequested,
}

// crates/livewall-core/src/intake.rs
//
// Intake Adapter: three input channels → one canonical FileSelected.
//
//   drag-drop   enter/over light the drop zone, leave/drop clear it; a drop
//               selects its first path only
//   dialog      one picker at a time; cancel is silent
//   fallback    path text field, shown once the dialog is unavailable; reset
//               after every submission so the same path can be sent again
//
// The adapter never touches the session. Its output is an IntakeAction the
// app turns into SessionCommand::FileSelected (or a picker launch).

use std::path::PathBuf;

use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq)]
pub enum IntakeEvent {
    DragEnter,
    DragOver,
    DragLeave,
    Drop(Vec<PathBuf>),
    /// User clicked the Add button.
    PickerRequested,
    PickerFinished(PickerOutcome),
    /// User submitted the fallback path field.
    FallbackSubmitted,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PickerOutcome {
    Picked(PathBuf),
    Cancelled,
    /// The native dialog failed or is disabled.
    Unavailable(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum IntakeAction {
    /// Canonical intake event for the coordinator.
    FileSelected(PathBuf),
    /// Launch the native dialog; report back with PickerFinished.
    OpenPicker,
}

#[derive(Debug, Default)]
pub struct IntakeAdapter {
    /// Drop zone highlight.
    pub drag_active:    bool,
    /// Reentrancy guard: a picker is open.
    picker_open:        bool,
    /// Once set, the fallback path field is shown.
    pub fallback_shown: bool,
    /// Text bound to the fallback path field.
    pub fallback_input: String,
}

impl IntakeAdapter {
    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn handle(&mut self, event: IntakeEvent) -> Option<IntakeAction> {
        match event {
            IntakeEvent::DragEnter | IntakeEvent::DragOver => {
                self.drag_active = true;
                None
            }
            IntakeEvent::DragLeave => {
                self.drag_active = false;
                None
            }
            IntakeEvent::Drop(paths) => {
                self.drag_active = false;
                if paths.len() > 1 {
                    debug!("[intake] drop carried {} paths, keeping the first", paths.len());
                }
                paths.into_iter()
                    .next()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(IntakeAction::FileSelected)
            }
            IntakeEvent::PickerRequested => {
                if self.picker_open {
                    debug!("[intake] picker already open, ignoring request");
                    return None;
                }
                if self.fallback_shown {
                    // Dialog known to be unavailable this session.
                    return None;
                }
                self.picker_open = true;
                Some(IntakeAction::OpenPicker)
            }
            IntakeEvent::PickerFinished(outcome) => {
                self.picker_open = false;
                match outcome {
                    PickerOutcome::Picked(p) if !p.as_os_str().is_empty() => {
                        Some(IntakeAction::FileSelected(p))
                    }
                    PickerOutcome::Picked(_) | PickerOutcome::Cancelled => None,
                    PickerOutcome::Unavailable(reason) => {
                        warn!("[intake] native dialog unavailable: {reason}");
                        self.fallback_shown = true;
                        None
                    }
                }
            }
            IntakeEvent::FallbackSubmitted => {
                // Reset the control before emitting so an identical path
                // submitted again still produces an event.
                let raw = std::mem::take(&mut self.fallback_input);
                let path = raw.trim();
                if path.is_empty() {
                    return None;
                }
                Some(IntakeAction::FileSelected(PathBuf::from(path)))
            }
        }
    }
}

/// Turns per-frame hovered/dropped window input into enter/over/leave/drop.
///
/// Every drop in the window goes through here, so a drop outside the drop
/// zone never falls through to anything else.
#[derive(Debug, Default)]
pub struct DragTracker {
    hovering: bool,
}

impl DragTracker {
    pub fn observe(&mut self, hovering: bool, dropped: Vec<PathBuf>) -> Vec<IntakeEvent> {
        let mut out = Vec::new();
        match (self.hovering, hovering) {
            (false, true) => out.push(IntakeEvent::DragEnter),
            (true, true)  => out.push(IntakeEvent::DragOver),
            (true, false) if dropped.is_empty() => out.push(IntakeEvent::DragLeave),
            _ => {}
        }
        if !dropped.is_empty() {
            out.push(IntakeEvent::Drop(dropped));
        }
        self.hovering = hovering;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    #[test]
    fn enter_over_leave_toggle_active_flag() {
        let mut a = IntakeAdapter::default();
        assert_eq!(a.handle(IntakeEvent::DragEnter), None);
        assert!(a.drag_active);
        a.handle(IntakeEvent::DragOver);
        assert!(a.drag_active);
        a.handle(IntakeEvent::DragLeave);
        assert!(!a.drag_active);
    }

    #[test]
    fn drop_selects_first_path_only() {
        let mut a = IntakeAdapter::default();
        a.handle(IntakeEvent::DragEnter);
        let out = a.handle(IntakeEvent::Drop(vec![p("/a.mp4"), p("/b.mp4")]));
        assert_eq!(out, Some(IntakeAction::FileSelected(p("/a.mp4"))));
        assert!(!a.drag_active);
    }

    #[test]
    fn empty_drop_emits_nothing() {
        let mut a = IntakeAdapter::default();
        assert_eq!(a.handle(IntakeEvent::Drop(vec![])), None);
    }

    #[test]
    fn drop_with_empty_first_path_emits_nothing() {
        let mut a = IntakeAdapter::default();
        assert_eq!(a.handle(IntakeEvent::Drop(vec![p(""), p("/b.mp4")])), None);
    }

    #[test]
    fn second_picker_request_while_open_is_noop() {
        let mut a = IntakeAdapter::default();
        assert_eq!(a.handle(IntakeEvent::PickerRequested), Some(IntakeAction::OpenPicker));
        assert_eq!(a.handle(IntakeEvent::PickerRequested), None);
        assert!(a.picker_open());
        a.handle(IntakeEvent::PickerFinished(PickerOutcome::Cancelled));
        assert!(!a.picker_open());
        assert_eq!(a.handle(IntakeEvent::PickerRequested), Some(IntakeAction::OpenPicker));
    }

    #[test]
    fn cancelled_picker_is_silent() {
        let mut a = IntakeAdapter::default();
        a.handle(IntakeEvent::PickerRequested);
        assert_eq!(a.handle(IntakeEvent::PickerFinished(PickerOutcome::Cancelled)), None);
        assert!(!a.fallback_shown);
    }

    #[test]
    fn picked_path_is_selected() {
        let mut a = IntakeAdapter::default();
        a.handle(IntakeEvent::PickerRequested);
        let out = a.handle(IntakeEvent::PickerFinished(PickerOutcome::Picked(p("/v.mov"))));
        assert_eq!(out, Some(IntakeAction::FileSelected(p("/v.mov"))));
    }

    #[test]
    fn unavailable_dialog_reveals_fallback() {
        let mut a = IntakeAdapter::default();
        a.handle(IntakeEvent::PickerRequested);
        let out = a.handle(IntakeEvent::PickerFinished(PickerOutcome::Unavailable("no portal".into())));
        assert_eq!(out, None);
        assert!(a.fallback_shown);
        assert_eq!(a.handle(IntakeEvent::PickerRequested), None);
    }

    #[test]
    fn fallback_resets_so_same_path_emits_twice() {
        let mut a = IntakeAdapter { fallback_shown: true, ..Default::default() };
        for _ in 0..2 {
            a.fallback_input = "/tmp/clip.mp4".into();
            assert_eq!(
                a.handle(IntakeEvent::FallbackSubmitted),
                Some(IntakeAction::FileSelected(p("/tmp/clip.mp4"))),
            );
            assert!(a.fallback_input.is_empty());
        }
    }

    #[test]
    fn blank_fallback_emits_nothing() {
        let mut a = IntakeAdapter { fallback_input: "   ".into(), ..Default::default() };
        assert_eq!(a.handle(IntakeEvent::FallbackSubmitted), None);
        assert!(a.fallback_input.is_empty());
    }

    #[test]
    fn tracker_derives_drag_sequence() {
        let mut t = DragTracker::default();
        assert_eq!(t.observe(false, vec![]), vec![]);
        assert_eq!(t.observe(true, vec![]), vec![IntakeEvent::DragEnter]);
        assert_eq!(t.observe(true, vec![]), vec![IntakeEvent::DragOver]);
        assert_eq!(t.observe(false, vec![]), vec![IntakeEvent::DragLeave]);
    }

    #[test]
    fn tracker_reports_drop_without_leave() {
        let mut t = DragTracker::default();
        t.observe(true, vec![]);
        assert_eq!(
            t.observe(false, vec![p("/a.mp4")]),
            vec![IntakeEvent::Drop(vec![p("/a.mp4")])],
        );
    }
}

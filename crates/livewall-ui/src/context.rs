// crates/livewall-ui/src/context.rs
//
// AppContext owns the runtime intake handles that are not session state:
//
//   AppContext
//     ├── intake   IntakeAdapter (drop highlight, picker guard, fallback field)
//     ├── drag     DragTracker fed from window hovered/dropped files
//     └── picker   the native file dialog while it is open
//
// The native dialog blocks, so off macOS it runs on its own thread and is
// polled once per frame. macOS requires it on the main thread, where it runs
// inline and finishes before the next frame.

use std::path::PathBuf;
use std::thread::JoinHandle;

use eframe::egui;
use rfd::FileDialog;
use tracing::debug;

use livewall_core::intake::{DragTracker, IntakeAdapter, IntakeEvent, PickerOutcome};

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "webm", "m4v", "avi"];

enum PickerJob {
    Running(JoinHandle<Option<PathBuf>>),
    Finished(PickerOutcome),
}

pub struct AppContext {
    pub intake:    IntakeAdapter,
    drag:          DragTracker,
    picker:        Option<PickerJob>,
    native_dialog: bool,
}

impl AppContext {
    pub fn new(native_dialog: bool) -> Self {
        Self {
            intake:  IntakeAdapter::default(),
            drag:    DragTracker::default(),
            picker:  None,
            native_dialog,
        }
    }

    /// Drag notifications for this frame. Takes every dropped file out of
    /// the raw input so nothing else sees it.
    pub fn drag_events(&mut self, ctx: &egui::Context) -> Vec<IntakeEvent> {
        let (hovering, dropped) = ctx.input_mut(|i| {
            let hovering = !i.raw.hovered_files.is_empty();
            let dropped: Vec<PathBuf> = std::mem::take(&mut i.raw.dropped_files)
                .into_iter()
                .filter_map(|f| f.path)
                .collect();
            (hovering, dropped)
        });
        self.drag.observe(hovering, dropped)
    }

    pub fn open_picker(&mut self) {
        if self.picker.is_some() {
            return;
        }
        self.picker = Some(if self.native_dialog {
            spawn_picker()
        } else {
            PickerJob::Finished(PickerOutcome::Unavailable("disabled in config".into()))
        });
    }

    pub fn picker_pending(&self) -> bool {
        self.picker.is_some()
    }

    /// The dialog's outcome, once it has closed.
    pub fn poll_picker(&mut self) -> Option<PickerOutcome> {
        match self.picker.take()? {
            PickerJob::Finished(outcome) => Some(outcome),
            PickerJob::Running(handle) if handle.is_finished() => Some(match handle.join() {
                Ok(Some(path)) => PickerOutcome::Picked(path),
                Ok(None)       => PickerOutcome::Cancelled,
                Err(_)         => PickerOutcome::Unavailable("dialog thread panicked".into()),
            }),
            running @ PickerJob::Running(_) => {
                self.picker = Some(running);
                None
            }
        }
    }
}

fn pick_video() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Choose a video")
        .add_filter("Video", VIDEO_EXTENSIONS)
        .pick_file()
}

#[cfg(target_os = "macos")]
fn spawn_picker() -> PickerJob {
    debug!("[intake] opening file dialog (main thread)");
    match std::panic::catch_unwind(pick_video) {
        Ok(picked) => PickerJob::Finished(match picked {
            Some(path) => PickerOutcome::Picked(path),
            None       => PickerOutcome::Cancelled,
        }),
        Err(_) => PickerJob::Finished(PickerOutcome::Unavailable("dialog panicked".into())),
    }
}

#[cfg(not(target_os = "macos"))]
fn spawn_picker() -> PickerJob {
    debug!("[intake] opening file dialog");
    match std::thread::Builder::new().name("file-dialog".into()).spawn(pick_video) {
        Ok(handle) => PickerJob::Running(handle),
        Err(e)     => PickerJob::Finished(PickerOutcome::Unavailable(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_dialog_reports_unavailable_once() {
        let mut ctx = AppContext::new(false);
        ctx.open_picker();
        assert!(ctx.picker_pending());
        assert!(matches!(ctx.poll_picker(), Some(PickerOutcome::Unavailable(_))));
        assert!(!ctx.picker_pending());
        assert_eq!(ctx.poll_picker(), None);
    }

    #[test]
    fn disabled_dialog_reveals_fallback_field() {
        let mut ctx = AppContext::new(false);
        ctx.intake.handle(IntakeEvent::PickerRequested);
        ctx.open_picker();
        let outcome = ctx.poll_picker().unwrap();
        ctx.intake.handle(IntakeEvent::PickerFinished(outcome));
        assert!(ctx.intake.fallback_shown);
        assert!(!ctx.intake.picker_open());
    }

    #[test]
    fn drops_are_consumed_from_raw_input() {
        let mut ctx = AppContext::new(false);
        let egui_ctx = egui::Context::default();
        let mut raw = egui::RawInput::default();
        raw.dropped_files.push(egui::DroppedFile {
            path: Some(PathBuf::from("/tmp/clip.mp4")),
            ..Default::default()
        });
        let mut events = Vec::new();
        let _ = egui_ctx.run(raw, |c| {
            events = ctx.drag_events(c);
            assert!(c.input(|i| i.raw.dropped_files.is_empty()));
        });
        assert_eq!(events, vec![IntakeEvent::Drop(vec![PathBuf::from("/tmp/clip.mp4")])]);
    }
}

// crates/livewall-ui/src/app.rs
//
// LiveWallApp: one window, one session at a time.
//
// Per frame:
//   1. window drag/drop → IntakeAdapter
//   2. finished file dialog → IntakeAdapter
//   3. finished backend calls → ExportCoordinator::ingest
//   4. panels render from SessionView and queue UiCommands
//   5. queued commands are applied

use std::path::Path;
use std::time::Duration;

use eframe::egui;
use egui::{Align, Layout, RichText};
use tracing::info;

use livewall_core::commands::SessionCommand;
use livewall_core::coordinator::{Backend, ExportCoordinator};
use livewall_core::intake::{IntakeAction, IntakeEvent};
use livewall_core::state::Notice;
use livewall_core::targets::PreferenceStore;
use livewall_media::CommandWorker;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::modules::{
    SessionModule, UiCommand,
    clip_module::ClipModule,
    export_module::ExportModule,
    intake_module::IntakeModule,
    trim_module::TrimModule,
};
use crate::paths::PREFS_FILE;
use crate::prefs::JsonFileStore;
use crate::theme::{configure_style, ACCENT, ERROR, OK, TEXT_DIM};

/// Poll interval while a backend call or the file dialog is outstanding.
const BUSY_REPAINT: Duration = Duration::from_millis(100);

// ── App ───────────────────────────────────────────────────────────────────────

pub struct LiveWallApp<B: Backend = CommandWorker> {
    coordinator:  ExportCoordinator<B>,
    context:      AppContext,
    intake:       IntakeModule,
    clip:         ClipModule,
    trim:         TrimModule,
    export:       ExportModule,
    /// Commands emitted by panels each frame, processed after the UI pass.
    pending_cmds: Vec<UiCommand>,
}

impl LiveWallApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig, data_dir: &Path) -> Self {
        configure_style(&cc.egui_ctx);

        let store  = JsonFileStore::open(data_dir.join(PREFS_FILE));
        let worker = CommandWorker::new(config.bridge());
        Self::with_backend(worker, Box::new(store), config.native_dialog)
    }

    fn poll_backend(&mut self) {
        while let Ok(result) = self.coordinator.backend().rx.try_recv() {
            self.coordinator.ingest(result);
        }
    }
}

impl<B: Backend> LiveWallApp<B> {
    fn with_backend(
        backend:       B,
        store:         Box<dyn PreferenceStore>,
        native_dialog: bool,
    ) -> Self {
        let mut coordinator = ExportCoordinator::new(backend, store);
        coordinator.start();
        Self {
            coordinator,
            context:      AppContext::new(native_dialog),
            intake:       IntakeModule,
            clip:         ClipModule,
            trim:         TrimModule,
            export:       ExportModule,
            pending_cmds: Vec::new(),
        }
    }

    fn process_command(&mut self, cmd: UiCommand, ctx: &egui::Context) {
        match cmd {
            UiCommand::Session(c) => self.coordinator.handle(c),
            UiCommand::Intake(ev) => self.route_intake(ev),
            UiCommand::Exit => {
                info!("[app] exit requested");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    fn route_intake(&mut self, event: IntakeEvent) {
        match self.context.intake.handle(event) {
            Some(IntakeAction::FileSelected(path)) => {
                self.coordinator.handle(SessionCommand::FileSelected(path));
            }
            Some(IntakeAction::OpenPicker) => self.context.open_picker(),
            None => {}
        }
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        for event in self.context.drag_events(ctx) {
            self.route_intake(event);
        }
    }

    fn poll_picker(&mut self) {
        if let Some(outcome) = self.context.poll_picker() {
            self.route_intake(IntakeEvent::PickerFinished(outcome));
        }
    }

    /// Everything except backend polling, which needs the concrete worker.
    fn frame(&mut self, ctx: &egui::Context) {
        self.panels(ctx);

        // ── Process commands emitted by panels this frame ─────────────────────
        let cmds: Vec<UiCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd, ctx);
        }

        if self.coordinator.is_busy() || self.context.picker_pending() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }

    fn panels(&mut self, ctx: &egui::Context) {
        let view = self.coordinator.view();

        egui::TopBottomPanel::top("top_panel")
            .exact_height(36.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(RichText::new("LiveWall").strong().size(15.0).color(ACCENT));
                    ui.separator();
                    ui.label(RichText::new("Animated wallpapers for Opera").size(12.0).weak());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button(RichText::new("Exit").size(11.0)).clicked() {
                            self.pending_cmds.push(UiCommand::Exit);
                        }
                    });
                });
            });

        egui::TopBottomPanel::bottom("status_panel")
            .exact_height(28.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let color = if view.notice.is_error() {
                        ERROR
                    } else if matches!(view.notice, Notice::Done(_)) {
                        OK
                    } else {
                        TEXT_DIM
                    };
                    ui.label(RichText::new(view.notice.text()).size(11.0).color(color));
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let intake = &mut self.context.intake;
                let cmds   = &mut self.pending_cmds;

                self.intake.ui(ui, &view, intake, cmds);
                ui.add_space(10.0);
                self.clip.ui(ui, &view, intake, cmds);
                ui.add_space(10.0);
                self.trim.ui(ui, &view, intake, cmds);
                ui.add_space(10.0);
                ui.separator();
                self.export.ui(ui, &view, intake, cmds);
            });
        });
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for LiveWallApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.coordinator.backend().shutdown();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_drag_and_drop(ctx);
        self.poll_picker();
        self.poll_backend();
        self.frame(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    use livewall_core::media_types::ExportRequest;
    use livewall_core::state::Lifecycle;
    use livewall_core::targets::MemoryStore;
    use uuid::Uuid;

    #[derive(Default)]
    struct Probes(RefCell<Vec<PathBuf>>);

    impl Backend for Probes {
        fn probe_video(&self, _session: Uuid, path: PathBuf) {
            self.0.borrow_mut().push(path);
        }
        fn detect_theme_targets(&self) {}
        fn export_package(&self, _job_id: Uuid, _req: ExportRequest) {}
    }

    fn app(native_dialog: bool) -> LiveWallApp<Probes> {
        LiveWallApp::with_backend(Probes::default(), Box::new(MemoryStore::default()), native_dialog)
    }

    #[test]
    fn multi_file_drop_probes_first_path_only() {
        let mut app = app(true);
        app.route_intake(IntakeEvent::DragEnter);
        assert!(app.context.intake.drag_active);
        app.route_intake(IntakeEvent::Drop(vec!["/tmp/a.mp4".into(), "/tmp/b.mp4".into()]));
        assert!(!app.context.intake.drag_active);
        assert_eq!(*app.coordinator.backend().0.borrow(), vec![PathBuf::from("/tmp/a.mp4")]);
        assert_eq!(app.coordinator.session().unwrap().lifecycle, Lifecycle::Probing);
    }

    #[test]
    fn unavailable_dialog_then_fallback_path() {
        let mut app = app(false);
        app.process_command(UiCommand::Intake(IntakeEvent::PickerRequested), &egui::Context::default());
        app.poll_picker();
        assert!(app.context.intake.fallback_shown);

        app.context.intake.fallback_input = "  /tmp/typed.mov ".into();
        app.route_intake(IntakeEvent::FallbackSubmitted);
        assert!(app.context.intake.fallback_input.is_empty());
        assert_eq!(*app.coordinator.backend().0.borrow(), vec![PathBuf::from("/tmp/typed.mov")]);
    }

    #[test]
    fn session_commands_reach_coordinator() {
        let mut app = app(true);
        let ctx = egui::Context::default();
        app.process_command(
            UiCommand::Session(SessionCommand::FileSelected("/tmp/x.mp4".into())),
            &ctx,
        );
        assert!(app.coordinator.session().is_some());
    }
}

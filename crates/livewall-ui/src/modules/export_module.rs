// crates/livewall-ui/src/modules/export_module.rs
//
// ExportModule: size choice, install targets and the Install button.
//
// Submit availability comes straight from the coordinator (SessionView::can_submit):
//
//   no file / probing       → disabled
//   ready / probe failed    → enabled
//   exporting (any session) → disabled, label shows progress
//   done / export failed    → enabled again for another run

use egui::{Color32, RichText, Stroke, Ui};

use livewall_core::commands::SessionCommand;
use livewall_core::coordinator::SessionView;
use livewall_core::intake::IntakeAdapter;
use livewall_core::state::Resolution;
use livewall_core::targets::{Detection, Target};

use super::{SessionModule, UiCommand};
use crate::helpers::format::fit_path;
use crate::theme::{ACCENT, BG_3, TEXT_DIM};

pub struct ExportModule;

impl SessionModule for ExportModule {
    fn ui(
        &mut self,
        ui:      &mut Ui,
        view:    &SessionView<'_>,
        _intake: &mut IntakeAdapter,
        cmd:     &mut Vec<UiCommand>,
    ) {
        // ── Size ──────────────────────────────────────────────────────────────
        ui.label(RichText::new("Size").size(12.0).strong());
        ui.horizontal(|ui| {
            for size in Resolution::ALL {
                let mut checked = view.sizes.is_selected(size);
                if ui.checkbox(&mut checked, size.label()).changed() {
                    cmd.push(UiCommand::Session(SessionCommand::SizeSelected { size, checked }));
                }
            }
        });

        ui.add_space(10.0);

        // ── Targets ───────────────────────────────────────────────────────────
        ui.label(RichText::new("Install to").size(12.0).strong());
        match view.targets.detection() {
            Detection::Pending => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Looking for browsers…").size(11.0).color(TEXT_DIM));
                });
            }
            Detection::Failed => {
                ui.label(RichText::new("Browser detection failed").size(11.0).color(TEXT_DIM));
            }
            Detection::Complete => {}
        }
        for target in view.targets.targets() {
            target_row(ui, target, cmd);
        }

        ui.add_space(14.0);

        // ── Install button ────────────────────────────────────────────────────
        let label = if view.exporting { "Exporting…" } else { "⚡ Install wallpaper" };
        let enabled = view.can_submit;

        let install = egui::Button::new(
            RichText::new(label)
                .size(13.0)
                .strong()
                .color(if enabled { Color32::BLACK } else { Color32::DARK_GRAY }),
        )
        .fill(if enabled { ACCENT } else { BG_3 })
        .stroke(Stroke::NONE)
        .min_size(egui::vec2(ui.available_width(), 34.0));

        let response = ui.add_enabled(enabled, install);
        if response.clicked() {
            cmd.push(UiCommand::Session(SessionCommand::SubmitRequested));
        }
        if view.session.is_none() {
            response.on_disabled_hover_text("Choose a video first");
        }
    }
}

fn target_row(ui: &mut Ui, target: &Target, cmd: &mut Vec<UiCommand>) {
    ui.horizontal(|ui| {
        let mut selected = target.selected;
        let resp = ui.checkbox(&mut selected, target.id.label());
        if resp.changed() {
            cmd.push(UiCommand::Session(SessionCommand::TargetToggled {
                target: target.id,
                selected,
            }));
        }
        match &target.discovered_path {
            Some(path) => {
                resp.on_hover_text(path);
                ui.label(RichText::new(fit_path(path, 240.0)).size(10.0).color(TEXT_DIM));
            }
            None => {
                ui.label(RichText::new("not installed").size(10.0).italics().color(TEXT_DIM));
            }
        }
    });
}

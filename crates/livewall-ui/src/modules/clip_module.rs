// crates/livewall-ui/src/modules/clip_module.rs
//
// Metadata badges for the current clip, or the probe state while it runs.

use egui::{Margin, RichText, Stroke, Ui};

use livewall_core::coordinator::SessionView;
use livewall_core::helpers::badges::Badge;
use livewall_core::intake::IntakeAdapter;
use livewall_core::state::Lifecycle;

use super::{SessionModule, UiCommand};
use crate::helpers::format::fit_label;
use crate::theme::{BG_3, BORDER, TEXT, TEXT_DIM, WARN};

pub struct ClipModule;

impl SessionModule for ClipModule {
    fn ui(
        &mut self,
        ui:      &mut Ui,
        view:    &SessionView<'_>,
        _intake: &mut IntakeAdapter,
        _cmd:    &mut Vec<UiCommand>,
    ) {
        let Some(session) = view.session else { return };

        if session.lifecycle == Lifecycle::Probing {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new(format!("Reading {}", session.file_name())).size(11.0).color(TEXT_DIM));
            });
            return;
        }

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(4.0, 4.0);
            for badge in &view.badges {
                badge_chip(ui, badge);
            }
        });
    }
}

fn badge_chip(ui: &mut Ui, badge: &Badge) {
    let (color, border) = if badge.warn { (WARN, WARN) } else { (TEXT, BORDER) };
    egui::Frame::new()
        .fill(BG_3)
        .stroke(Stroke::new(1.0, border))
        .corner_radius(egui::CornerRadius::same(9))
        .inner_margin(Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(fit_label(&badge.text, 420.0)).size(11.0).color(color))
                .on_hover_text(&badge.text);
        });
}

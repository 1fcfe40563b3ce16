// crates/livewall-ui/src/modules/trim_module.rs
//
// Start/end seconds for clips longer than a minute. The fields are free text;
// every edit goes to the coordinator verbatim and is parsed at submit time.

use egui::{RichText, Ui};

use livewall_core::commands::{SessionCommand, TrimField};
use livewall_core::coordinator::SessionView;
use livewall_core::intake::IntakeAdapter;
use livewall_core::trim::{TRIM_MAX, TRIM_MIN};

use super::{SessionModule, UiCommand};
use crate::theme::TEXT_DIM;

pub struct TrimModule;

impl SessionModule for TrimModule {
    fn ui(
        &mut self,
        ui:      &mut Ui,
        view:    &SessionView<'_>,
        _intake: &mut IntakeAdapter,
        cmd:     &mut Vec<UiCommand>,
    ) {
        let Some(session) = view.session.filter(|s| s.trim.visible) else { return };

        ui.label(RichText::new("Trim").size(12.0).strong());
        ui.label(
            RichText::new(format!("Wallpapers run {TRIM_MIN:.0}–{TRIM_MAX:.0} s. Times in seconds."))
                .size(10.0).color(TEXT_DIM),
        );
        ui.add_space(2.0);

        ui.horizontal(|ui| {
            for (field, label, current) in [
                (TrimField::Start, "Start", &session.trim.start),
                (TrimField::End,   "End",   &session.trim.end),
            ] {
                ui.label(RichText::new(label).size(11.0).color(TEXT_DIM));
                let mut text = current.clone();
                let resp = ui.add(egui::TextEdit::singleline(&mut text).desired_width(64.0));
                if resp.changed() {
                    cmd.push(UiCommand::Session(SessionCommand::TrimEdited { field, text }));
                }
                ui.add_space(8.0);
            }
        });
    }
}

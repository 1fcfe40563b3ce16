// crates/livewall-ui/src/modules/intake_module.rs
//
// Drop zone with the Add button, plus the fallback path field once the
// native dialog has proved unavailable.

use egui::{Align, Color32, Key, Layout, Margin, RichText, Stroke, Ui};

use livewall_core::coordinator::SessionView;
use livewall_core::intake::{IntakeAdapter, IntakeEvent};

use super::{SessionModule, UiCommand};
use crate::theme::{ACCENT, BG_2, BG_3, BORDER, TEXT_DIM};

pub struct IntakeModule;

impl SessionModule for IntakeModule {
    fn ui(
        &mut self,
        ui:     &mut Ui,
        view:   &SessionView<'_>,
        intake: &mut IntakeAdapter,
        cmd:    &mut Vec<UiCommand>,
    ) {
        let (fill, stroke) = if intake.drag_active {
            (BG_3, Stroke::new(2.0, ACCENT))
        } else {
            (BG_2, Stroke::new(1.0, BORDER))
        };

        egui::Frame::new()
            .fill(fill)
            .stroke(stroke)
            .corner_radius(egui::CornerRadius::same(6))
            .inner_margin(Margin::symmetric(12, 18))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("🎞").size(28.0));
                    ui.add_space(4.0);
                    let headline = if intake.drag_active { "Release to use this video" } else { "Drop a video here" };
                    ui.label(RichText::new(headline).size(13.0).strong());
                    ui.add_space(8.0);

                    if !intake.fallback_shown {
                        let label = if intake.picker_open() { "Choosing…" } else { "＋ Add video" };
                        let add = egui::Button::new(RichText::new(label).size(12.0))
                            .min_size(egui::vec2(120.0, 26.0));
                        if ui.add_enabled(!intake.picker_open(), add).clicked() {
                            cmd.push(UiCommand::Intake(IntakeEvent::PickerRequested));
                        }
                    }
                });
            });

        if intake.fallback_shown {
            ui.add_space(6.0);
            ui.label(
                RichText::new("File dialog unavailable. Enter the video path:")
                    .size(11.0).color(TEXT_DIM),
            );
            ui.horizontal(|ui| {
                let mut submit = false;
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    submit |= ui.button("Use path").clicked();
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut intake.fallback_input)
                            .desired_width(f32::INFINITY)
                            .hint_text("/path/to/video.mp4"),
                    );
                    submit |= resp.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                });
                if submit {
                    cmd.push(UiCommand::Intake(IntakeEvent::FallbackSubmitted));
                }
            });
        }

        if view.session.is_none() && !intake.drag_active {
            ui.add_space(4.0);
            ui.label(
                RichText::new("mp4, mov, mkv, webm. Clips over 60 s can be trimmed.")
                    .size(10.0).color(Color32::from_gray(110)),
            );
        }
    }
}

// crates/livewall-ui/src/modules/mod.rs
//
// Panel registry. To add a new panel:
//   1. Create modules/mypanel.rs implementing SessionModule
//   2. Add `pub mod mypanel;` below
//   3. Add a field and one ui() call in app.rs

pub mod clip_module;
pub mod export_module;
pub mod intake_module;
pub mod trim_module;

use egui::Ui;

use livewall_core::commands::SessionCommand;
use livewall_core::coordinator::SessionView;
use livewall_core::intake::{IntakeAdapter, IntakeEvent};

/// Everything a panel can ask for. Processed after the UI pass.
#[derive(Clone, Debug, PartialEq)]
pub enum UiCommand {
    Session(SessionCommand),
    Intake(IntakeEvent),
    Exit,
}

/// Every panel implements this trait.
/// Panels read the session view and emit commands; they never mutate session
/// state directly. `intake` is mutable only for the fallback path text field.
pub trait SessionModule {
    fn ui(
        &mut self,
        ui:     &mut Ui,
        view:   &SessionView<'_>,
        intake: &mut IntakeAdapter,
        cmd:    &mut Vec<UiCommand>,
    );
}

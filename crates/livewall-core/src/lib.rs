// crates/livewall-core/src/lib.rs
//
// Session logic for LiveWall. No egui, no child processes, no threads.
// Everything here is driven synchronously by the UI thread: commands go in
// through ExportCoordinator::handle, backend completions through ::ingest.

pub mod commands;
pub mod coordinator;
pub mod error;
pub mod helpers;
pub mod intake;
pub mod media_types;
pub mod state;
pub mod targets;
pub mod trim;

pub use commands::{SessionCommand, TrimField};
pub use coordinator::{Backend, ExportCoordinator, SessionView};
pub use error::{BackendError, SubmitError};
pub use media_types::{BackendResult, ExportRequest, ExportResponse, VideoMeta};

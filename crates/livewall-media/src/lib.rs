// crates/livewall-media/src/lib.rs
//
// No egui dependency. Talks to the native backend program on background
// threads and reports to livewall-ui over a channel only.
//
// To add a backend command:
//   1. Add a BridgeRequest variant and a decoder in protocol.rs
//   2. Add the method to livewall_core::Backend
//   3. Implement it on CommandWorker in worker.rs

pub mod bridge;
pub mod protocol;
pub mod resolve;
pub mod worker;

// Re-export the main public API so livewall-ui imports are simple.
pub use bridge::BridgeCommand;
pub use resolve::resolve_program;
pub use worker::CommandWorker;
pub use livewall_core::media_types::BackendResult;

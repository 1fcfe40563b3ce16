// crates/livewall-core/src/helpers/mod.rs
//
// Formatting and parsing shared by the coordinator and the UI panels.

pub mod badges;
pub mod time;

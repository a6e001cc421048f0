// RaidTally - core/mod.rs
//
// Core business logic layer: matching, roster state, history, CSV.
// Must NOT depend on: ui, platform, app, net, or any network crate.

pub mod attendance;
pub mod csv_io;
pub mod history;
pub mod model;
pub mod roster;

// RaidTally - app/mod.rs
//
// Application layer: session state and the command handlers that mutate it.
// Dependencies: core, net, platform.
// Must NOT depend on: ui.

pub mod actions;
pub mod state;

// RaidTally - platform/mod.rs
//
// Platform abstraction layer: paths, config.toml, secrets.toml.
// Must NOT depend on: core, app, ui, net.

pub mod config;
pub mod secrets;

// RaidTally - ui/panels/mod.rs

pub mod analysis;
pub mod guide;
pub mod history;
pub mod results;
pub mod roster;

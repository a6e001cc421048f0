// RaidTally - net/mod.rs
//
// Remote service clients. Blocking HTTP, one request per user action,
// no retry. Depends on core (models) and platform (credentials).

pub mod sheets;
pub mod wcl;

// StartupLens - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (state), core (read-only models).
// Must NOT depend on: platform, direct I/O beyond the writer it is given.

pub mod report;

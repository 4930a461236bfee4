// StartupLens - platform/mod.rs
//
// Platform abstraction layer: config directories, config.toml, input reading.
// Dependencies: standard library, directories crate, core value types.
// Must NOT depend on: app, ui.

pub mod config;
pub mod fs;

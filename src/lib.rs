// StartupLens - lib.rs
//
// Library entry point. The binary in `main.rs` is a thin CLI shell over
// these modules; integration tests use them directly.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;

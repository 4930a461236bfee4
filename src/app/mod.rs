// StartupLens - app/mod.rs
//
// Application layer: ingestion orchestration and dashboard state.
// Dependencies: core layer, platform input reading.
// Must NOT depend on: ui.

pub mod ingest;
pub mod state;

// StartupLens - core/mod.rs
//
// Core business logic layer: parsing, filtering, aggregation, scoring seam,
// envelope decoding and export.
// Must NOT depend on: ui, platform, app, or read files directly.

pub mod aggregate;
pub mod envelope;
pub mod export;
pub mod filter;
pub mod model;
pub mod parser;
pub mod score;

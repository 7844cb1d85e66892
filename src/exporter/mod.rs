// file: src/exporter/mod.rs
// description: history export module exports
// reference: internal module structure

pub mod json;

pub use json::{ExportManifest, JsonExporter};

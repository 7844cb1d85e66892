// file: src/report/mod.rs
// description: console rendering module exports
// reference: internal module structure

pub mod console;

pub use console::{format_age, render_history, render_record};

//! Output formatting module

pub mod json;

pub use json::{format_json, JsonLines, RecordSink};

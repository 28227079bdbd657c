//! Comparison outcome formatters.

pub mod json;
pub mod text;

pub use json::format_json;
pub use text::{format_text, node_signature};

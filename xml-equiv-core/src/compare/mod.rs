//! Structural tree equivalence under configurable rules.

pub mod comparer;
pub mod engine;
pub mod options;
pub mod result;

pub use comparer::{AsciiCaseInsensitive, Ordinal, StringComparer};
pub use engine::{compare, compare_with, compare_with_options};
pub use options::ComparisonOptions;
pub use result::Mismatch;

//! XML tree model, parsing/writing primitives, and a configurable
//! structural equivalence checker built on them.

pub mod compare;
pub mod format;
pub mod parser;
pub mod tree;
pub mod writer;

pub use compare::{
    compare, compare_with, compare_with_options, AsciiCaseInsensitive, ComparisonOptions,
    Mismatch, Ordinal, StringComparer,
};
pub use format::{format_json, format_text};
pub use parser::{parse, parse_file, ParseError};
pub use tree::{NodeKind, XmlNode};
pub use writer::{write, write_file, WriteError};

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use xml_equiv_core::ComparisonOptions;

#[derive(Parser, Debug)]
#[command(name = "xml-equiv")]
#[command(about = "Compare two XML documents for structural equivalence")]
pub struct Cli {
    pub file1: PathBuf,
    pub file2: PathBuf,

    /// Ignore attributes entirely.
    #[arg(long)]
    pub ignore_attributes: bool,
    /// Ignore attributes present only in the second document.
    #[arg(long)]
    pub ignore_extra_attributes: bool,
    /// Ignore the relative order of attributes.
    #[arg(long)]
    pub ignore_attribute_order: bool,

    /// Ignore elements entirely.
    #[arg(long)]
    pub ignore_elements: bool,
    /// Ignore elements present only in the second document.
    #[arg(long)]
    pub ignore_extra_elements: bool,
    /// Ignore the relative order of sibling elements.
    #[arg(long)]
    pub ignore_element_order: bool,

    /// Ignore text and CDATA content entirely.
    #[arg(long)]
    pub ignore_text: bool,
    /// Ignore text present only in the second document.
    #[arg(long)]
    pub ignore_extra_text: bool,
    /// Ignore the relative order of sibling text nodes.
    #[arg(long)]
    pub ignore_text_order: bool,

    /// Ignore comments entirely.
    #[arg(long)]
    pub ignore_comments: bool,
    /// Ignore comments present only in the second document.
    #[arg(long)]
    pub ignore_extra_comments: bool,
    /// Ignore the relative order of sibling comments.
    #[arg(long)]
    pub ignore_comment_order: bool,

    /// Ignore processing instructions entirely.
    #[arg(long)]
    pub ignore_processing_instructions: bool,
    /// Ignore processing instructions present only in the second document.
    #[arg(long)]
    pub ignore_extra_processing_instructions: bool,
    /// Ignore the relative order of sibling processing instructions.
    #[arg(long)]
    pub ignore_processing_instruction_order: bool,

    /// Ignore document type declarations entirely.
    #[arg(long)]
    pub ignore_doctypes: bool,
    /// Ignore a document type declaration present only in the second document.
    #[arg(long)]
    pub ignore_extra_doctypes: bool,

    /// Ignore formatting text that sits next to non-text children.
    #[arg(long)]
    pub ignore_whitespace: bool,

    /// Compare names and values ASCII case-insensitively.
    #[arg(long)]
    pub case_insensitive: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Suppress output; rely on the exit status alone.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub fn options(&self) -> ComparisonOptions {
        let mut options = ComparisonOptions::default();
        let flags = [
            (self.ignore_attributes, ComparisonOptions::IGNORE_ATTRIBUTES),
            (
                self.ignore_extra_attributes,
                ComparisonOptions::IGNORE_EXTRA_ATTRIBUTES,
            ),
            (
                self.ignore_attribute_order,
                ComparisonOptions::IGNORE_ATTRIBUTE_ORDER,
            ),
            (self.ignore_elements, ComparisonOptions::IGNORE_ELEMENTS),
            (
                self.ignore_extra_elements,
                ComparisonOptions::IGNORE_EXTRA_ELEMENTS,
            ),
            (
                self.ignore_element_order,
                ComparisonOptions::IGNORE_ELEMENT_ORDER,
            ),
            (self.ignore_text, ComparisonOptions::IGNORE_TEXT),
            (self.ignore_extra_text, ComparisonOptions::IGNORE_EXTRA_TEXT),
            (self.ignore_text_order, ComparisonOptions::IGNORE_TEXT_ORDER),
            (self.ignore_comments, ComparisonOptions::IGNORE_COMMENTS),
            (
                self.ignore_extra_comments,
                ComparisonOptions::IGNORE_EXTRA_COMMENTS,
            ),
            (
                self.ignore_comment_order,
                ComparisonOptions::IGNORE_COMMENT_ORDER,
            ),
            (
                self.ignore_processing_instructions,
                ComparisonOptions::IGNORE_PROCESSING_INSTRUCTIONS,
            ),
            (
                self.ignore_extra_processing_instructions,
                ComparisonOptions::IGNORE_EXTRA_PROCESSING_INSTRUCTIONS,
            ),
            (
                self.ignore_processing_instruction_order,
                ComparisonOptions::IGNORE_PROCESSING_INSTRUCTION_ORDER,
            ),
            (self.ignore_doctypes, ComparisonOptions::IGNORE_DOCUMENT_TYPES),
            (
                self.ignore_extra_doctypes,
                ComparisonOptions::IGNORE_EXTRA_DOCUMENT_TYPES,
            ),
            (
                self.ignore_whitespace,
                ComparisonOptions::IGNORE_MIXED_CONTENT_TEXT,
            ),
        ];
        for (enabled, flag) in flags {
            if enabled {
                options |= flag;
            }
        }
        options
    }
}

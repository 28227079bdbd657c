use bitflags::bitflags;

bitflags! {
    /// Raw comparison flags.
    ///
    /// Each structural family (attributes, elements, text, comments,
    /// processing instructions, document types) carries three cascading
    /// levels: ignoring a family entirely implies ignoring extra items of it
    /// in the second tree, which in turn implies ignoring the relative order
    /// of its items. The empty set is the strictest comparison: full order
    /// significance, nothing ignored.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ComparisonOptions: u32 {
        const IGNORE_ATTRIBUTES = 1 << 0;
        const IGNORE_EXTRA_ATTRIBUTES = 1 << 1;
        const IGNORE_ATTRIBUTE_ORDER = 1 << 2;

        const IGNORE_ELEMENTS = 1 << 3;
        const IGNORE_EXTRA_ELEMENTS = 1 << 4;
        const IGNORE_ELEMENT_ORDER = 1 << 5;

        const IGNORE_TEXT = 1 << 6;
        const IGNORE_EXTRA_TEXT = 1 << 7;
        const IGNORE_TEXT_ORDER = 1 << 8;

        const IGNORE_COMMENTS = 1 << 9;
        const IGNORE_EXTRA_COMMENTS = 1 << 10;
        const IGNORE_COMMENT_ORDER = 1 << 11;

        const IGNORE_PROCESSING_INSTRUCTIONS = 1 << 12;
        const IGNORE_EXTRA_PROCESSING_INSTRUCTIONS = 1 << 13;
        const IGNORE_PROCESSING_INSTRUCTION_ORDER = 1 << 14;

        const IGNORE_DOCUMENT_TYPES = 1 << 15;
        const IGNORE_EXTRA_DOCUMENT_TYPES = 1 << 16;
        /// Accepted for family uniformity; document types are never
        /// order-compared against their siblings.
        const IGNORE_DOCUMENT_TYPE_ORDER = 1 << 17;

        /// Drop text children of a container that also holds non-text
        /// children before order-significant comparison. Text-only content
        /// is still compared.
        const IGNORE_MIXED_CONTENT_TEXT = 1 << 18;
    }
}

/// Normalized levels for one structural family. `ignore_all` implies
/// `ignore_extra` implies `ignore_order`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FamilyRules {
    pub ignore_all: bool,
    pub ignore_extra: bool,
    pub ignore_order: bool,
}

impl FamilyRules {
    fn cascade(ignore_all: bool, ignore_extra: bool, ignore_order: bool) -> Self {
        let ignore_extra = ignore_extra || ignore_all;
        let ignore_order = ignore_order || ignore_extra;
        FamilyRules {
            ignore_all,
            ignore_extra,
            ignore_order,
        }
    }
}

/// The full normalized option set, computed once per comparison call so the
/// traversal and matching code never re-tests raw bits.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Rules {
    pub attributes: FamilyRules,
    pub elements: FamilyRules,
    pub text: FamilyRules,
    pub comments: FamilyRules,
    pub processing_instructions: FamilyRules,
    pub document_types: FamilyRules,
    pub mixed_content_text: bool,
    /// Every family is fully ignored; containers need no child walk at all.
    pub skip_all_children: bool,
    /// No child family relaxes order; the strict positional walk applies.
    pub strict_child_order: bool,
}

impl Rules {
    pub fn normalize(options: ComparisonOptions) -> Self {
        use crate::compare::options::ComparisonOptions as O;

        let attributes = FamilyRules::cascade(
            options.contains(O::IGNORE_ATTRIBUTES),
            options.contains(O::IGNORE_EXTRA_ATTRIBUTES),
            options.contains(O::IGNORE_ATTRIBUTE_ORDER),
        );
        let elements = FamilyRules::cascade(
            options.contains(O::IGNORE_ELEMENTS),
            options.contains(O::IGNORE_EXTRA_ELEMENTS),
            options.contains(O::IGNORE_ELEMENT_ORDER),
        );
        let text = FamilyRules::cascade(
            options.contains(O::IGNORE_TEXT),
            options.contains(O::IGNORE_EXTRA_TEXT),
            options.contains(O::IGNORE_TEXT_ORDER),
        );
        let comments = FamilyRules::cascade(
            options.contains(O::IGNORE_COMMENTS),
            options.contains(O::IGNORE_EXTRA_COMMENTS),
            options.contains(O::IGNORE_COMMENT_ORDER),
        );
        let processing_instructions = FamilyRules::cascade(
            options.contains(O::IGNORE_PROCESSING_INSTRUCTIONS),
            options.contains(O::IGNORE_EXTRA_PROCESSING_INSTRUCTIONS),
            options.contains(O::IGNORE_PROCESSING_INSTRUCTION_ORDER),
        );
        let document_types = FamilyRules::cascade(
            options.contains(O::IGNORE_DOCUMENT_TYPES),
            options.contains(O::IGNORE_EXTRA_DOCUMENT_TYPES),
            options.contains(O::IGNORE_DOCUMENT_TYPE_ORDER),
        );

        let skip_all_children = attributes.ignore_all
            && elements.ignore_all
            && text.ignore_all
            && comments.ignore_all
            && processing_instructions.ignore_all
            && document_types.ignore_all;
        let strict_child_order = !elements.ignore_order
            && !text.ignore_order
            && !comments.ignore_order
            && !processing_instructions.ignore_order
            && !document_types.ignore_order;

        Rules {
            attributes,
            elements,
            text,
            comments,
            processing_instructions,
            document_types,
            mixed_content_text: options.contains(O::IGNORE_MIXED_CONTENT_TEXT),
            skip_all_children,
            strict_child_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ComparisonOptions as O, Rules};

    #[test]
    fn empty_options_are_strictest() {
        let rules = Rules::normalize(O::default());
        assert!(!rules.attributes.ignore_order);
        assert!(!rules.elements.ignore_extra);
        assert!(!rules.skip_all_children);
        assert!(rules.strict_child_order);
        assert!(!rules.mixed_content_text);
    }

    #[test]
    fn ignore_all_cascades_to_extra_and_order() {
        let rules = Rules::normalize(O::IGNORE_ELEMENTS);
        assert!(rules.elements.ignore_all);
        assert!(rules.elements.ignore_extra);
        assert!(rules.elements.ignore_order);
        assert!(!rules.strict_child_order);
    }

    #[test]
    fn ignore_extra_cascades_to_order_only() {
        let rules = Rules::normalize(O::IGNORE_EXTRA_TEXT);
        assert!(!rules.text.ignore_all);
        assert!(rules.text.ignore_extra);
        assert!(rules.text.ignore_order);
    }

    #[test]
    fn skip_all_children_requires_every_family() {
        let most = O::IGNORE_ELEMENTS
            | O::IGNORE_TEXT
            | O::IGNORE_COMMENTS
            | O::IGNORE_PROCESSING_INSTRUCTIONS
            | O::IGNORE_DOCUMENT_TYPES;
        assert!(!Rules::normalize(most).skip_all_children);
        assert!(Rules::normalize(most | O::IGNORE_ATTRIBUTES).skip_all_children);
    }

    #[test]
    fn attribute_order_does_not_affect_child_walk() {
        let rules = Rules::normalize(O::IGNORE_ATTRIBUTE_ORDER);
        assert!(rules.attributes.ignore_order);
        assert!(rules.strict_child_order);
    }
}

use xml_equiv_core::{compare, XmlNode};

fn chain(depth: usize, leaf_text: &str) -> XmlNode {
    let mut node = XmlNode::element("n").with_child(XmlNode::text(leaf_text));
    for _ in 1..depth {
        node = XmlNode::element("n").with_child(node);
    }
    node
}

#[test]
fn same_reference_is_equivalent() {
    let tree = XmlNode::element("root").with_child(XmlNode::text("payload"));
    assert_eq!(compare(Some(&tree), Some(&tree)), None);
}

#[test]
fn structural_clone_is_equivalent() {
    let tree = XmlNode::document(vec![
        XmlNode::document_type("catalog", None, Some("catalog.dtd".to_string()), None),
        XmlNode::processing_instruction("xml-stylesheet", "href=\"c.css\""),
        XmlNode::element("catalog")
            .with_attribute("version", "1.2")
            .with_child(XmlNode::comment(" body "))
            .with_child(XmlNode::element("item").with_child(XmlNode::cdata("a < b")))
            .with_child(XmlNode::text("tail")),
    ]);
    let clone = tree.clone();
    assert_eq!(compare(Some(&tree), Some(&clone)), None);
}

#[test]
fn both_absent_roots_are_equivalent() {
    assert_eq!(compare(None, None), None);
}

#[test]
fn absent_side_is_an_ordinary_mismatch() {
    let tree = XmlNode::element("root");

    let found = compare(Some(&tree), None).expect("should mismatch");
    assert_eq!(found.left, Some(&tree));
    assert_eq!(found.right, None);

    let found = compare(None, Some(&tree)).expect("should mismatch");
    assert_eq!(found.left, None);
    assert_eq!(found.right, Some(&tree));
}

#[test]
fn root_kind_mismatch_is_immediate() {
    let left = XmlNode::element("root").with_child(XmlNode::element("deep"));
    let right = XmlNode::text("root");

    let found = compare(Some(&left), Some(&right)).expect("should mismatch");
    assert_eq!(found.left, Some(&left));
    assert_eq!(found.right, Some(&right));
}

#[test]
fn text_and_cdata_are_distinct_kinds() {
    let left = XmlNode::element("r").with_child(XmlNode::text("x"));
    let right = XmlNode::element("r").with_child(XmlNode::cdata("x"));

    let found = compare(Some(&left), Some(&right)).expect("should mismatch");
    assert_eq!(found.left, Some(&XmlNode::text("x")));
    assert_eq!(found.right, Some(&XmlNode::cdata("x")));
}

#[test]
fn differing_text_is_located() {
    let left = XmlNode::element("r").with_child(XmlNode::text("one"));
    let right = XmlNode::element("r").with_child(XmlNode::text("two"));

    let found = compare(Some(&left), Some(&right)).expect("should mismatch");
    assert_eq!(found.left, Some(&XmlNode::text("one")));
    assert_eq!(found.right, Some(&XmlNode::text("two")));
}

#[test]
fn processing_instruction_compares_target_and_data() {
    let left = XmlNode::processing_instruction("php", "echo 1;");
    let same = XmlNode::processing_instruction("php", "echo 1;");
    assert_eq!(compare(Some(&left), Some(&same)), None);

    let other_target = XmlNode::processing_instruction("perl", "echo 1;");
    assert!(compare(Some(&left), Some(&other_target)).is_some());

    let other_data = XmlNode::processing_instruction("php", "echo 2;");
    assert!(compare(Some(&left), Some(&other_data)).is_some());
}

#[test]
fn comment_values_are_compared() {
    let left = XmlNode::element("r").with_child(XmlNode::comment("a"));
    let right = XmlNode::element("r").with_child(XmlNode::comment("b"));
    assert!(compare(Some(&left), Some(&right)).is_some());
}

#[test]
fn attribute_roots_compare_by_name_and_value() {
    let left = XmlNode::attribute("id", "1");
    assert_eq!(compare(Some(&left), Some(&XmlNode::attribute("id", "1"))), None);
    assert!(compare(Some(&left), Some(&XmlNode::attribute("id", "2"))).is_some());
    assert!(compare(Some(&left), Some(&XmlNode::attribute("key", "1"))).is_some());
}

#[test]
fn doctype_absent_fields_equal_empty_strings() {
    let absent = XmlNode::document_type("catalog", None, None, None);
    let empty = XmlNode::document_type(
        "catalog",
        Some(String::new()),
        Some(String::new()),
        Some(String::new()),
    );
    assert_eq!(compare(Some(&absent), Some(&empty)), None);

    let other = XmlNode::document_type("catalog", None, Some("c.dtd".to_string()), None);
    assert!(compare(Some(&absent), Some(&other)).is_some());
}

#[test]
fn deeply_nested_trees_do_not_exhaust_the_call_stack() {
    let left = chain(4_000, "leaf");
    let same = chain(4_000, "leaf");
    assert_eq!(compare(Some(&left), Some(&same)), None);

    let other = chain(4_000, "other");
    let found = compare(Some(&left), Some(&other)).expect("should mismatch");
    assert_eq!(found.left, Some(&XmlNode::text("leaf")));
    assert_eq!(found.right, Some(&XmlNode::text("other")));
}

#[test]
fn child_list_length_mismatch_pairs_with_missing_side() {
    let left = XmlNode::element("r").with_child(XmlNode::element("a"));
    let right = XmlNode::element("r")
        .with_child(XmlNode::element("a"))
        .with_child(XmlNode::element("b"));

    let found = compare(Some(&left), Some(&right)).expect("should mismatch");
    assert_eq!(found.left, None);
    assert_eq!(found.right, Some(&XmlNode::element("b")));
}

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use xml_equiv_core::{compare, parse, parse_file, write, write_file, NodeKind, XmlNode};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn written_output_parses_back_to_the_same_tree() {
    let first = parse_file(&fixture("fixtures/catalog_a.xml")).expect("initial parse");

    let written = write(&first).expect("write should succeed");
    let second = parse(&written).expect("re-parse should succeed");

    assert_eq!(first, second);
    assert_eq!(compare(Some(&first), Some(&second)), None);
}

#[test]
fn doctype_and_instructions_survive_a_file_round_trip() {
    let out_dir = tempfile::tempdir().expect("tempdir should be created");
    let out_path = out_dir.path().join("roundtrip.xml");

    let node = parse_file(&fixture("fixtures/catalog_b.xml")).expect("parse should succeed");
    write_file(&node, &out_path).expect("write_file should succeed");
    let reparsed = parse_file(&out_path).expect("parse_file should succeed");

    assert_eq!(node, reparsed);
    let kinds: Vec<NodeKind> = reparsed.children().iter().map(XmlNode::kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::DocumentType,
            NodeKind::ProcessingInstruction,
            NodeKind::Element,
        ]
    );
}

#[test]
fn cdata_sections_are_not_collapsed_into_text() {
    let doc = parse(b"<r><![CDATA[a < b]]></r>").expect("parse should succeed");
    let written = write(&doc).expect("write should succeed");
    let reparsed = parse(&written).expect("re-parse should succeed");

    let root = reparsed.root_element().expect("root element should exist");
    assert_eq!(root.children().len(), 1);
    assert_eq!(root.children()[0].kind(), NodeKind::CData);
    assert_eq!(root.children()[0].value(), Some("a < b"));
}

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("fixtures")
        .join(name)
}

fn xml_equiv() -> Command {
    Command::cargo_bin("xml-equiv").expect("binary should build")
}

#[test]
fn identical_files_are_equivalent() {
    xml_equiv()
        .arg(fixture("catalog_a.xml"))
        .arg(fixture("catalog_a.xml"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("equivalent"));
}

#[test]
fn formatting_differences_fail_a_strict_comparison() {
    xml_equiv()
        .arg(fixture("catalog_a.xml"))
        .arg(fixture("catalog_b.xml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not equivalent"));
}

#[test]
fn relaxed_flags_accept_formatting_differences() {
    xml_equiv()
        .arg(fixture("catalog_a.xml"))
        .arg(fixture("catalog_b.xml"))
        .arg("--ignore-attribute-order")
        .arg("--ignore-comments")
        .arg("--ignore-whitespace")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("equivalent"));
}

#[test]
fn json_format_carries_the_verdict() {
    xml_equiv()
        .arg(fixture("catalog_a.xml"))
        .arg(fixture("catalog_b.xml"))
        .arg("--format")
        .arg("json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"equivalent\": false"));
}

#[test]
fn quiet_mode_prints_nothing() {
    xml_equiv()
        .arg(fixture("catalog_a.xml"))
        .arg(fixture("catalog_b.xml"))
        .arg("--quiet")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn unreadable_input_is_a_usage_error() {
    xml_equiv()
        .arg(fixture("does_not_exist.xml"))
        .arg(fixture("catalog_a.xml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn malformed_input_is_a_usage_error() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("broken.xml");
    std::fs::write(&path, "<a><b></a>").expect("fixture write should succeed");

    xml_equiv()
        .arg(&path)
        .arg(fixture("catalog_a.xml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}

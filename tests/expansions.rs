// tests/expansions.rs

use std::path::Path;

use eb::config::{load_expansions, parse_expansions};
use eb::errors::EbError;
use eb::fs::mock::MockFileSystem;
use eb::layout::BuildLayout;

#[test]
fn scalars_are_rendered_as_text() {
    let yaml = r#"
revision: abc123
build_id: 42
ratio: 1.5
is_patch: true
empty:
quoted: "2020-01-01"
"#;
    let exp = parse_expansions(Path::new("Expansions.yml"), yaml).unwrap();

    assert_eq!(exp.get("revision"), Some("abc123"));
    assert_eq!(exp.get("build_id"), Some("42"));
    assert_eq!(exp.get("ratio"), Some("1.5"));
    assert_eq!(exp.get("is_patch"), Some("true"));
    assert_eq!(exp.get("empty"), Some(""));
    assert_eq!(exp.get("quoted"), Some("2020-01-01"));
    assert_eq!(exp.len(), 6);
}

#[test]
fn collections_are_rendered_as_json() {
    let yaml = "flags: [a, b]\nnested: {k: v}\n";
    let exp = parse_expansions(Path::new("Expansions.yml"), yaml).unwrap();

    assert_eq!(exp.get("flags"), Some(r#"["a","b"]"#));
    assert_eq!(exp.get("nested"), Some(r#"{"k":"v"}"#));
}

#[test]
fn empty_document_is_empty_mapping() {
    let exp = parse_expansions(Path::new("Expansions.yml"), "").unwrap();
    assert!(exp.is_empty());
}

#[test]
fn non_mapping_document_is_rejected() {
    let err = parse_expansions(Path::new("Expansions.yml"), "- a\n- b\n").unwrap_err();
    match err {
        EbError::InvalidExpansions { reason, .. } => assert!(reason.contains("a sequence")),
        other => panic!("expected InvalidExpansions, got {:?}", other),
    }
}

#[test]
fn missing_expansions_file_is_a_config_error() {
    let fs = MockFileSystem::new();
    let layout = BuildLayout::new("/repo");

    match load_expansions(&fs, &layout) {
        Err(EbError::ExpansionsNotFound(path)) => {
            assert_eq!(path, Path::new("/repo/build/Expansions.yml"));
        }
        other => panic!("expected ExpansionsNotFound, got {:?}", other),
    }
}

#[test]
fn expansions_load_from_build_dir() {
    let fs = MockFileSystem::new();
    let layout = BuildLayout::new("/repo");
    fs.add_file("/repo/build/Expansions.yml", "branch_name: master\n");

    let exp = load_expansions(&fs, &layout).unwrap();
    assert_eq!(exp.keys().collect::<Vec<_>>(), vec!["branch_name"]);
}

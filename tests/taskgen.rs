// tests/taskgen.rs

use std::path::PathBuf;

use eb::errors::{EbError, SchemaViolation};
use eb::fs::FileSystem;
use eb::taskgen::{collect_tasks, generate, is_task_file_name, shell_quote, GeneratedTask};
use eb_test_utils::builders::{mock_build_root, task_file_yaml, BuildRootBuilder};
use eb_test_utils::init_tracing;
use eb::fs::RealFileSystem;

fn tasks_dir() -> PathBuf {
    PathBuf::from("/repo/build/Tasks")
}

#[test]
fn tasks_are_ordered_by_file_name_not_listing_order() {
    init_tracing();
    let (fs, layout) = mock_build_root();
    // Inserted (and therefore listed) in reverse order.
    fs.add_file(tasks_dir().join("2.yml"), task_file_yaml(&["bar"]));
    fs.add_file(tasks_dir().join("1.yml"), task_file_yaml(&["foo"]));

    let graph = generate(&fs, &layout).unwrap();

    let names: Vec<&str> = graph.task_names().collect();
    assert_eq!(names, vec!["foo", "bar"]);
}

#[test]
fn tasks_keep_their_order_within_a_file() {
    let (fs, layout) = mock_build_root();
    fs.add_file(tasks_dir().join("a.yml"), task_file_yaml(&["zeta", "alpha", "mid"]));

    let tasks = collect_tasks(&fs, &layout).unwrap();
    let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn output_document_has_the_generate_tasks_shape() {
    let (fs, layout) = mock_build_root();
    fs.add_file(tasks_dir().join("1.yml"), task_file_yaml(&["foo"]));

    generate(&fs, &layout).unwrap();

    let written = fs.read_to_string(&layout.task_graph_file()).unwrap();
    assert_eq!(
        written,
        r#"{"tasks":[{"name":"foo","commands":[{"command":"shell.exec","params":{"working_dir":"src","shell":"bash","script":"./eb 'foo'"}}]}]}"#
    );

    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["tasks"][0]["commands"].as_array().unwrap().len(), 1);
}

#[test]
fn missing_tasks_dir_yields_empty_document() {
    let (fs, layout) = mock_build_root();

    let graph = generate(&fs, &layout).unwrap();

    assert!(graph.tasks.is_empty());
    let written = fs.read_to_string(&layout.task_graph_file()).unwrap();
    assert_eq!(written, r#"{"tasks":[]}"#);
}

#[test]
fn tasks_path_that_is_a_file_is_rejected() {
    let (fs, layout) = mock_build_root();
    fs.add_file(tasks_dir(), "not a dir");

    let err = generate(&fs, &layout).unwrap_err();
    assert!(matches!(err, EbError::TasksNotADirectory(ref p) if *p == tasks_dir()));
}

#[test]
fn all_bad_file_names_are_reported() {
    let (fs, layout) = mock_build_root();
    fs.add_file(tasks_dir().join("ok.yml"), task_file_yaml(&["foo"]));
    fs.add_file(tasks_dir().join("notes.txt"), "");
    fs.add_file(tasks_dir().join("a.yml.bak"), "");

    match generate(&fs, &layout) {
        Err(EbError::InvalidTaskFileNames(names)) => {
            assert_eq!(names, vec!["a.yml.bak".to_string(), "notes.txt".to_string()]);
        }
        other => panic!("expected InvalidTaskFileNames, got {:?}", other),
    }
    assert!(!fs.exists(&layout.task_graph_file()));
}

#[test]
fn file_name_pattern_requires_yml_suffix() {
    assert!(is_task_file_name("1.yml"));
    assert!(is_task_file_name("compile-tasks.yml"));
    assert!(!is_task_file_name(".yml"));
    assert!(!is_task_file_name("tasks.yml.orig"));
    assert!(!is_task_file_name("yml"));
    assert!(!is_task_file_name("tasks.yaml"));
}

#[test]
fn wrong_schema_version_aborts_without_output() {
    let (fs, layout) = mock_build_root();
    fs.add_file(tasks_dir().join("1.yml"), task_file_yaml(&["foo"]));
    fs.add_file(
        tasks_dir().join("2.yml"),
        "SchemaVersion: 2019-06-01\nTasks:\n- Name: bar\n",
    );

    match generate(&fs, &layout) {
        Err(EbError::InvalidTaskFile { file, violations }) => {
            assert_eq!(file, "2.yml");
            assert_eq!(
                violations,
                vec![SchemaViolation::InvalidSchemaVersion {
                    found: "2019-06-01".to_string()
                }]
            );
        }
        other => panic!("expected InvalidTaskFile, got {:?}", other),
    }
    assert!(!fs.exists(&layout.task_graph_file()));
}

#[test]
fn failed_generation_leaves_previous_output_untouched() {
    let (fs, layout) = mock_build_root();
    fs.add_file(layout.task_graph_file(), r#"{"tasks":[]}"#);
    fs.add_file(tasks_dir().join("1.yml"), "Tasks:\n- Name: foo\n");

    let err = generate(&fs, &layout).unwrap_err();
    assert!(err.to_string().contains("missing SchemaVersion"));
    assert_eq!(
        fs.read_to_string(&layout.task_graph_file()).unwrap(),
        r#"{"tasks":[]}"#
    );
}

#[test]
fn every_violation_in_a_file_is_reported() {
    let (fs, layout) = mock_build_root();
    fs.add_file(
        tasks_dir().join("1.yml"),
        "SchemaVersion: 2021-01-01\nTasks:\n- Name: foo\n- Other: x\n- Name: \"\"\n",
    );

    match generate(&fs, &layout) {
        Err(EbError::InvalidTaskFile { file, violations }) => {
            assert_eq!(file, "1.yml");
            assert_eq!(violations.len(), 3);
            assert!(matches!(violations[0], SchemaViolation::InvalidSchemaVersion { .. }));
            assert!(matches!(
                violations[1],
                SchemaViolation::TaskMissingName { index: 1, ref entry } if entry.contains("Other")
            ));
            assert!(matches!(violations[2], SchemaViolation::TaskMissingName { index: 2, .. }));
        }
        other => panic!("expected InvalidTaskFile, got {:?}", other),
    }
}

#[test]
fn task_without_name_is_identified() {
    let (fs, layout) = mock_build_root();
    fs.add_file(
        tasks_dir().join("1.yml"),
        "SchemaVersion: 2020-01-01\nTasks:\n- Name: foo\n- Description: no name here\n",
    );

    let err = generate(&fs, &layout).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("1.yml"), "{msg}");
    assert!(msg.contains("task #1 missing Name"), "{msg}");
    assert!(msg.contains("no name here"), "{msg}");
}

#[test]
fn empty_task_file_reports_missing_fields() {
    let (fs, layout) = mock_build_root();
    fs.add_file(tasks_dir().join("1.yml"), "");

    match generate(&fs, &layout) {
        Err(EbError::InvalidTaskFile { violations, .. }) => {
            assert_eq!(
                violations,
                vec![SchemaViolation::MissingSchemaVersion, SchemaViolation::MissingTasks]
            );
        }
        other => panic!("expected InvalidTaskFile, got {:?}", other),
    }
}

#[test]
fn task_names_are_shell_quoted() {
    assert_eq!(shell_quote("foo"), "'foo'");
    assert_eq!(shell_quote("it's"), r"'it'\''s'");

    let task = GeneratedTask::for_name("with space");
    assert_eq!(task.commands[0].params.script, "./eb 'with space'");
    assert_eq!(task.commands[0].params.working_dir, "src");
    assert_eq!(task.commands[0].params.shell, "bash");
    assert_eq!(task.commands[0].command, "shell.exec");
}

#[test]
fn regeneration_is_byte_identical_on_disk() {
    let root = BuildRootBuilder::new()
        .with_task_file("1.yml", &task_file_yaml(&["foo"]))
        .with_task_file("2.yml", &task_file_yaml(&["bar", "baz"]))
        .build();
    let fs = RealFileSystem;

    generate(&fs, &root.layout).unwrap();
    let first = std::fs::read(root.layout.task_graph_file()).unwrap();
    generate(&fs, &root.layout).unwrap();
    let second = std::fs::read(root.layout.task_graph_file()).unwrap();

    assert_eq!(first, second);
    let value: serde_json::Value = serde_json::from_slice(&first).unwrap();
    let names: Vec<&str> = value["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["foo", "bar", "baz"]);
}

#[test]
fn tasks_that_are_not_a_list_are_reported_with_other_violations() {
    let (fs, layout) = mock_build_root();
    fs.add_file(tasks_dir().join("7.yml"), "SchemaVersion: 2019-01-01\nTasks: foo\n");

    match generate(&fs, &layout) {
        Err(EbError::InvalidTaskFile { file, violations }) => {
            assert_eq!(file, "7.yml");
            assert_eq!(
                violations,
                vec![
                    SchemaViolation::InvalidSchemaVersion {
                        found: "2019-01-01".to_string()
                    },
                    SchemaViolation::TasksNotAList {
                        found: "a string".to_string()
                    },
                ]
            );
        }
        other => panic!("expected InvalidTaskFile, got {:?}", other),
    }
    assert!(!fs.exists(&layout.task_graph_file()));
}

#[test]
fn top_level_list_is_rejected_with_file_name() {
    let (fs, layout) = mock_build_root();
    fs.add_file(tasks_dir().join("8.yml"), "- Name: foo\n");

    let err = generate(&fs, &layout).unwrap_err();
    match &err {
        EbError::InvalidTaskFile { file, violations } => {
            assert_eq!(file, "8.yml");
            assert_eq!(
                violations,
                &vec![SchemaViolation::NotAMapping {
                    found: "a sequence".to_string()
                }]
            );
        }
        other => panic!("expected InvalidTaskFile, got {:?}", other),
    }
    assert!(err.to_string().contains("8.yml"));
    assert!(!fs.exists(&layout.task_graph_file()));
}

#[test]
fn broken_yaml_names_the_file() {
    let (fs, layout) = mock_build_root();
    fs.add_file(tasks_dir().join("1.yml"), task_file_yaml(&["foo"]));
    fs.add_file(tasks_dir().join("9.yml"), "SchemaVersion: [\n");

    let err = generate(&fs, &layout).unwrap_err();
    match &err {
        EbError::TaskFileParse { file, .. } => assert_eq!(file, "9.yml"),
        other => panic!("expected TaskFileParse, got {:?}", other),
    }
    assert!(err.to_string().contains("9.yml"));
    assert!(!fs.exists(&layout.task_graph_file()));
}

// tests/real_process.rs
#![cfg(unix)]

mod common;

use std::error::Error;
use std::fs;

use clap::Parser;

use eb::cli::CliArgs;
use eb::errors::EbError;
use eb::exec::RealProcessRunner;
use eb::fs::RealFileSystem;
use eb::run_with;
use eb_test_utils::builders::BuildRootBuilder;
use eb_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

const BUILD_SH: &str = r#"#!/bin/sh
printf '%s\n' "$EB_X_revision" > out.txt
pwd >> out.txt
printf '%s\n' "${HOME:-unset}" >> out.txt
mkdir -p build/Tasks
printf 'SchemaVersion: 2020-01-01\nTasks:\n- Name: after\n' > build/Tasks/1.yml
"#;

const AFTER_SH: &str = "#!/bin/sh\nprintf 'after ran\\n' > after.txt\n";

#[tokio::test]
async fn scripts_run_in_build_root_with_expanded_env() -> TestResult {
    init_tracing();

    let root = BuildRootBuilder::new()
        .with_expansions("revision: abc123\n")
        .with_script("build.sh", BUILD_SH)
        .with_script("after.sh", AFTER_SH)
        .build();

    let mut env = root.env();
    env.insert("HOME".into(), "/home/builder".into());

    let args = CliArgs::try_parse_from(["eb", "build"])?;
    let summary = common::with_timeout(run_with(
        &RealFileSystem,
        RealProcessRunner::new(),
        args,
        env,
    ))
    .await?;

    assert_eq!(summary.dispatched, vec!["build", "after"]);

    let out = fs::read_to_string(root.path().join("out.txt"))?;
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "abc123");
    assert_eq!(fs::canonicalize(lines[1])?, fs::canonicalize(root.path())?);
    assert_eq!(lines[2], "unset");

    assert_eq!(fs::read_to_string(root.path().join("after.txt"))?, "after ran\n");
    assert!(root.layout.task_graph_file().is_file());
    Ok(())
}

#[tokio::test]
async fn failing_script_exit_code_is_reported() -> TestResult {
    let root = BuildRootBuilder::new()
        .with_script("fail.sh", "#!/bin/sh\nexit 4\n")
        .build();

    let args = CliArgs::try_parse_from(["eb", "fail"])?;
    let err = common::with_timeout(run_with(
        &RealFileSystem,
        RealProcessRunner::new(),
        args,
        root.env(),
    ))
    .await
    .unwrap_err();

    assert!(matches!(err, EbError::CommandFailed { ref command, code: Some(4) } if command == "fail"));
    Ok(())
}

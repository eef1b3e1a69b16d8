// src/config/validate.rs

use serde_yaml::Value;

use crate::config::model::{
    scalar_text, value_kind, RawTaskFile, TaskDeclaration, TaskFile, SCHEMA_VERSION,
};
use crate::errors::{EbError, Result, SchemaViolation};

/// Turn a raw task file into a [`TaskFile`].
///
/// Collects every violation in the file; if there is at least one, the
/// whole file is rejected with [`EbError::InvalidTaskFile`].
pub fn validate_task_file(file_name: &str, raw: RawTaskFile) -> Result<TaskFile> {
    let mut violations = Vec::new();

    check_schema_version(raw.schema_version.as_ref(), &mut violations);
    let tasks = collect_tasks(raw.tasks, &mut violations);

    if !violations.is_empty() {
        return Err(EbError::InvalidTaskFile {
            file: file_name.to_string(),
            violations,
        });
    }

    Ok(TaskFile {
        file_name: file_name.to_string(),
        tasks,
    })
}

fn check_schema_version(version: Option<&Value>, violations: &mut Vec<SchemaViolation>) {
    match version {
        None | Some(Value::Null) => violations.push(SchemaViolation::MissingSchemaVersion),
        Some(value) => {
            let found = scalar_text(value).unwrap_or_else(|| render_inline(value));
            if found != SCHEMA_VERSION {
                violations.push(SchemaViolation::InvalidSchemaVersion { found });
            }
        }
    }
}

fn collect_tasks(
    tasks: Option<Value>,
    violations: &mut Vec<SchemaViolation>,
) -> Vec<TaskDeclaration> {
    let tasks = match tasks {
        None | Some(Value::Null) => {
            violations.push(SchemaViolation::MissingTasks);
            return Vec::new();
        }
        Some(Value::Sequence(tasks)) => tasks,
        Some(other) => {
            violations.push(SchemaViolation::TasksNotAList {
                found: value_kind(&other).to_string(),
            });
            return Vec::new();
        }
    };

    let mut out = Vec::with_capacity(tasks.len());
    for (index, entry) in tasks.iter().enumerate() {
        match task_name(entry) {
            Some(name) => out.push(TaskDeclaration { name }),
            None => violations.push(SchemaViolation::TaskMissingName {
                index,
                entry: render_inline(entry),
            }),
        }
    }
    out
}

fn task_name(entry: &Value) -> Option<String> {
    entry
        .get("Name")
        .and_then(scalar_text)
        .filter(|name| !name.trim().is_empty())
}

/// Single-line rendering of an arbitrary YAML value for error messages.
fn render_inline(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}

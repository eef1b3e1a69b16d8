// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_yaml::Value;

/// The only `SchemaVersion` a task file may declare.
pub const SCHEMA_VERSION: &str = "2020-01-01";

/// Key/value pairs from `build/Expansions.yml`, already rendered to strings.
///
/// Loaded once per process and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansions {
    values: BTreeMap<String, String>,
}

impl Expansions {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Expansions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A task file exactly as read from YAML, before validation.
///
/// ```yaml
/// SchemaVersion: 2020-01-01
/// Tasks:
/// - Name: foo
/// ```
///
/// Fields are kept loose (`Value`) so that validation can report every
/// problem in the file instead of stopping at the first serde error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTaskFile {
    #[serde(rename = "SchemaVersion", default)]
    pub schema_version: Option<Value>,

    #[serde(rename = "Tasks", default)]
    pub tasks: Option<Value>,
}

/// A validated task file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFile {
    /// File name within `build/Tasks`, used in diagnostics.
    pub file_name: String,
    pub tasks: Vec<TaskDeclaration>,
}

/// One declared task. `name` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDeclaration {
    pub name: String,
}

/// Text form of a YAML scalar. `None` for null, sequences and mappings.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Short description of a value's YAML type, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

// src/config/loader.rs

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::config::model::{scalar_text, value_kind, Expansions, RawTaskFile, TaskFile};
use crate::config::validate::validate_task_file;
use crate::errors::{EbError, Result, SchemaViolation};
use crate::fs::FileSystem;
use crate::layout::BuildLayout;

/// Load `build/Expansions.yml` under the given build root.
pub fn load_expansions(fs: &dyn FileSystem, layout: &BuildLayout) -> Result<Expansions> {
    let path = layout.expansions_file();
    if !fs.is_file(&path) {
        return Err(EbError::ExpansionsNotFound(path));
    }
    let contents = fs.read_to_string(&path)?;
    parse_expansions(&path, &contents)
}

/// Parse expansions YAML.
///
/// The document must be a mapping (an empty document counts as an empty
/// mapping). Scalar values keep their text form, `null` becomes the empty
/// string, and sequences or mappings are rendered as compact JSON.
pub fn parse_expansions(path: &Path, contents: &str) -> Result<Expansions> {
    let doc: Value = serde_yaml::from_str(contents)?;
    let mapping = match doc {
        Value::Null => Mapping::new(),
        Value::Mapping(m) => m,
        other => {
            return Err(EbError::InvalidExpansions {
                path: path.to_path_buf(),
                reason: format!("expected a mapping at the top level, got {}", value_kind(&other)),
            });
        }
    };

    let mut values = Vec::with_capacity(mapping.len());
    for (key, value) in mapping.iter() {
        let key = scalar_text(key).ok_or_else(|| EbError::InvalidExpansions {
            path: path.to_path_buf(),
            reason: format!("keys must be scalars, got {}", value_kind(key)),
        })?;
        let value = match value {
            Value::Null => String::new(),
            Value::Sequence(_) | Value::Mapping(_) => serde_json::to_string(value)?,
            scalar => scalar_text(scalar).unwrap_or_default(),
        };
        values.push((key, value));
    }

    Ok(values.into_iter().collect())
}

/// Read and validate one task file.
///
/// Every failure names the file: YAML syntax errors come back as
/// [`EbError::TaskFileParse`], shape problems as [`EbError::InvalidTaskFile`].
pub fn load_task_file(fs: &dyn FileSystem, path: &Path) -> Result<TaskFile> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let contents = fs.read_to_string(path)?;
    let parse_error = |source| EbError::TaskFileParse {
        file: file_name.clone(),
        source,
    };

    let doc: Value = serde_yaml::from_str(&contents).map_err(parse_error)?;
    let raw: RawTaskFile = match doc {
        Value::Null => RawTaskFile::default(),
        mapping @ Value::Mapping(_) => serde_yaml::from_value(mapping).map_err(parse_error)?,
        other => {
            return Err(EbError::InvalidTaskFile {
                file: file_name,
                violations: vec![SchemaViolation::NotAMapping {
                    found: value_kind(&other).to_string(),
                }],
            });
        }
    };

    validate_task_file(&file_name, raw)
}

// src/env.rs

//! Subprocess environment construction.
//!
//! All functions take the environment as an explicit map. Only the binaries'
//! entry points call [`snapshot_process_env`]; nothing below them reads the
//! ambient process environment.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::Expansions;
use crate::errors::{EbError, Result};

/// Environment handed to a subprocess.
pub type Environment = BTreeMap<String, String>;

/// Prefix for variables that survive [`trim_env`].
pub const PASSTHROUGH_PREFIX: &str = "EB_";

/// Prefix added to every expansion key.
pub const EXPANSION_PREFIX: &str = "EB_X_";

/// Names the build root.
pub const REPO_ROOT_VAR: &str = "EB_REPO_ROOT";

/// Snapshot of the current process environment.
///
/// Only called from the binaries' `main`. Variables whose name or value is
/// not valid UTF-8 are skipped.
pub fn snapshot_process_env() -> Environment {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

/// Keep only `EB_*` variables and `PATH`.
pub fn trim_env<I, K, V>(vars: I) -> Environment
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    vars.into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .filter(|(k, _)| k.starts_with(PASSTHROUGH_PREFIX) || k == "PATH")
        .collect()
}

/// Base environment plus every expansion under `EB_X_<key>`.
///
/// The base map is left untouched. Because of the prefix, an expansion can
/// never shadow a pass-through variable such as `EB_REPO_ROOT`; it only
/// replaces an inherited `EB_X_*` variable of the same name.
pub fn build_subprocess_env(base: &Environment, expansions: &Expansions) -> Environment {
    let mut out = base.clone();
    for (key, value) in expansions.iter() {
        out.insert(format!("{EXPANSION_PREFIX}{key}"), value.to_string());
    }
    out
}

/// Resolve the build root from `EB_REPO_ROOT`.
pub fn repo_root(env: &Environment) -> Result<PathBuf> {
    env.get(REPO_ROOT_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| EbError::MissingEnvVar(REPO_ROOT_VAR.to_string()))
}

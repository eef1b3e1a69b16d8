// src/config/mod.rs

//! Input files read by `eb`.
//!
//! - `model.rs`: expansions and task-file data model.
//! - `loader.rs`: reading YAML through the [`FileSystem`](crate::fs::FileSystem).
//! - `validate.rs`: turning raw task files into validated ones.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_expansions, load_task_file, parse_expansions};
pub use model::{Expansions, RawTaskFile, TaskDeclaration, TaskFile, SCHEMA_VERSION};
pub use validate::validate_task_file;

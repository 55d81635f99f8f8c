//! Record loader: CSV text to a validated, linked [`Dataset`].
//!
//! ## Files
//! - `row.rs`: per-row field validation.
//! - `hierarchy.rs`: duplicate ids, manager resolution, root and cycle checks.
//!
//! The load is all-or-nothing: the first violation aborts it and no partial
//! dataset is returned.

mod hierarchy;
mod row;

use crate::error::LoadError;
use crate::model::Dataset;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Anything that can produce a dataset from a path.
pub trait EmployeeSource {
    fn load(&self, path: &Path) -> Result<Dataset, LoadError>;
}

/// Reads employees from a comma-separated file with a header line.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvEmployeeSource;

impl EmployeeSource for CsvEmployeeSource {
    fn load(&self, path: &Path) -> Result<Dataset, LoadError> {
        load_employees(path)
    }
}

/// Read and validate an employee CSV file.
pub fn load_employees(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading employee file");

    let text = fs::read_to_string(path).map_err(|source| {
        error!(path = %path.display(), error = %source, "error reading CSV file");
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let dataset = parse_employees(&text)?;
    info!(path = %path.display(), records = dataset.len(), "employee data loaded");
    Ok(dataset)
}

/// Validate employee CSV text that is already in memory.
pub fn parse_employees(text: &str) -> Result<Dataset, LoadError> {
    let result = row::parse_rows(text)
        .and_then(|rows| hierarchy::link(rows).map_err(LoadError::from));

    if let Err(err) = &result {
        warn!(code = err.code(), "rejected employee data: {err}");
    }
    result
}

//! Error types for employee loading and policy configuration.
//!
//! Every loader failure aborts the whole load. Failures fall into three
//! kinds: the source could not be read, the shape of a row is wrong, or the
//! values are individually or relationally invalid.

use org_types::EmployeeId;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Structure,
    Data,
}

/// Main error type for the record loader
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read employee file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSV structure: {0}")]
    Structure(#[from] StructureError),

    #[error("Invalid CSV data: {0}")]
    Data(#[from] DataError),
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::Structure(_) => ErrorKind::Structure,
            Self::Data(_) => ErrorKind::Data,
        }
    }

    /// Stable error code for logs and JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "IO_ERROR",
            Self::Structure(e) => e.code(),
            Self::Data(e) => e.code(),
        }
    }
}

/// Errors in the shape of the input, independent of field values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("line {line}: expected 4 or 5 fields, found {found}")]
    FieldCount { line: u64, found: usize },

    #[error("line {line}: {message}")]
    Malformed { line: u64, message: String },
}

impl StructureError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::FieldCount { .. } => "FIELD_COUNT",
            Self::Malformed { .. } => "MALFORMED_ROW",
        }
    }
}

/// Which numeric column a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Id,
    Salary,
    ManagerId,
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Id => "id",
            Self::Salary => "salary",
            Self::ManagerId => "manager id",
        };
        f.write_str(name)
    }
}

/// Errors in field values or in the relations between rows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("line {line}: some fields are empty (first name = '{first_name}', last name = '{last_name}')")]
    EmptyName {
        line: u64,
        first_name: String,
        last_name: String,
    },

    #[error("line {line}: invalid name format (first name = '{first_name}', last name = '{last_name}')")]
    InvalidName {
        line: u64,
        first_name: String,
        last_name: String,
    },

    #[error("line {line}: {field} '{value}' is not an integer")]
    InvalidNumber {
        line: u64,
        field: NumericField,
        value: String,
    },

    #[error("line {line}: {field} {value} must not be negative")]
    NegativeValue {
        line: u64,
        field: NumericField,
        value: i64,
    },

    #[error("CSV file does not contain any employee data")]
    NoData,

    #[error("line {line}: duplicate employee id {id}")]
    DuplicateId { id: EmployeeId, line: u64 },

    #[error("employee {employee} has manager reference to non-existing employee {manager}")]
    UnknownManager { employee: EmployeeId, manager: i64 },

    #[error("no employee without a manager; the organization has no root")]
    MissingRoot,

    #[error("expected exactly one employee without a manager, found {}: {}", roots.len(), format_ids(roots))]
    MultipleRoots { roots: Vec<EmployeeId> },

    #[error("cyclic manager relationship: {}", format_cycle(path))]
    Cycle { path: Vec<EmployeeId> },
}

impl DataError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName { .. } => "EMPTY_NAME",
            Self::InvalidName { .. } => "INVALID_NAME",
            Self::InvalidNumber { .. } => "INVALID_NUMBER",
            Self::NegativeValue { .. } => "NEGATIVE_VALUE",
            Self::NoData => "NO_DATA",
            Self::DuplicateId { .. } => "DUPLICATE_ID",
            Self::UnknownManager { .. } => "UNKNOWN_MANAGER",
            Self::MissingRoot => "MISSING_ROOT",
            Self::MultipleRoots { .. } => "MULTIPLE_ROOTS",
            Self::Cycle { .. } => "CYCLE_DETECTED",
        }
    }
}

fn format_ids(ids: &[EmployeeId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_cycle(path: &[EmployeeId]) -> String {
    let mut parts: Vec<String> = path.iter().map(|id| id.to_string()).collect();
    if let Some(first) = path.first() {
        parts.push(first.to_string());
    }
    parts.join(" -> ")
}

/// Errors loading an analyzer policy file.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Cannot read policy file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse policy: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid policy: {0}")]
    Invalid(String),
}

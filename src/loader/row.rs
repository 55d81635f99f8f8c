//! Row-level parsing and validation.
//!
//! Checks run in a fixed order per row: field count, names, integer parsing
//! of id and salary, sign of id and salary, then the optional manager id.
//! The first failure aborts the load.

use crate::error::{DataError, LoadError, NumericField, StructureError};
use org_types::EmployeeId;
use regex::Regex;
use std::sync::LazyLock;

const ID_INDEX: usize = 0;
const FIRST_NAME_INDEX: usize = 1;
const LAST_NAME_INDEX: usize = 2;
const SALARY_INDEX: usize = 3;
const MANAGER_ID_INDEX: usize = 4;

const MIN_FIELDS: usize = 4;
const MAX_FIELDS: usize = 5;

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());

/// A validated row whose manager reference is not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawEmployee {
    pub line: u64,
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub salary: u32,
    /// Raw manager id; resolved against the full id set during linking
    pub manager: Option<i64>,
}

/// Lines taken up by the header.
const HEADER_LINES: u64 = 1;

/// Parse every row after the header line.
///
/// The first line is the header whatever it holds. Every later line is one
/// row: quotes are ordinary characters and a blank line is a one-field row.
pub(crate) fn parse_rows(text: &str) -> Result<Vec<RawEmployee>, LoadError> {
    let body = text.split_once('\n').map_or("", |(_, rest)| rest);
    let line_number = |index: usize| index as u64 + HEADER_LINES + 1;

    // The reader drops empty lines, so they are located here and each record
    // is matched with the next non-empty line.
    let first_blank = body.lines().position(str::is_empty).map(line_number);
    let mut row_lines = body
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.is_empty())
        .map(|(index, _)| line_number(index));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let line = row_lines.next().unwrap_or_default();
        if let Some(blank) = first_blank.filter(|&blank| blank < line) {
            return Err(blank_line(blank));
        }
        let record = result.map_err(|e| StructureError::Malformed {
            line,
            message: e.to_string(),
        })?;
        rows.push(parse_row(&record, line)?);
    }

    match first_blank {
        Some(blank) => Err(blank_line(blank)),
        None => Ok(rows),
    }
}

fn blank_line(line: u64) -> LoadError {
    StructureError::FieldCount { line, found: 1 }.into()
}

fn parse_row(record: &csv::StringRecord, line: u64) -> Result<RawEmployee, LoadError> {
    if !(MIN_FIELDS..=MAX_FIELDS).contains(&record.len()) {
        return Err(StructureError::FieldCount {
            line,
            found: record.len(),
        }
        .into());
    }

    let first_name = record[FIRST_NAME_INDEX].trim();
    let last_name = record[LAST_NAME_INDEX].trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err(DataError::EmptyName {
            line,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
        .into());
    }
    if !is_valid_name(first_name) || !is_valid_name(last_name) {
        return Err(DataError::InvalidName {
            line,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
        .into());
    }

    let id = parse_integer(&record[ID_INDEX], NumericField::Id, line)?;
    let salary = parse_integer(&record[SALARY_INDEX], NumericField::Salary, line)?;
    let id = non_negative(id, NumericField::Id, line)?;
    let salary = non_negative(salary, NumericField::Salary, line)?;

    // A blank fifth column is the same as no fifth column.
    let manager = match record.get(MANAGER_ID_INDEX).map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_integer(raw, NumericField::ManagerId, line)?),
        _ => None,
    };

    Ok(RawEmployee {
        line,
        id: EmployeeId::new(id),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        salary,
        manager,
    })
}

fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

fn parse_integer(raw: &str, field: NumericField, line: u64) -> Result<i64, DataError> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().map_err(|_| DataError::InvalidNumber {
        line,
        field,
        value: trimmed.to_string(),
    })
}

fn non_negative(value: i64, field: NumericField, line: u64) -> Result<u32, DataError> {
    if value < 0 {
        return Err(DataError::NegativeValue { line, field, value });
    }
    u32::try_from(value).map_err(|_| DataError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

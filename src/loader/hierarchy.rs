//! Management hierarchy linking.
//!
//! Runs only after every row has parsed. Resolves manager references against
//! the full id set, fills each manager's report list in row order, and checks
//! that the manager graph is a single tree:
//! 1. no duplicate ids
//! 2. every manager id resolves
//! 3. exactly one root
//! 4. no cycles (ancestor walk with path tracking)

use super::row::RawEmployee;
use crate::error::DataError;
use crate::model::{Dataset, EmployeeRecord};
use org_types::EmployeeId;
use std::collections::HashMap;
use tracing::debug;

/// Turn parsed rows into a linked dataset.
pub(crate) fn link(rows: Vec<RawEmployee>) -> Result<Dataset, DataError> {
    if rows.is_empty() {
        return Err(DataError::NoData);
    }

    let index = index_unique_ids(&rows)?;
    let managers = resolve_managers(&rows, &index)?;
    let root = single_root(&rows, &managers)?;
    check_acyclic(&rows, &managers)?;

    let ids: Vec<EmployeeId> = rows.iter().map(|row| row.id).collect();
    let records = rows
        .into_iter()
        .zip(&managers)
        .map(|(row, manager)| {
            EmployeeRecord::new(
                row.id,
                row.first_name,
                row.last_name,
                row.salary,
                manager.map(|slot| ids[slot]),
            )
        })
        .collect::<Vec<_>>();

    let mut dataset = Dataset::from_records(records);
    for (slot, manager) in managers.iter().enumerate() {
        if let Some(manager_slot) = manager {
            dataset.push_report(*manager_slot, slot);
        }
    }
    dataset.set_root(root);

    debug!(records = dataset.len(), "management hierarchy established");
    Ok(dataset)
}

fn index_unique_ids(rows: &[RawEmployee]) -> Result<HashMap<EmployeeId, usize>, DataError> {
    let mut index = HashMap::with_capacity(rows.len());
    for (slot, row) in rows.iter().enumerate() {
        if index.insert(row.id, slot).is_some() {
            return Err(DataError::DuplicateId {
                id: row.id,
                line: row.line,
            });
        }
    }
    Ok(index)
}

fn resolve_managers(
    rows: &[RawEmployee],
    index: &HashMap<EmployeeId, usize>,
) -> Result<Vec<Option<usize>>, DataError> {
    rows.iter()
        .map(|row| {
            let Some(raw) = row.manager else {
                return Ok(None);
            };
            u32::try_from(raw)
                .ok()
                .and_then(|id| index.get(&EmployeeId::new(id)).copied())
                .map(Some)
                .ok_or(DataError::UnknownManager {
                    employee: row.id,
                    manager: raw,
                })
        })
        .collect()
}

fn single_root(rows: &[RawEmployee], managers: &[Option<usize>]) -> Result<usize, DataError> {
    let roots: Vec<usize> = managers
        .iter()
        .enumerate()
        .filter_map(|(slot, manager)| manager.is_none().then_some(slot))
        .collect();

    match roots.as_slice() {
        [] => Err(DataError::MissingRoot),
        [root] => Ok(*root),
        _ => Err(DataError::MultipleRoots {
            roots: roots.iter().map(|&slot| rows[slot].id).collect(),
        }),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InPath,
    Done,
}

/// Walk manager references upward from every employee. Each slot is entered
/// at most once, so the whole check is linear in the dataset size.
fn check_acyclic(rows: &[RawEmployee], managers: &[Option<usize>]) -> Result<(), DataError> {
    let mut state = vec![Visit::Unvisited; rows.len()];
    let mut path: Vec<usize> = Vec::new();

    for start in 0..rows.len() {
        path.clear();
        let mut current = Some(start);

        while let Some(slot) = current {
            match state[slot] {
                Visit::Done => break,
                Visit::InPath => {
                    let pos = path.iter().position(|&s| s == slot).unwrap_or(0);
                    return Err(DataError::Cycle {
                        path: path[pos..].iter().map(|&s| rows[s].id).collect(),
                    });
                }
                Visit::Unvisited => {
                    state[slot] = Visit::InPath;
                    path.push(slot);
                    current = managers[slot];
                }
            }
        }

        for &slot in &path {
            state[slot] = Visit::Done;
        }
    }
    Ok(())
}

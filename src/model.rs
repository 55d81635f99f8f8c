//! Employee records and the linked dataset handed from loader to analyzer.
//!
//! The dataset is an arena: records are stored in input row order and refer
//! to their direct reports by slot. Fields are private and only the loader
//! can construct or link records, so a dataset is read-only once returned.

use org_types::{EmployeeId, EmployeeRef};
use std::collections::HashMap;

/// One employee row after validation and hierarchy linking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    id: EmployeeId,
    first_name: String,
    last_name: String,
    salary: u32,
    manager_id: Option<EmployeeId>,
    reports: Vec<usize>,
}

impl EmployeeRecord {
    pub(crate) fn new(
        id: EmployeeId,
        first_name: String,
        last_name: String,
        salary: u32,
        manager_id: Option<EmployeeId>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            salary,
            manager_id,
            reports: Vec::new(),
        }
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn salary(&self) -> u32 {
        self.salary
    }

    pub fn manager_id(&self) -> Option<EmployeeId> {
        self.manager_id
    }

    pub fn is_root(&self) -> bool {
        self.manager_id.is_none()
    }

    pub fn has_reports(&self) -> bool {
        !self.reports.is_empty()
    }

    pub fn report_count(&self) -> usize {
        self.reports.len()
    }

    /// Identity used in findings.
    pub fn identity(&self) -> EmployeeRef {
        EmployeeRef::new(self.id, self.first_name.clone(), self.last_name.clone())
    }

    pub(crate) fn report_slots(&self) -> &[usize] {
        &self.reports
    }
}

/// Fully linked, validated set of employees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<EmployeeRecord>,
    index: HashMap<EmployeeId, usize>,
    root: Option<usize>,
}

impl Dataset {
    /// Build the arena from records in row order. Ids must already be unique.
    pub(crate) fn from_records(records: Vec<EmployeeRecord>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(slot, record)| (record.id, slot))
            .collect();
        Self {
            records,
            index,
            root: None,
        }
    }

    pub(crate) fn slot_of(&self, id: EmployeeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub(crate) fn push_report(&mut self, manager_slot: usize, report_slot: usize) {
        self.records[manager_slot].reports.push(report_slot);
    }

    pub(crate) fn set_root(&mut self, slot: usize) {
        self.root = Some(slot);
    }

    pub(crate) fn record_at(&self, slot: usize) -> &EmployeeRecord {
        &self.records[slot]
    }

    pub(crate) fn root_slot(&self) -> Option<usize> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: EmployeeId) -> Option<&EmployeeRecord> {
        self.slot_of(id).map(|slot| &self.records[slot])
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.index.contains_key(&id)
    }

    /// The unique employee without a manager, if any records exist.
    pub fn root(&self) -> Option<&EmployeeRecord> {
        self.root.map(|slot| &self.records[slot])
    }

    /// All records in input row order.
    pub fn records(&self) -> impl Iterator<Item = &EmployeeRecord> {
        self.records.iter()
    }

    /// Direct reports of the employee `id`, in input row order. Empty when
    /// `id` is not in this dataset.
    pub fn reports_of(&self, id: EmployeeId) -> impl Iterator<Item = &EmployeeRecord> + '_ {
        self.get(id)
            .map(EmployeeRecord::report_slots)
            .unwrap_or_default()
            .iter()
            .map(move |&slot| &self.records[slot])
    }
}

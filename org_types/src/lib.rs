//! Organization Types - Level 1 Foundation Types
//!
//! Pure data structures shared by the record loader, the hierarchy analyzer
//! and the report presenters.
//!
//! ## Architecture Level: LEVEL 1 (Foundation)
//!
//! This crate depends on nothing else in the workspace. The loader and the
//! analyzer both depend on it, so the `Finding` type that crosses from the
//! analyzer to the presenters lives here rather than in either of them.
//!
//! ## Contents
//!
//! - `EmployeeId` - the identifier newtype
//! - `EmployeeRef` - id + name pair carried by findings
//! - `Finding` / `BandDirection` - analyzer output
//!
//! ## Rules
//!
//! 1. **NO BUSINESS LOGIC** - only data structures, constructors and accessors
//! 2. **SERIALIZABLE** - every public type supports serde
//! 3. **NO WORKSPACE DEPENDENCIES**

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Employee identifier. Non-negative and unique within a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(u32);

impl EmployeeId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for EmployeeId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an employee as it appears in a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
}

impl EmployeeRef {
    pub fn new(id: EmployeeId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ============================================================================
// FINDINGS
// ============================================================================

/// Which side of the expected salary band a manager falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandDirection {
    /// Salary strictly below the lower bound
    Below,
    /// Salary strictly above the upper bound
    Above,
}

/// A single compliance violation found while walking the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Manager paid outside the band derived from their direct reports
    SalaryOutOfBand {
        employee: EmployeeRef,
        direction: BandDirection,
        /// Distance from the violated bound
        amount: f64,
    },

    /// Direct reports of a manager that sits deeper than the depth threshold
    DepthExceeded {
        /// Manager depth minus the threshold
        overshoot: u32,
        /// Every direct report of that manager, in input row order
        employees: Vec<EmployeeRef>,
    },
}

impl Finding {
    pub fn is_salary(&self) -> bool {
        matches!(self, Finding::SalaryOutOfBand { .. })
    }

    pub fn is_depth(&self) -> bool {
        matches!(self, Finding::DepthExceeded { .. })
    }
}

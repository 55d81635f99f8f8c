//! Company Inspector - salary band and reporting depth checks over an
//! organization's staff list.
//!
//! # Pipeline
//!
//! ```text
//! CSV text ──► loader ──► Dataset ──► analyzer ──► Vec<Finding> ──► report
//!              (all-or-nothing)       (read-only walk)
//! ```
//!
//! - [`loader`] validates rows and links the management tree. Any violation
//!   aborts the load with a [`LoadError`].
//! - [`analyzer`] walks the tree once from the root and emits
//!   [`Finding`]s: managers paid outside `[1.2x, 1.5x]` the mean salary of
//!   their direct reports, and direct reports of managers that sit more than
//!   four levels below the root.
//! - [`report`] renders findings as text lines or JSON.
//! - [`inspector`] wires the three together for one run.
//!
//! # Example
//!
//! ```
//! use company_inspector::{analyze, parse_employees};
//!
//! let csv = "Id,firstName,lastName,salary,managerId\n\
//!            123,Joe,Doe,60000\n\
//!            124,Martin,Chekov,45000,123\n";
//! let dataset = parse_employees(csv).unwrap();
//! assert_eq!(dataset.len(), 2);
//! assert!(analyze(&dataset).is_empty());
//! ```

pub mod analyzer;
pub mod error;
pub mod inspector;
pub mod loader;
pub mod model;
pub mod policy;
pub mod report;

// Re-exports
pub use analyzer::{analyze, AnalysisSummary, FindingSink, HierarchyAnalyzer, SalaryBand};
pub use error::{DataError, ErrorKind, LoadError, NumericField, PolicyError, StructureError};
pub use inspector::{Inspector, RunOutcome};
pub use loader::{load_employees, parse_employees, CsvEmployeeSource, EmployeeSource};
pub use model::{Dataset, EmployeeRecord};
pub use org_types::{BandDirection, EmployeeId, EmployeeRef, Finding};
pub use policy::AnalyzerPolicy;
pub use report::{JsonPresenter, Presenter, ReportFormat, TextPresenter};

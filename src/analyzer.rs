//! Hierarchy analyzer: one walk over a linked dataset producing findings.
//!
//! The walk is depth-first pre-order from the root, siblings in input row
//! order, driven by an explicit stack so deep hierarchies cannot exhaust the
//! call stack. At every manager with at least one direct report:
//! 1. the salary band check runs against the mean of the direct reports
//! 2. the reporting depth check flags all direct reports when the manager
//!    sits deeper than the threshold
//!
//! The analyzer never mutates the dataset and keeps no state between calls.

use crate::model::{Dataset, EmployeeRecord};
use crate::policy::AnalyzerPolicy;
use org_types::{BandDirection, Finding};
use tracing::{debug, info, warn};

/// Receives findings as the walk produces them.
pub trait FindingSink {
    fn accept(&mut self, finding: Finding);
}

impl FindingSink for Vec<Finding> {
    fn accept(&mut self, finding: Finding) {
        self.push(finding);
    }
}

/// Counters for one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub employees_visited: usize,
    pub managers_examined: usize,
    pub salary_findings: usize,
    pub depth_findings: usize,
}

impl AnalysisSummary {
    pub fn total_findings(&self) -> usize {
        self.salary_findings + self.depth_findings
    }
}

/// Expected salary range for a manager.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryBand {
    pub lower: f64,
    pub upper: f64,
}

impl SalaryBand {
    pub fn from_mean(mean: f64, policy: &AnalyzerPolicy) -> Self {
        Self {
            lower: policy.min_salary_ratio * mean,
            upper: policy.max_salary_ratio * mean,
        }
    }

    /// Side and distance of a salary outside the band. Values exactly on a
    /// bound are inside.
    pub fn classify(&self, salary: f64) -> Option<(BandDirection, f64)> {
        if salary < self.lower {
            Some((BandDirection::Below, self.lower - salary))
        } else if salary > self.upper {
            Some((BandDirection::Above, salary - self.upper))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HierarchyAnalyzer {
    policy: AnalyzerPolicy,
}

impl HierarchyAnalyzer {
    pub fn new(policy: AnalyzerPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AnalyzerPolicy {
        &self.policy
    }

    /// Collect every finding in traversal order.
    pub fn analyze(&self, dataset: &Dataset) -> Vec<Finding> {
        let mut findings = Vec::new();
        self.analyze_into(dataset, &mut findings);
        findings
    }

    /// Push findings into `sink` as the walk produces them.
    pub fn analyze_into(&self, dataset: &Dataset, sink: &mut dyn FindingSink) -> AnalysisSummary {
        let mut summary = AnalysisSummary::default();
        let Some(root) = dataset.root_slot() else {
            debug!("dataset has no root; nothing to analyze");
            return summary;
        };

        let mut stack: Vec<(usize, u32)> = vec![(root, 0)];
        while let Some((slot, depth)) = stack.pop() {
            summary.employees_visited += 1;
            let manager = dataset.record_at(slot);
            if !manager.has_reports() {
                continue;
            }
            summary.managers_examined += 1;

            if let Some(finding) = self.check_salary(dataset, manager) {
                summary.salary_findings += 1;
                sink.accept(finding);
            }
            if let Some(finding) = self.check_depth(dataset, manager, depth) {
                summary.depth_findings += 1;
                sink.accept(finding);
            }

            // Reversed so the first report in row order is popped first.
            for &report in manager.report_slots().iter().rev() {
                stack.push((report, depth + 1));
            }
        }

        info!(
            employees = summary.employees_visited,
            managers = summary.managers_examined,
            salary_findings = summary.salary_findings,
            depth_findings = summary.depth_findings,
            "hierarchy analysis complete"
        );
        summary
    }

    fn check_salary(&self, dataset: &Dataset, manager: &EmployeeRecord) -> Option<Finding> {
        let mean = mean_report_salary(dataset, manager)?;
        let band = SalaryBand::from_mean(mean, &self.policy);
        let (direction, amount) = band.classify(f64::from(manager.salary()))?;

        warn!(
            employee_id = %manager.id(),
            ?direction,
            amount,
            "manager salary outside expected band"
        );
        Some(Finding::SalaryOutOfBand {
            employee: manager.identity(),
            direction,
            amount,
        })
    }

    fn check_depth(&self, dataset: &Dataset, manager: &EmployeeRecord, depth: u32) -> Option<Finding> {
        if depth <= self.policy.max_reporting_depth {
            return None;
        }
        let overshoot = depth - self.policy.max_reporting_depth;
        let employees: Vec<_> = dataset
            .reports_of(manager.id())
            .map(EmployeeRecord::identity)
            .collect();

        warn!(
            manager_id = %manager.id(),
            overshoot,
            employees = employees.len(),
            "reporting line too long"
        );
        Some(Finding::DepthExceeded {
            overshoot,
            employees,
        })
    }
}

/// Mean salary of the direct reports; `None` for a leaf.
fn mean_report_salary(dataset: &Dataset, manager: &EmployeeRecord) -> Option<f64> {
    let count = manager.report_count();
    if count == 0 {
        return None;
    }
    let total: u64 = dataset
        .reports_of(manager.id())
        .map(|r| u64::from(r.salary()))
        .sum();
    Some(total as f64 / count as f64)
}

/// Analyze with the default policy.
pub fn analyze(dataset: &Dataset) -> Vec<Finding> {
    HierarchyAnalyzer::default().analyze(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_employees;
    use org_types::EmployeeId;

    const HEADER: &str = "Id,firstName,lastName,salary,managerId\n";

    fn dataset(body: &str) -> Dataset {
        parse_employees(&format!("{HEADER}{body}")).unwrap()
    }

    #[test]
    fn test_band_bounds_are_inclusive() {
        let band = SalaryBand::from_mean(1000.0, &AnalyzerPolicy::default());
        assert_eq!(band.classify(1200.0), None);
        assert_eq!(band.classify(1500.0), None);
        assert_eq!(band.classify(1199.0), Some((BandDirection::Below, 1.0)));
        assert_eq!(band.classify(1501.0), Some((BandDirection::Above, 1.0)));
    }

    #[test]
    fn test_empty_dataset_yields_nothing() {
        let summary = HierarchyAnalyzer::default().analyze_into(&Dataset::default(), &mut Vec::<Finding>::new());
        assert_eq!(summary, AnalysisSummary::default());
    }

    #[test]
    fn test_single_employee_yields_nothing() {
        assert!(analyze(&dataset("1,John,Doe,5000\n")).is_empty());
    }

    #[test]
    fn test_manager_within_band() {
        let ds = dataset("123,Joe,Doe,60000\n124,Martin,Chekov,45000,123\n");
        assert!(analyze(&ds).is_empty());
    }

    #[test]
    fn test_manager_below_band() {
        let ds = dataset(
            "1,Joe,Doe,60000\n\
             124,Martin,Chekov,45000,1\n\
             300,Alice,Hasacat,50000,124\n\
             309,John,Smith,100000,124\n",
        );
        let findings = analyze(&ds);
        assert_eq!(findings.len(), 1);
        match &findings[0] {
            Finding::SalaryOutOfBand {
                employee,
                direction,
                amount,
            } => {
                assert_eq!(employee.id, EmployeeId::new(124));
                assert_eq!(*direction, BandDirection::Below);
                assert_eq!(*amount, 45000.0);
            }
            other => panic!("unexpected finding {other:?}"),
        }
    }

    #[test]
    fn test_manager_above_band() {
        let ds = dataset("1,Joe,Doe,100000\n2,Dan,Brown,50000,1\n");
        let findings = analyze(&ds);
        assert_eq!(
            findings,
            vec![Finding::SalaryOutOfBand {
                employee: ds.get(EmployeeId::new(1)).unwrap().identity(),
                direction: BandDirection::Above,
                amount: 25000.0,
            }]
        );
    }

    #[test]
    fn test_depth_threshold_applies_to_manager_depth() {
        // Chain 0 -> 1 -> 2 -> 3 -> 4 -> 5 -> 6, flat salaries inside the band.
        let chain = |len: u32| {
            let mut body = String::from("0,Root,Boss,1000000\n");
            let mut salary = 1_000_000u32;
            for id in 1..len {
                salary = salary * 3 / 4;
                body.push_str(&format!("{id},Emp,Lee,{salary},{}\n", id - 1));
            }
            body
        };

        // Deepest employee at depth 5, manager at depth 4: no depth finding.
        let ds = dataset(&chain(6));
        assert!(analyze(&ds).iter().all(|f| !f.is_depth()));

        // Deepest employee at depth 6, manager at depth 5: flagged by 1.
        let ds = dataset(&chain(7));
        let depth: Vec<_> = analyze(&ds).into_iter().filter(Finding::is_depth).collect();
        assert_eq!(
            depth,
            vec![Finding::DepthExceeded {
                overshoot: 1,
                employees: vec![ds.get(EmployeeId::new(6)).unwrap().identity()],
            }]
        );
    }

    #[test]
    fn test_custom_policy_threshold() {
        let policy = AnalyzerPolicy {
            max_reporting_depth: 0,
            ..AnalyzerPolicy::default()
        };
        let ds = dataset("1,Joe,Doe,130\n2,Ann,Lee,100,1\n3,Bob,Lee,80,2\n4,Cat,Lee,80,2\n");
        let findings = HierarchyAnalyzer::new(policy).analyze(&ds);
        assert_eq!(
            findings,
            vec![Finding::DepthExceeded {
                overshoot: 1,
                employees: vec![
                    ds.get(EmployeeId::new(3)).unwrap().identity(),
                    ds.get(EmployeeId::new(4)).unwrap().identity(),
                ],
            }]
        );
    }

    #[test]
    fn test_siblings_visited_in_row_order() {
        let ds = dataset(
            "1,Joe,Doe,100\n\
             3,Bob,Lee,10,1\n\
             2,Ann,Lee,10,1\n\
             30,Cat,Lee,100,3\n\
             20,Dan,Lee,100,2\n",
        );
        let ids: Vec<u32> = analyze(&ds)
            .iter()
            .filter_map(|f| match f {
                Finding::SalaryOutOfBand { employee, .. } => Some(employee.id.value()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }
}

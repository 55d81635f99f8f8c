//! Analyzer policy configuration
//!
//! The salary band coefficients and the reporting-depth threshold default to
//! 1.2, 1.5 and 4. A YAML file may override any of them; missing keys keep
//! their defaults.
//!
//! ```yaml
//! min_salary_ratio: 1.2
//! max_salary_ratio: 1.5
//! max_reporting_depth: 4
//! ```

use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MIN_SALARY_RATIO: f64 = 1.2;
pub const DEFAULT_MAX_SALARY_RATIO: f64 = 1.5;
pub const DEFAULT_MAX_REPORTING_DEPTH: u32 = 4;

/// Thresholds applied by the hierarchy analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerPolicy {
    /// Lower bound of the band, as a multiple of the direct reports' mean salary
    pub min_salary_ratio: f64,
    /// Upper bound of the band, as a multiple of the direct reports' mean salary
    pub max_salary_ratio: f64,
    /// Manager levels allowed between the root and an employee
    pub max_reporting_depth: u32,
}

impl Default for AnalyzerPolicy {
    fn default() -> Self {
        Self {
            min_salary_ratio: DEFAULT_MIN_SALARY_RATIO,
            max_salary_ratio: DEFAULT_MAX_SALARY_RATIO,
            max_reporting_depth: DEFAULT_MAX_REPORTING_DEPTH,
        }
    }
}

impl AnalyzerPolicy {
    /// Load a policy from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load a policy from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_yaml::from_str(content)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        let ratios = [self.min_salary_ratio, self.max_salary_ratio];
        if ratios.iter().any(|r| !r.is_finite() || *r <= 0.0) {
            return Err(PolicyError::Invalid(format!(
                "salary ratios must be finite and positive (min = {}, max = {})",
                self.min_salary_ratio, self.max_salary_ratio
            )));
        }
        if self.min_salary_ratio > self.max_salary_ratio {
            return Err(PolicyError::Invalid(format!(
                "min_salary_ratio {} exceeds max_salary_ratio {}",
                self.min_salary_ratio, self.max_salary_ratio
            )));
        }
        Ok(())
    }
}

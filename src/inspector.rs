//! One inspection run: load, analyze, present.
//!
//! The loader runs to completion before the analyzer starts. Load failures
//! are logged and rendered as a message; they never escape as a crash.

use crate::analyzer::HierarchyAnalyzer;
use crate::error::LoadError;
use crate::loader::{CsvEmployeeSource, EmployeeSource};
use crate::report::{Presenter, TextPresenter};
use std::io::{self, Write};
use std::path::Path;
use tracing::{error, info, warn};

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// No input path was given; nothing was read.
    MissingInput,
    /// The loader rejected the input.
    LoadFailed(LoadError),
    /// Analysis ran and `findings` findings were rendered.
    Completed { employees: usize, findings: usize },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }
}

pub struct Inspector<S = CsvEmployeeSource> {
    source: S,
    analyzer: HierarchyAnalyzer,
    presenter: Box<dyn Presenter>,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(
            CsvEmployeeSource,
            HierarchyAnalyzer::default(),
            Box::new(TextPresenter),
        )
    }
}

impl<S: EmployeeSource> Inspector<S> {
    pub fn new(source: S, analyzer: HierarchyAnalyzer, presenter: Box<dyn Presenter>) -> Self {
        Self {
            source,
            analyzer,
            presenter,
        }
    }

    /// Inspect the employee file at `path`, writing the report to `out`.
    ///
    /// Only failures writing to `out` are returned as errors.
    pub fn run(&self, path: Option<&Path>, out: &mut dyn Write) -> io::Result<RunOutcome> {
        let Some(path) = path.filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty())
        else {
            warn!("file name is empty; nothing to inspect");
            return Ok(RunOutcome::MissingInput);
        };

        let dataset = match self.source.load(path) {
            Ok(dataset) => dataset,
            Err(err) => {
                error!(
                    path = %path.display(),
                    code = err.code(),
                    cause = ?std::error::Error::source(&err),
                    "an error occurred while processing the CSV file: {err}"
                );
                self.presenter.render_error(&err, out)?;
                return Ok(RunOutcome::LoadFailed(err));
            }
        };

        info!(path = %path.display(), employees = dataset.len(), "analyzing employee data");
        let findings = self.analyzer.analyze(&dataset);
        self.presenter.render(&findings, out)?;

        Ok(RunOutcome::Completed {
            employees: dataset.len(),
            findings: findings.len(),
        })
    }
}

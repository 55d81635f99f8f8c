//! Presentation of findings and load errors.
//!
//! Text output is line oriented:
//!
//! ```text
//! Employee id=124, Martin Chekov earns less than expected by 45000.0.
//! Employee id=311, Anthony Brown earns more than expected by 25000.0.
//! Find below Employees with reporting line more by 1
//! id=313, Brad Smith
//! ```
//!
//! JSON output wraps the findings in `{"ok": true, "findings": [...]}`.

use crate::error::LoadError;
use org_types::{BandDirection, EmployeeRef, Finding};
use serde::Serialize;
use std::io::{self, Write};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn presenter(self) -> Box<dyn Presenter> {
        match self {
            Self::Text => Box::new(TextPresenter),
            Self::Json => Box::new(JsonPresenter),
        }
    }
}

/// Renders a run's outcome to a writer.
pub trait Presenter {
    fn render(&self, findings: &[Finding], out: &mut dyn Write) -> io::Result<()>;

    fn render_error(&self, error: &LoadError, out: &mut dyn Write) -> io::Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TextPresenter;

impl Presenter for TextPresenter {
    fn render(&self, findings: &[Finding], out: &mut dyn Write) -> io::Result<()> {
        for finding in findings {
            for line in finding_lines(finding) {
                writeln!(out, "{line}")?;
            }
        }
        out.flush()
    }

    fn render_error(&self, error: &LoadError, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "An error occurred while processing the CSV file: {error}"
        )?;
        out.flush()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPresenter;

#[derive(Serialize)]
struct JsonReport<'a> {
    ok: bool,
    findings: &'a [Finding],
}

#[derive(Serialize)]
struct JsonError {
    ok: bool,
    error: JsonErrorBody,
}

#[derive(Serialize)]
struct JsonErrorBody {
    code: &'static str,
    message: String,
}

impl Presenter for JsonPresenter {
    fn render(&self, findings: &[Finding], out: &mut dyn Write) -> io::Result<()> {
        let report = JsonReport { ok: true, findings };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        out.flush()
    }

    fn render_error(&self, error: &LoadError, out: &mut dyn Write) -> io::Result<()> {
        let body = JsonError {
            ok: false,
            error: JsonErrorBody {
                code: error.code(),
                message: error.to_string(),
            },
        };
        serde_json::to_writer_pretty(&mut *out, &body)?;
        writeln!(out)?;
        out.flush()
    }
}

/// Text lines for one finding.
pub fn finding_lines(finding: &Finding) -> Vec<String> {
    match finding {
        Finding::SalaryOutOfBand {
            employee,
            direction,
            amount,
        } => {
            let comparison = match direction {
                BandDirection::Below => "less",
                BandDirection::Above => "more",
            };
            vec![format!(
                "Employee {}, {} earns {comparison} than expected by {}.",
                id_label(employee),
                employee.full_name(),
                format_amount(*amount)
            )]
        }
        Finding::DepthExceeded {
            overshoot,
            employees,
        } => {
            let mut lines = Vec::with_capacity(employees.len() + 1);
            lines.push(format!(
                "Find below Employees with reporting line more by {overshoot}"
            ));
            lines.extend(
                employees
                    .iter()
                    .map(|e| format!("{}, {}", id_label(e), e.full_name())),
            );
            lines
        }
    }
}

fn id_label(employee: &EmployeeRef) -> String {
    format!("id={}", employee.id)
}

/// Decimal rendering of an amount: whole values keep one decimal place
/// (`45000.0`), fractional values use the shortest exact representation.
pub fn format_amount(amount: f64) -> String {
    if amount.is_finite() && amount.fract() == 0.0 {
        format!("{amount:.1}")
    } else {
        format!("{amount}")
    }
}

//! Totals and averages over a `name,salary` file.

use crate::amount::{ExactAmount, Money};
use crate::error::DataFileError;
use crate::lines::{self, MalformedLine, split_fields};
use log::{debug, warn};
use std::path::Path;

/// Aggregated salaries of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryReport {
    /// Sum of valid salaries, rounded half-up to cents.
    pub total: Money,
    /// Exact sum divided by `count`, rounded half-up to cents.
    pub average: Money,
    /// Number of valid lines.
    pub count: usize,
    pub malformed: Vec<MalformedLine>,
}

/// Finest salary precision accepted, in digits after the decimal point.
pub const MAX_FRACTION_DIGITS: u32 = 18;

/// Parse the salary out of a `name,salary` line.
///
/// Returns `None` unless the line has exactly two comma-separated fields and
/// the second one is a number with at most [`MAX_FRACTION_DIGITS`]
/// significant fractional digits.
pub fn parse_salary_line(line: &str) -> Option<ExactAmount> {
    let [_name, salary] = split_fields::<2>(line)?;
    let salary: ExactAmount = salary.parse().ok()?;
    (salary.scale() <= MAX_FRACTION_DIGITS).then_some(salary)
}

/// Sum and average every valid salary in the file at `path`.
///
/// A missing file is [`DataFileError::NotFound`]. A file without any valid
/// line reports `0.00` for both figures. A salary that would push the total
/// out of range is reported as malformed like any other bad line.
pub fn total_salary(path: impl AsRef<Path>) -> Result<SalaryReport, DataFileError> {
    let path = path.as_ref();
    let mut total = ExactAmount::ZERO;
    let parsed = lines::parse_file(path, |line| {
        let salary = parse_salary_line(line)?;
        match total.checked_add(salary) {
            Ok(sum) if sum.to_money().is_ok() => {
                total = sum;
                Some(salary)
            }
            _ => {
                warn!("salary {:?} does not fit the running total", salary);
                None
            }
        }
    })?;
    let report = summarize(total, parsed.records.len(), parsed.malformed);
    debug!(
        "{}: {} salaries, total {}, average {}",
        path.display(),
        report.count,
        report.total,
        report.average
    );
    Ok(report)
}

fn summarize(total: ExactAmount, count: usize, malformed: Vec<MalformedLine>) -> SalaryReport {
    match (total.to_money(), total.div_to_money(count as u64)) {
        (Ok(total), Ok(average)) if count > 0 => SalaryReport {
            total,
            average,
            count,
            malformed,
        },
        (Err(e), _) | (_, Err(e)) => {
            warn!("salary total cannot be rounded: {}", e);
            empty_report(malformed)
        }
        _ => empty_report(malformed),
    }
}

fn empty_report(malformed: Vec<MalformedLine>) -> SalaryReport {
    SalaryReport {
        total: Money::ZERO,
        average: Money::ZERO,
        count: 0,
        malformed,
    }
}

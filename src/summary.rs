//! Aggregate statistics over the marks table.

use crate::loader::Table;

/// Marks at or above this value count as a pass.
pub const PASS_THRESHOLD: f64 = 35.0;

/// Statistics computed once per report.
///
/// The mean, maximum and minimum are undefined for an empty table and are
/// therefore `None`; the pass percentage falls back to zero in that case.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub average: Option<f64>,
    pub highest: Option<i64>,
    pub lowest: Option<i64>,
    pub pass_count: usize,
    pub pass_percent: f64,
}

impl Summary {
    /// Computes the summary for `table`.
    pub fn from_table(table: &Table) -> Self {
        let total = table.len();
        let pass_count = table.marks().filter(|&marks| marks >= PASS_THRESHOLD).count();

        if total == 0 {
            return Self {
                total,
                average: None,
                highest: None,
                lowest: None,
                pass_count,
                pass_percent: 0.0,
            };
        }

        let sum: f64 = table.marks().sum();
        let highest = table.marks().fold(f64::NEG_INFINITY, f64::max);
        let lowest = table.marks().fold(f64::INFINITY, f64::min);

        Self {
            total,
            average: Some(round2(sum / total as f64)),
            highest: Some(highest.trunc() as i64),
            lowest: Some(lowest.trunc() as i64),
            pass_count,
            pass_percent: round2(pass_count as f64 / total as f64 * 100.0),
        }
    }

    /// Scalar statistic lines shown in the summary section.
    ///
    /// Only the total is listed for an empty table.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Total Students: {}", self.total)];
        if let Some(average) = self.average {
            lines.push(format!("Average Marks: {}", format_decimal(average)));
        }
        if let Some(highest) = self.highest {
            lines.push(format!("Highest Marks: {highest}"));
        }
        if let Some(lowest) = self.lowest {
            lines.push(format!("Lowest Marks: {lowest}"));
        }
        lines
    }

    /// Sentence rendered in the analysis section.
    pub fn analysis_sentence(&self) -> String {
        let percent = if self.total == 0 {
            "0".to_owned()
        } else {
            format_decimal(self.pass_percent)
        };
        format!(
            "Out of {} students, {} passed ({}%).",
            self.total, self.pass_count, percent
        )
    }
}

/// Rounds to two decimal places, exact halves to the even digit.
///
/// Fixed-precision formatting rounds the exact binary value, so `3.125`
/// becomes `3.12` while `3.1251` becomes `3.13`.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Formats a decimal with at least one fractional digit (`60.0`, `72.33`).
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

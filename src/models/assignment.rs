//! Leave assignment model.
//!
//! An [`Assignment`] places one occurrence of a leave category on one person
//! for an inclusive run of months.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Horizon, Period};

/// Average number of days in a month, used when expressing day counts in
/// months for reporting.
pub const DAYS_PER_MONTH: f64 = 30.44;

/// A single leave placed on a person.
///
/// The leave covers every day from the first day of `start` through the
/// last day of `end`.
///
/// # Example
///
/// ```
/// use leave_sim::models::Assignment;
///
/// let a = Assignment::new("F001", "Maternity Leave", "2025-01".parse().unwrap(), "2025-03".parse().unwrap());
/// let b = Assignment::new("F001", "Long Term Sick", "2025-03".parse().unwrap(), "2025-04".parse().unwrap());
/// assert_eq!(a.span_months(), 3);
/// assert!(a.overlaps(&b));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// Id of the person on leave.
    pub person_id: String,
    /// Name of the leave category.
    pub category: String,
    /// First month of leave.
    pub start: Period,
    /// Last month of leave (inclusive).
    pub end: Period,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(
        person_id: impl Into<String>,
        category: impl Into<String>,
        start: Period,
        end: Period,
    ) -> Self {
        Self {
            person_id: person_id.into(),
            category: category.into(),
            start,
            end,
        }
    }

    /// Number of months covered, counting both ends.
    pub fn span_months(&self) -> u32 {
        (self.start.months_until(self.end) + 1).max(0) as u32
    }

    /// First day of leave.
    pub fn start_date(&self) -> NaiveDate {
        self.start.first_day()
    }

    /// Last day of leave.
    pub fn end_date(&self) -> NaiveDate {
        self.end.last_day()
    }

    /// Returns true if both assignments share at least one month.
    pub fn overlaps(&self, other: &Assignment) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of leave days falling inside `horizon`.
    pub fn days_within(&self, horizon: &Horizon) -> u64 {
        horizon.overlap_days(self.start, self.end)
    }

    /// Returns true if the assignment starts and ends inside `horizon`.
    pub fn is_within(&self, horizon: &Horizon) -> bool {
        horizon.index_of(self.start).is_some() && horizon.index_of(self.end).is_some()
    }
}

//! Calendar month periods and the simulation horizon.
//!
//! This module contains the [`Period`] and [`Horizon`] types. Placement works
//! at month granularity while coverage is measured in days, so both types
//! expose month indexing and day counts.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Earliest year accepted for a period.
const MIN_YEAR: i32 = 1;
/// Latest year accepted for a period.
const MAX_YEAR: i32 = 9999;

/// A calendar month, written `YYYY-MM`.
///
/// # Example
///
/// ```
/// use leave_sim::models::Period;
///
/// let period: Period = "2024-02".parse().unwrap();
/// assert_eq!(period.days(), 29);
/// assert_eq!(period.add_months(11).to_string(), "2025-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period(NaiveDate);

impl Period {
    /// Creates a period, validating the month and year range.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let invalid = |message: String| EngineError::InvalidPeriod {
            value: format!("{:04}-{:02}", year, month),
            message,
        };
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(invalid(format!(
                "year must be between {} and {}",
                MIN_YEAR, MAX_YEAR
            )));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Period)
            .ok_or_else(|| invalid("month must be between 1 and 12".to_string()))
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The calendar month (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Number of days in this month.
    pub fn days(&self) -> u32 {
        // 10000-01 is still representable, so the next month always exists
        self.0
            .checked_add_months(Months::new(1))
            .map_or(31, |next| (next - self.0).num_days() as u32)
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.0.with_day(self.days()).unwrap_or(self.0)
    }

    /// Returns the period `months` months after this one.
    ///
    /// Saturates at December of the latest accepted year.
    pub fn add_months(&self, months: u32) -> Period {
        self.0
            .checked_add_months(Months::new(months))
            .filter(|date| date.year() <= MAX_YEAR)
            .or_else(|| NaiveDate::from_ymd_opt(MAX_YEAR, 12, 1))
            .map_or(*self, Period)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(&self, other: Period) -> i64 {
        i64::from(other.year() - self.year()) * 12 + i64::from(other.month())
            - i64::from(self.month())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Period {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| EngineError::InvalidPeriod {
            value: s.to_string(),
            message: message.to_string(),
        };

        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| invalid("expected YYYY-MM"))?;
        let year: i32 = year.parse().map_err(|_| invalid("year is not a number"))?;
        let month: u32 = month.parse().map_err(|_| invalid("month is not a number"))?;

        Period::new(year, month)
    }
}

impl TryFrom<String> for Period {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

/// Raw horizon bounds as they appear in configuration and requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct HorizonBounds {
    start: Period,
    end: Period,
}

/// The inclusive run of months over which leave is placed and measured.
///
/// # Example
///
/// ```
/// use leave_sim::models::Horizon;
///
/// let horizon = Horizon::new("2025-01".parse().unwrap(), "2025-12".parse().unwrap()).unwrap();
/// assert_eq!(horizon.len_months(), 12);
/// assert_eq!(horizon.total_days(), 365);
/// assert!((horizon.years() - 1.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HorizonBounds", into = "HorizonBounds")]
pub struct Horizon {
    start: Period,
    end: Period,
}

impl Horizon {
    /// Creates a horizon; `start` must not be after `end`.
    pub fn new(start: Period, end: Period) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::invalid_config(
                "simulation",
                format!("horizon start {} is after end {}", start, end),
            ));
        }
        Ok(Self { start, end })
    }

    /// First month of the horizon.
    pub fn start(&self) -> Period {
        self.start
    }

    /// Last month of the horizon.
    pub fn end(&self) -> Period {
        self.end
    }

    /// Number of months, counting both ends.
    pub fn len_months(&self) -> usize {
        (self.start.months_until(self.end) + 1) as usize
    }

    /// Horizon length in years (`months / 12`).
    pub fn years(&self) -> f64 {
        self.len_months() as f64 / 12.0
    }

    /// The month at `index` (0 = start).
    pub fn period_at(&self, index: usize) -> Period {
        self.start.add_months(index as u32)
    }

    /// Index of `period` within the horizon, if it falls inside.
    pub fn index_of(&self, period: Period) -> Option<usize> {
        if period < self.start || period > self.end {
            return None;
        }
        Some(self.start.months_until(period) as usize)
    }

    /// Month indices covered by the inclusive range `[start, end]` clipped
    /// to the horizon, or `None` when the range lies entirely outside.
    pub fn index_range(&self, start: Period, end: Period) -> Option<RangeInclusive<usize>> {
        let from = self.index_of(start.max(self.start))?;
        let to = self.index_of(end.min(self.end))?;
        (from <= to).then_some(from..=to)
    }

    /// Iterates over every month in order.
    pub fn months(&self) -> impl Iterator<Item = Period> + '_ {
        (0..self.len_months()).map(|i| self.period_at(i))
    }

    /// Total number of days covered by the horizon.
    pub fn total_days(&self) -> u64 {
        self.overlap_days(self.start, self.end)
    }

    /// Day count of the inclusive month range `[start, end]` clipped to the
    /// horizon. Returns zero when the range lies entirely outside.
    pub fn overlap_days(&self, start: Period, end: Period) -> u64 {
        let from = start.max(self.start);
        let to = end.min(self.end);
        if from > to {
            return 0;
        }
        ((to.last_day() - from.first_day()).num_days() + 1) as u64
    }

    /// First day of the horizon.
    pub fn first_day(&self) -> NaiveDate {
        self.start.first_day()
    }

    /// Last day of the horizon.
    pub fn last_day(&self) -> NaiveDate {
        self.end.last_day()
    }
}

impl TryFrom<HorizonBounds> for Horizon {
    type Error = EngineError;

    fn try_from(bounds: HorizonBounds) -> Result<Self, Self::Error> {
        Horizon::new(bounds.start, bounds.end)
    }
}

impl From<Horizon> for HorizonBounds {
    fn from(horizon: Horizon) -> Self {
        HorizonBounds {
            start: horizon.start,
            end: horizon.end,
        }
    }
}

//! Coverage analysis output models.
//!
//! This module contains the [`CoverageReport`] produced by the coverage
//! analyzer together with its per-category rows, overall summary and the
//! ledgers downstream exporters render into detail and monthly sheets.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Period;

/// Time-weighted coverage for one leave category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageResult {
    /// The category name.
    pub category: String,
    /// Configured rate, in percent.
    pub target_percent: f64,
    /// `leave_days / crew_days × 100`.
    pub actual_percent: f64,
    /// `actual_percent - target_percent`, unrounded.
    pub difference: f64,
    /// Leave days falling inside the horizon.
    pub leave_days: u64,
    /// Eligible population × horizon days.
    pub crew_days: u64,
    /// Active people eligible for the category.
    pub eligible_population: usize,
    /// Number of assignments of this category.
    pub assignment_count: usize,
    /// Distinct people holding at least one assignment of this category.
    pub unique_people: usize,
    /// Mean leave days per assignment (zero when there are none).
    pub average_days_per_assignment: f64,
}

/// Coverage over all categories together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Sum of the category targets, in percent.
    pub target_percent: f64,
    /// All leave days over all active person-days, in percent.
    pub actual_percent: f64,
    /// `actual_percent - target_percent`.
    pub difference: f64,
    /// Leave days across every category.
    pub leave_days: u64,
    /// Active population × horizon days.
    pub crew_days: u64,
    /// Number of assignments.
    pub assignment_count: usize,
    /// Distinct people holding any assignment.
    pub unique_people: usize,
}

/// One analyzed assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Id of the person on leave.
    pub person_id: String,
    /// Category name.
    pub category: String,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Days counted toward coverage.
    pub leave_days: u64,
    /// `leave_days` expressed in average months.
    pub duration_months: f64,
}

/// The full output of a coverage analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// First month analyzed.
    pub horizon_start: Period,
    /// Last month analyzed.
    pub horizon_end: Period,
    /// Days in the horizon.
    pub horizon_days: u64,
    /// Per-category results in configuration order.
    pub categories: Vec<CoverageResult>,
    /// All categories together.
    pub overall: CoverageSummary,
    /// One entry per analyzed assignment, in input order.
    pub ledger: Vec<LedgerEntry>,
}

impl CoverageReport {
    /// Looks a category's result up by name.
    pub fn get(&self, category: &str) -> Option<&CoverageResult> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Per-category results keyed by name.
    pub fn by_category(&self) -> BTreeMap<&str, &CoverageResult> {
        self.categories
            .iter()
            .map(|c| (c.category.as_str(), c))
            .collect()
    }
}

/// Person-months on leave for one category, one value per horizon month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyLedgerRow {
    /// Category name.
    pub category: String,
    /// Person-months per month, aligned with [`MonthlyLedger::months`].
    pub person_months: Vec<f64>,
}

impl MonthlyLedgerRow {
    /// Sum over the horizon.
    pub fn total(&self) -> f64 {
        self.person_months.iter().sum()
    }
}

/// The per-month on-leave table for every category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyLedger {
    /// Horizon months, in order.
    pub months: Vec<Period>,
    /// One row per configured category, in configuration order.
    pub rows: Vec<MonthlyLedgerRow>,
}

impl MonthlyLedger {
    /// Looks a category's row up by name.
    pub fn row(&self, category: &str) -> Option<&MonthlyLedgerRow> {
        self.rows.iter().find(|r| r.category == category)
    }
}

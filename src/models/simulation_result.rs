//! Assignment engine output models.
//!
//! This module contains [`GenerationResult`] and the structures attached to
//! it: per-category allocation statistics, soft under-allocation warnings and
//! the audit trace explaining how each category's target was reached.

use serde::{Deserialize, Serialize};

use super::Assignment;

/// A single step in the audit trace recording an engine decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Reported when a category's retry budget ran out before its target was met.
///
/// This is not an error: the run completes and the placed assignments are
/// kept.
///
/// # Example
///
/// ```
/// use leave_sim::models::UnderAllocationWarning;
///
/// let warning = UnderAllocationWarning::new("Long Term Sick", 12, 9);
/// assert_eq!(warning.unfilled, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnderAllocationWarning {
    /// The category that fell short.
    pub category: String,
    /// Occurrences the engine tried to place.
    pub target: u32,
    /// Occurrences actually placed.
    pub placed: u32,
    /// `target - placed`.
    pub unfilled: u32,
}

impl UnderAllocationWarning {
    /// Creates a warning, deriving the unfilled count.
    pub fn new(category: impl Into<String>, target: u32, placed: u32) -> Self {
        Self {
            category: category.into(),
            target,
            placed,
            unfilled: target.saturating_sub(placed),
        }
    }
}

/// How many occurrences of a category were requested, targeted and placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    /// The category name.
    pub category: String,
    /// Active people eligible for the category.
    pub eligible_population: usize,
    /// Unrounded occurrence count implied by the rate.
    pub expected: f64,
    /// Target after rounding and capping.
    pub target: u32,
    /// Occurrences placed.
    pub placed: u32,
    /// Total placement attempts spent.
    pub attempts: u64,
}

impl CategoryAllocation {
    /// Placed occurrences as a percentage of the target (100 when the
    /// target is zero).
    pub fn success_rate(&self) -> f64 {
        if self.target == 0 {
            return 100.0;
        }
        f64::from(self.placed) / f64::from(self.target) * 100.0
    }
}

/// The complete output of one assignment engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Placed assignments in placement order (category order, then
    /// occurrence order).
    pub assignments: Vec<Assignment>,
    /// Per-category statistics in category order.
    pub allocations: Vec<CategoryAllocation>,
    /// Categories that could not reach their target.
    pub warnings: Vec<UnderAllocationWarning>,
    /// Engine decisions, one or more per category.
    pub audit_trace: Vec<AuditStep>,
}

impl GenerationResult {
    /// Total occurrences that could not be placed across all categories.
    pub fn unfilled(&self) -> u32 {
        self.warnings.iter().map(|w| w.unfilled).sum()
    }

    /// Assignments of one category.
    pub fn assignments_for<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a Assignment> + 'a {
        self.assignments.iter().filter(move |a| a.category == category)
    }
}

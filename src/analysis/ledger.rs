//! Monthly on-leave table.

use std::collections::HashMap;

use crate::config::SimulationConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Assignment, Horizon, MonthlyLedger, MonthlyLedgerRow};

/// Counts, for each category and horizon month, how many person-months
/// were spent on leave.
///
/// Assignments cover whole months, so each person on leave contributes 1.0
/// to every month they cover. Months outside the horizon are dropped.
///
/// # Errors
///
/// Returns `UnknownCategory` if an assignment names a category that is not
/// configured.
pub fn monthly_ledger(
    assignments: &[Assignment],
    config: &SimulationConfig,
    horizon: &Horizon,
) -> EngineResult<MonthlyLedger> {
    let months: Vec<_> = horizon.months().collect();
    let index: HashMap<&str, usize> = config
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.name.as_str(), i))
        .collect();

    let mut rows: Vec<MonthlyLedgerRow> = config
        .categories
        .iter()
        .map(|c| MonthlyLedgerRow {
            category: c.name.clone(),
            person_months: vec![0.0; months.len()],
        })
        .collect();

    for assignment in assignments {
        let &slot = index.get(assignment.category.as_str()).ok_or_else(|| {
            EngineError::UnknownCategory {
                category: assignment.category.clone(),
            }
        })?;

        if let Some(covered) = horizon.index_range(assignment.start, assignment.end) {
            for cell in &mut rows[slot].person_months[covered] {
                *cell += 1.0;
            }
        }
    }

    Ok(MonthlyLedger { months, rows })
}

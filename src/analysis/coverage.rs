//! Time-weighted coverage analysis.
//!
//! Coverage is measured in days rather than assignment counts:
//! `actual = leave_days / (eligible_population × horizon_days) × 100`.
//! A nine-month leave contributes three times what a three-month leave does.

use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::config::{LeaveCategory, SimulationConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Assignment, CoverageReport, CoverageResult, CoverageSummary, DAYS_PER_MONTH, Headcount,
    Horizon, LedgerEntry,
};

/// Active people a category's coverage is measured against.
///
/// A split category draws from women and men only, so people without a
/// recorded gender are left out of its denominator.
pub fn eligible_population(category: &LeaveCategory, headcount: &Headcount) -> usize {
    match category.gender_split {
        Some(_) => headcount.female + headcount.male,
        None => headcount.eligible(category.gender),
    }
}

/// `numerator / denominator × 100`, or zero when the denominator is zero.
pub(crate) fn percent(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64 * 100.0
}

#[derive(Default)]
struct Tally<'a> {
    leave_days: u64,
    assignments: usize,
    people: HashSet<&'a str>,
}

/// Measures the coverage a set of assignments achieves.
///
/// # Arguments
///
/// * `assignments` - The assignments to measure; never modified
/// * `config` - Supplies the categories, their order and target rates
/// * `horizon` - The months leave days are counted within
/// * `headcount` - The active population, used for the denominators
///
/// # Errors
///
/// Returns `UnknownCategory` if an assignment names a category that is not
/// configured.
///
/// # Example
///
/// ```
/// use leave_sim::analysis::analyze;
/// use leave_sim::config::{LeaveCategory, SimulationConfig};
/// use leave_sim::models::{Assignment, GenderRestriction, Headcount, Horizon, Roster};
///
/// let horizon = Horizon::new("2025-01".parse().unwrap(), "2025-12".parse().unwrap()).unwrap();
/// let config = SimulationConfig::new(
///     horizon,
///     vec![LeaveCategory::new("Maternity Leave", 10.0, 3.0).with_gender(GenderRestriction::Female)],
/// );
/// let roster = Roster::sample(10, 0.6);
/// let assignments = vec![Assignment::new(
///     "F001",
///     "Maternity Leave",
///     "2025-01".parse().unwrap(),
///     "2025-03".parse().unwrap(),
/// )];
///
/// let report = analyze(&assignments, &config, &horizon, &Headcount::from_roster(&roster)).unwrap();
/// let maternity = report.get("Maternity Leave").unwrap();
/// assert_eq!(maternity.leave_days, 90);
/// assert_eq!(maternity.crew_days, 6 * 365);
/// ```
pub fn analyze(
    assignments: &[Assignment],
    config: &SimulationConfig,
    horizon: &Horizon,
    headcount: &Headcount,
) -> EngineResult<CoverageReport> {
    let index: HashMap<&str, usize> = config
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.name.as_str(), i))
        .collect();

    let horizon_days = horizon.total_days();
    let mut tallies: Vec<Tally> = config.categories.iter().map(|_| Tally::default()).collect();
    let mut ledger = Vec::with_capacity(assignments.len());

    for assignment in assignments {
        let &slot = index.get(assignment.category.as_str()).ok_or_else(|| {
            EngineError::UnknownCategory {
                category: assignment.category.clone(),
            }
        })?;

        let leave_days = assignment.days_within(horizon);
        let tally = &mut tallies[slot];
        tally.leave_days += leave_days;
        tally.assignments += 1;
        tally.people.insert(assignment.person_id.as_str());

        ledger.push(LedgerEntry {
            person_id: assignment.person_id.clone(),
            category: assignment.category.clone(),
            start_date: assignment.start_date(),
            end_date: assignment.end_date(),
            leave_days,
            duration_months: leave_days as f64 / DAYS_PER_MONTH,
        });
    }

    let categories: Vec<CoverageResult> = config
        .categories
        .iter()
        .zip(&tallies)
        .map(|(category, tally)| {
            let eligible = eligible_population(category, headcount);
            let crew_days = eligible as u64 * horizon_days;
            let actual_percent = percent(tally.leave_days, crew_days);
            CoverageResult {
                category: category.name.clone(),
                target_percent: category.rate_percent,
                actual_percent,
                difference: actual_percent - category.rate_percent,
                leave_days: tally.leave_days,
                crew_days,
                eligible_population: eligible,
                assignment_count: tally.assignments,
                unique_people: tally.people.len(),
                average_days_per_assignment: if tally.assignments == 0 {
                    0.0
                } else {
                    tally.leave_days as f64 / tally.assignments as f64
                },
            }
        })
        .collect();

    let overall = summarize(&categories, &tallies, headcount, horizon_days);

    info!(
        assignments = assignments.len(),
        categories = categories.len(),
        overall_percent = overall.actual_percent,
        "Analyzed coverage"
    );

    Ok(CoverageReport {
        horizon_start: horizon.start(),
        horizon_end: horizon.end(),
        horizon_days,
        categories,
        overall,
        ledger,
    })
}

fn summarize(
    categories: &[CoverageResult],
    tallies: &[Tally<'_>],
    headcount: &Headcount,
    horizon_days: u64,
) -> CoverageSummary {
    let leave_days: u64 = categories.iter().map(|c| c.leave_days).sum();
    let crew_days = headcount.total() as u64 * horizon_days;
    let target_percent: f64 = categories.iter().map(|c| c.target_percent).sum();
    let actual_percent = percent(leave_days, crew_days);
    let unique_people = tallies
        .iter()
        .flat_map(|t| t.people.iter().copied())
        .collect::<HashSet<_>>()
        .len();

    CoverageSummary {
        target_percent,
        actual_percent,
        difference: actual_percent - target_percent,
        leave_days,
        crew_days,
        assignment_count: categories.iter().map(|c| c.assignment_count).sum(),
        unique_people,
    }
}

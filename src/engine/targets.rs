//! Target occurrence counts.
//!
//! This module turns a category's rate into the number of occurrences the
//! placement loop tries to fill, capped by how much room the eligible
//! people have left.

use serde::{Deserialize, Serialize};

use crate::config::{GenderSplit, LeaveCategory, TargetBasis};
use crate::models::Horizon;

/// How a category's occurrence target was reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OccurrenceTarget {
    /// Unrounded occurrence count implied by the rate.
    pub expected: f64,
    /// `expected` rounded to the nearest integer.
    pub requested: u32,
    /// Occurrences the eligible people can still absorb under the caps.
    pub capacity: u32,
    /// `min(requested, capacity)`.
    pub target: u32,
}

impl OccurrenceTarget {
    /// Returns true if the cap lowered the target.
    pub fn is_capped(&self) -> bool {
        self.target < self.requested
    }
}

/// Unrounded number of occurrences a category's rate asks for.
///
/// With [`TargetBasis::Incidence`] this is
/// `rate_percent / 100 × eligible × horizon_years`; with
/// [`TargetBasis::SteadyState`] it is
/// `rate_percent / 100 × eligible × horizon_months / duration_months`.
///
/// # Examples
///
/// ```
/// use leave_sim::config::{LeaveCategory, TargetBasis};
/// use leave_sim::engine::expected_occurrences;
/// use leave_sim::models::Horizon;
///
/// let horizon = Horizon::new("2025-01".parse().unwrap(), "2025-12".parse().unwrap()).unwrap();
/// let category = LeaveCategory::new("Maternity Leave", 10.0, 3.0);
///
/// let incidence = expected_occurrences(&category, 6, &horizon, TargetBasis::Incidence);
/// assert!((incidence - 0.6).abs() < 1e-9);
///
/// let steady = expected_occurrences(&category, 6, &horizon, TargetBasis::SteadyState);
/// assert!((steady - 2.4).abs() < 1e-9);
/// ```
pub fn expected_occurrences(
    category: &LeaveCategory,
    eligible_population: usize,
    horizon: &Horizon,
    basis: TargetBasis,
) -> f64 {
    let rate = category.rate_percent / 100.0;
    let population = eligible_population as f64;
    match basis {
        TargetBasis::Incidence => rate * population * horizon.years(),
        TargetBasis::SteadyState => {
            rate * population * horizon.len_months() as f64 / category.duration_months
        }
    }
}

/// Rounds `expected` and caps it at `capacity`.
pub fn target_occurrences(expected: f64, capacity: u32) -> OccurrenceTarget {
    let requested = expected.round().max(0.0) as u32;
    OccurrenceTarget {
        expected,
        requested,
        capacity,
        target: requested.min(capacity),
    }
}

/// Divides a target between women and men; the female slice is rounded to
/// nearest and the male slice takes the remainder.
///
/// # Examples
///
/// ```
/// use leave_sim::config::GenderSplit;
/// use leave_sim::engine::split_target;
///
/// let split = GenderSplit { female_share: 0.6, male_share: 0.4 };
/// assert_eq!(split_target(10, &split), (6, 4));
/// assert_eq!(split_target(3, &split), (2, 1));
/// ```
pub fn split_target(target: u32, split: &GenderSplit) -> (u32, u32) {
    let female = (f64::from(target) * split.female_share).round().max(0.0) as u32;
    let female = female.min(target);
    (female, target - female)
}

/// Fits a `(female, male)` division of a target to each pool's remaining
/// capacity. Whatever one pool cannot absorb moves to the other, as far as
/// its own room allows, so the total only drops when both pools are full.
///
/// # Examples
///
/// ```
/// use leave_sim::engine::fit_split_to_capacity;
///
/// // one woman with room for one leave; the men take the rest
/// assert_eq!(fit_split_to_capacity((28, 3), (1, 30)), (1, 30));
/// assert_eq!(fit_split_to_capacity((6, 4), (10, 10)), (6, 4));
/// ```
pub fn fit_split_to_capacity(
    (female, male): (u32, u32),
    (female_room, male_room): (u32, u32),
) -> (u32, u32) {
    let female_fit = female.min(female_room);
    let male_fit = male.min(male_room);
    let to_female = (male - male_fit).min(female_room - female_fit);
    let to_male = (female - female_fit).min(male_room - male_fit);
    (female_fit + to_female, male_fit + to_male)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizon_months(months: u32) -> Horizon {
        let start: crate::models::Period = "2025-01".parse().unwrap();
        Horizon::new(start, start.add_months(months - 1)).unwrap()
    }

    #[test]
    fn test_incidence_scales_with_years() {
        let category = LeaveCategory::new("Sick", 5.0, 2.0);
        let expected = expected_occurrences(&category, 100, &horizon_months(24), TargetBasis::Incidence);
        assert!((expected - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_steady_state_divides_by_duration() {
        let category = LeaveCategory::new("Sick", 5.0, 2.0);
        let expected =
            expected_occurrences(&category, 100, &horizon_months(24), TargetBasis::SteadyState);
        // 5 people on leave at any time × 24 months / 2 months each
        assert!((expected - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_target_rounds_to_nearest() {
        assert_eq!(target_occurrences(0.6, 10).target, 1);
        assert_eq!(target_occurrences(0.4, 10).target, 0);
        assert_eq!(target_occurrences(2.5, 10).target, 3);
    }

    #[test]
    fn test_target_capped_by_capacity() {
        let target = target_occurrences(12.2, 5);
        assert_eq!(target.requested, 12);
        assert_eq!(target.target, 5);
        assert!(target.is_capped());
        assert!(!target_occurrences(3.0, 5).is_capped());
    }

    #[test]
    fn test_split_all_one_gender() {
        let female_only = GenderSplit {
            female_share: 1.0,
            male_share: 0.0,
        };
        assert_eq!(split_target(7, &female_only), (7, 0));

        let male_only = GenderSplit {
            female_share: 0.0,
            male_share: 1.0,
        };
        assert_eq!(split_target(7, &male_only), (0, 7));
    }

    #[test]
    fn test_split_zero_target() {
        let split = GenderSplit {
            female_share: 0.5,
            male_share: 0.5,
        };
        assert_eq!(split_target(0, &split), (0, 0));
    }

    #[test]
    fn test_fit_split_moves_shortfall_to_other_pool() {
        assert_eq!(fit_split_to_capacity((28, 3), (1, 30)), (1, 30));
        assert_eq!(fit_split_to_capacity((2, 8), (20, 5)), (5, 5));
    }

    #[test]
    fn test_fit_split_drops_only_when_both_pools_full() {
        assert_eq!(fit_split_to_capacity((6, 4), (3, 2)), (3, 2));
        assert_eq!(fit_split_to_capacity((6, 4), (6, 4)), (6, 4));
        assert_eq!(fit_split_to_capacity((0, 0), (0, 0)), (0, 0));
    }
}

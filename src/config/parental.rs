//! Parental leave parameter derivation.
//!
//! Parental leave is configured by four scalars (how long each gender's
//! leave lasts and what share of leave-takers each gender makes up). This
//! module turns them into the mean duration and gender split of an ordinary
//! leave category.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The category name the derivation is applied to.
pub const PARENTAL_LEAVE_CATEGORY: &str = "Parental Leave";

/// Allowed deviation, in percentage points, of the two shares from 100.
pub const SHARE_SUM_TOLERANCE: f64 = 1.0;

/// Fractions of a category's occurrences placed on each gender.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenderSplit {
    /// Fraction of occurrences placed on women (0-1).
    pub female_share: f64,
    /// Fraction of occurrences placed on men (0-1).
    pub male_share: f64,
}

/// The derived parameters of the parental leave category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParentalLeaveDerivation {
    /// Share-weighted mean duration, in months.
    pub mean_duration_months: f64,
    /// The gender split, as fractions.
    pub split: GenderSplit,
}

/// Derives the parental leave duration and gender split.
///
/// The mean duration is the share-weighted average of the two durations;
/// the split is the pair of shares converted from percentages to fractions.
///
/// # Arguments
///
/// * `female_duration_months` - Mean leave length for women
/// * `female_percentage` - Share of leave-takers who are women (0-100)
/// * `male_duration_months` - Mean leave length for men
/// * `male_percentage` - Share of leave-takers who are men (0-100)
///
/// # Errors
///
/// Returns `InvalidConfiguration` if a duration is not positive, a
/// percentage falls outside 0-100, or the percentages do not sum to 100
/// within [`SHARE_SUM_TOLERANCE`].
///
/// # Examples
///
/// ```
/// use leave_sim::config::derive_parental_leave;
///
/// let derived = derive_parental_leave(7.5, 60.0, 2.0, 40.0).unwrap();
/// assert!((derived.mean_duration_months - 5.3).abs() < 1e-9);
/// assert!((derived.split.female_share - 0.6).abs() < 1e-9);
/// assert!((derived.split.male_share - 0.4).abs() < 1e-9);
/// ```
pub fn derive_parental_leave(
    female_duration_months: f64,
    female_percentage: f64,
    male_duration_months: f64,
    male_percentage: f64,
) -> EngineResult<ParentalLeaveDerivation> {
    for (field, value) in [
        ("female_duration_months", female_duration_months),
        ("male_duration_months", male_duration_months),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(EngineError::invalid_config(
                format!("parental_leave_dynamic.{}", field),
                format!("must be a positive number of months, got {}", value),
            ));
        }
    }

    for (field, value) in [
        ("female_percentage", female_percentage),
        ("male_percentage", male_percentage),
    ] {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(EngineError::invalid_config(
                format!("parental_leave_dynamic.{}", field),
                format!("must be between 0 and 100, got {}", value),
            ));
        }
    }

    let total = female_percentage + male_percentage;
    if (total - 100.0).abs() > SHARE_SUM_TOLERANCE {
        return Err(EngineError::invalid_config(
            "parental_leave_dynamic",
            format!(
                "female + male percentages = {:.1}%, should be 100%",
                total
            ),
        ));
    }

    let female_share = female_percentage / 100.0;
    let male_share = male_percentage / 100.0;

    Ok(ParentalLeaveDerivation {
        mean_duration_months: female_share * female_duration_months
            + male_share * male_duration_months,
        split: GenderSplit {
            female_share,
            male_share,
        },
    })
}

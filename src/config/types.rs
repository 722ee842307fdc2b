//! Configuration types for leave simulation.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML configuration files and the resolved [`SimulationConfig`] the engines
//! consume.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{GenderRestriction, Horizon, Period};

use super::parental::{GenderSplit, PARENTAL_LEAVE_CATEGORY, derive_parental_leave};

/// Default retry budget per occurrence.
pub const DEFAULT_MAX_ASSIGNMENT_ATTEMPTS: u32 = 300;
/// Default random seed.
pub const DEFAULT_RANDOM_SEED: u64 = 42;
/// Default relative spread of drawn durations around the mean.
pub const DEFAULT_DURATION_VARIABILITY: f64 = 0.15;
/// Default strength of the temporal evenness bias.
pub const DEFAULT_EVENNESS_STRENGTH: f64 = 1.0;
/// Default cap on leaves per person across all categories.
pub const DEFAULT_MAX_LEAVES_PER_PERSON: u32 = 3;

/// How a category's rate is turned into an occurrence count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetBasis {
    /// `rate × eligible × years`: the rate is the fraction of the eligible
    /// population starting this leave each year.
    #[default]
    Incidence,
    /// `rate × eligible × months / duration`: the rate is the fraction of
    /// the eligible population on this leave at any given time.
    SteadyState,
}

/// A leave category and its placement rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveCategory {
    /// Unique category name.
    pub name: String,
    /// Target rate in percent of the eligible population.
    pub rate_percent: f64,
    /// Mean leave length in months.
    pub duration_months: f64,
    /// Which people may take this leave.
    #[serde(default)]
    pub gender: GenderRestriction,
    /// Maximum occurrences of this category per person over the horizon.
    #[serde(default = "default_max_per_person")]
    pub max_per_person: u32,
    /// Whether a leave may start late enough to run past the horizon end,
    /// in which case it is clipped to the horizon.
    #[serde(default)]
    pub allow_clipping: bool,
    /// Per-gender share of occurrences, set by the parental leave
    /// derivation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_split: Option<GenderSplit>,
}

fn default_max_per_person() -> u32 {
    1
}

impl LeaveCategory {
    /// Creates an unrestricted category with one occurrence per person.
    pub fn new(name: impl Into<String>, rate_percent: f64, duration_months: f64) -> Self {
        Self {
            name: name.into(),
            rate_percent,
            duration_months,
            gender: GenderRestriction::Any,
            max_per_person: default_max_per_person(),
            allow_clipping: false,
            gender_split: None,
        }
    }

    /// Sets the gender restriction.
    pub fn with_gender(mut self, gender: GenderRestriction) -> Self {
        self.gender = gender;
        self
    }

    /// Sets the per-person cap.
    pub fn with_max_per_person(mut self, max_per_person: u32) -> Self {
        self.max_per_person = max_per_person;
        self
    }

    /// Sets the clipping policy.
    pub fn with_clipping(mut self, allow_clipping: bool) -> Self {
        self.allow_clipping = allow_clipping;
        self
    }

    /// Sets the gender split.
    pub fn with_gender_split(mut self, split: GenderSplit) -> Self {
        self.gender_split = Some(split);
        self
    }

    /// Nominal span in whole months (rounded mean duration, at least one).
    pub fn nominal_span_months(&self) -> u32 {
        self.duration_months.round().max(1.0) as u32
    }

    fn validate(&self, horizon: &Horizon) -> EngineResult<()> {
        let field = |name: &str| format!("leave_types[{}].{}", self.name, name);

        if self.name.trim().is_empty() {
            return Err(EngineError::invalid_config(
                "leave_types.name",
                "category name must not be empty",
            ));
        }
        if !self.rate_percent.is_finite() || !(0.0..=100.0).contains(&self.rate_percent) {
            return Err(EngineError::invalid_config(
                field("rate_percent"),
                format!("must be between 0 and 100, got {}", self.rate_percent),
            ));
        }
        if !self.duration_months.is_finite() || self.duration_months <= 0.0 {
            return Err(EngineError::invalid_config(
                field("duration_months"),
                format!("must be positive, got {}", self.duration_months),
            ));
        }
        if self.max_per_person == 0 {
            return Err(EngineError::invalid_config(
                field("max_per_person"),
                "must be at least 1",
            ));
        }
        if !self.allow_clipping && self.nominal_span_months() as usize > horizon.len_months() {
            return Err(EngineError::invalid_config(
                field("duration_months"),
                format!(
                    "{} months always overruns the {}-month horizon and clipping is not allowed",
                    self.nominal_span_months(),
                    horizon.len_months()
                ),
            ));
        }
        if let Some(split) = &self.gender_split {
            if self.gender != GenderRestriction::Any {
                return Err(EngineError::invalid_config(
                    field("gender_split"),
                    "a gender split requires an unrestricted category",
                ));
            }
            let shares_valid = [split.female_share, split.male_share]
                .iter()
                .all(|s| s.is_finite() && (0.0..=1.0).contains(s));
            if !shares_valid || (split.female_share + split.male_share - 1.0).abs() > 0.01 {
                return Err(EngineError::invalid_config(
                    field("gender_split"),
                    "shares must lie in 0-1 and sum to 1",
                ));
            }
        }
        Ok(())
    }
}

/// `simulation:` section: the horizon bounds.
#[derive(Debug, Clone, Deserialize)]
pub struct HorizonSettings {
    /// First month, `YYYY-MM`.
    pub start_date: String,
    /// Last month, `YYYY-MM`.
    pub end_date: String,
}

/// `assignment:` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssignmentSettings {
    /// Retry budget per occurrence.
    pub max_assignment_attempts: u32,
    /// Seed for the placement RNG.
    pub random_seed: u64,
    /// Relative spread of drawn durations (0.15 = ±15%).
    pub duration_variability: f64,
    /// Strength of the evenness bias; 0 disables it.
    pub evenness_strength: f64,
    /// How rates translate into occurrence counts.
    pub target_basis: TargetBasis,
}

impl Default for AssignmentSettings {
    fn default() -> Self {
        Self {
            max_assignment_attempts: DEFAULT_MAX_ASSIGNMENT_ATTEMPTS,
            random_seed: DEFAULT_RANDOM_SEED,
            duration_variability: DEFAULT_DURATION_VARIABILITY,
            evenness_strength: DEFAULT_EVENNESS_STRENGTH,
            target_basis: TargetBasis::default(),
        }
    }
}

/// `crew:` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrewSettings {
    /// Cap on leaves per person across all categories.
    pub max_leaves_per_person: u32,
}

impl Default for CrewSettings {
    fn default() -> Self {
        Self {
            max_leaves_per_person: DEFAULT_MAX_LEAVES_PER_PERSON,
        }
    }
}

/// `parental_leave_dynamic:` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParentalLeaveSettings {
    /// Mean leave length for women, in months.
    pub female_duration_months: f64,
    /// Share of leave-takers who are women, in percent.
    pub female_percentage: f64,
    /// Mean leave length for men, in months.
    pub male_duration_months: f64,
    /// Share of leave-takers who are men, in percent.
    pub male_percentage: f64,
}

impl Default for ParentalLeaveSettings {
    fn default() -> Self {
        Self {
            female_duration_months: 7.5,
            female_percentage: 60.0,
            male_duration_months: 2.0,
            male_percentage: 40.0,
        }
    }
}

/// Contents of `simulation.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationSettings {
    /// Horizon bounds.
    pub simulation: HorizonSettings,
    /// Placement parameters.
    #[serde(default)]
    pub assignment: AssignmentSettings,
    /// Crew-wide caps.
    #[serde(default)]
    pub crew: CrewSettings,
    /// Parental leave derivation inputs.
    #[serde(default)]
    pub parental_leave_dynamic: Option<ParentalLeaveSettings>,
}

/// Contents of `leave_types.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesConfig {
    /// Categories in processing order.
    pub leave_types: Vec<LeaveCategory>,
}

/// The resolved, validated simulation configuration.
///
/// # Example
///
/// ```
/// use leave_sim::config::{LeaveCategory, SimulationConfig};
/// use leave_sim::models::{GenderRestriction, Horizon};
///
/// let horizon = Horizon::new("2025-01".parse().unwrap(), "2025-12".parse().unwrap()).unwrap();
/// let config = SimulationConfig::new(
///     horizon,
///     vec![LeaveCategory::new("Maternity Leave", 10.0, 3.0).with_gender(GenderRestriction::Female)],
/// );
/// assert!(config.validate().is_ok());
/// assert!(config.category("Maternity Leave").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Months over which leave is placed and measured.
    pub horizon: Horizon,
    /// Categories in processing order.
    pub categories: Vec<LeaveCategory>,
    /// Cap on leaves per person across all categories.
    pub max_leaves_per_person: u32,
    /// Retry budget per occurrence.
    pub max_assignment_attempts: u32,
    /// Seed for the placement RNG.
    pub random_seed: u64,
    /// Relative spread of drawn durations.
    pub duration_variability: f64,
    /// Strength of the evenness bias; 0 disables it.
    pub evenness_strength: f64,
    /// How rates translate into occurrence counts.
    pub target_basis: TargetBasis,
}

/// Parses a horizon bound from the settings file.
fn parse_bound(field: &str, value: &str) -> EngineResult<Period> {
    value.parse().map_err(|err| match err {
        EngineError::InvalidPeriod { value, message } => {
            EngineError::invalid_config(field, format!("'{}': {}", value, message))
        }
        other => other,
    })
}

impl SimulationConfig {
    /// Creates a configuration with default placement parameters.
    pub fn new(horizon: Horizon, categories: Vec<LeaveCategory>) -> Self {
        Self {
            horizon,
            categories,
            max_leaves_per_person: DEFAULT_MAX_LEAVES_PER_PERSON,
            max_assignment_attempts: DEFAULT_MAX_ASSIGNMENT_ATTEMPTS,
            random_seed: DEFAULT_RANDOM_SEED,
            duration_variability: DEFAULT_DURATION_VARIABILITY,
            evenness_strength: DEFAULT_EVENNESS_STRENGTH,
            target_basis: TargetBasis::default(),
        }
    }

    /// Resolves the file-level settings into a validated configuration,
    /// applying the parental leave derivation.
    pub fn resolve(
        settings: SimulationSettings,
        leave_types: Vec<LeaveCategory>,
    ) -> EngineResult<Self> {
        let start = parse_bound("simulation.start_date", &settings.simulation.start_date)?;
        let end = parse_bound("simulation.end_date", &settings.simulation.end_date)?;
        let horizon = Horizon::new(start, end)?;

        let mut categories = leave_types;
        if let Some(dynamic) = &settings.parental_leave_dynamic {
            let derived = derive_parental_leave(
                dynamic.female_duration_months,
                dynamic.female_percentage,
                dynamic.male_duration_months,
                dynamic.male_percentage,
            )?;

            match categories
                .iter_mut()
                .find(|c| c.name == PARENTAL_LEAVE_CATEGORY)
            {
                Some(category) => {
                    category.duration_months = derived.mean_duration_months;
                    category.gender = GenderRestriction::Any;
                    category.gender_split = Some(derived.split);
                    info!(
                        female_share = derived.split.female_share,
                        male_share = derived.split.male_share,
                        weighted_duration = derived.mean_duration_months,
                        "Derived parental leave parameters"
                    );
                }
                None => warn!(
                    "parental_leave_dynamic is set but no '{}' category is configured",
                    PARENTAL_LEAVE_CATEGORY
                ),
            }
        }

        let config = Self {
            horizon,
            categories,
            max_leaves_per_person: settings.crew.max_leaves_per_person,
            max_assignment_attempts: settings.assignment.max_assignment_attempts,
            random_seed: settings.assignment.random_seed,
            duration_variability: settings.assignment.duration_variability,
            evenness_strength: settings.assignment.evenness_strength,
            target_basis: settings.assignment.target_basis,
        };
        config.validate()?;
        Ok(config)
    }

    /// Looks a category up by name.
    pub fn category(&self, name: &str) -> Option<&LeaveCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Returns a copy with a different random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Checks every parameter, failing on the first inconsistency.
    pub fn validate(&self) -> EngineResult<()> {
        if self.categories.is_empty() {
            return Err(EngineError::invalid_config(
                "leave_types",
                "at least one leave category is required",
            ));
        }
        if self.max_leaves_per_person == 0 {
            return Err(EngineError::invalid_config(
                "crew.max_leaves_per_person",
                "must be at least 1",
            ));
        }
        if self.max_assignment_attempts == 0 {
            return Err(EngineError::invalid_config(
                "assignment.max_assignment_attempts",
                "must be at least 1",
            ));
        }
        if !self.duration_variability.is_finite() || !(0.0..1.0).contains(&self.duration_variability)
        {
            return Err(EngineError::invalid_config(
                "assignment.duration_variability",
                format!("must be in [0, 1), got {}", self.duration_variability),
            ));
        }
        if !self.evenness_strength.is_finite() || self.evenness_strength < 0.0 {
            return Err(EngineError::invalid_config(
                "assignment.evenness_strength",
                format!("must be non-negative, got {}", self.evenness_strength),
            ));
        }

        let mut names = HashSet::new();
        for category in &self.categories {
            if !names.insert(category.name.as_str()) {
                return Err(EngineError::invalid_config(
                    "leave_types.name",
                    format!("duplicate category '{}'", category.name),
                ));
            }
            category.validate(&self.horizon)?;
        }
        Ok(())
    }
}

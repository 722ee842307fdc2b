//! Configuration loading and resolution for the leave simulation engine.
//!
//! This module loads simulation settings and leave categories from YAML
//! files, applies the parental leave derivation, and validates the result
//! into a [`SimulationConfig`].
//!
//! # Example
//!
//! ```no_run
//! use leave_sim::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap().into_config();
//! println!("{} leave categories", config.categories.len());
//! ```

mod loader;
mod parental;
mod types;

pub use loader::{ConfigLoader, LEAVE_TYPES_FILE, SIMULATION_FILE};
pub use parental::{
    GenderSplit, PARENTAL_LEAVE_CATEGORY, ParentalLeaveDerivation, SHARE_SUM_TOLERANCE,
    derive_parental_leave,
};
pub use types::{
    AssignmentSettings, CrewSettings, DEFAULT_DURATION_VARIABILITY, DEFAULT_EVENNESS_STRENGTH,
    DEFAULT_MAX_ASSIGNMENT_ATTEMPTS, DEFAULT_MAX_LEAVES_PER_PERSON, DEFAULT_RANDOM_SEED,
    HorizonSettings, LeaveCategory, LeaveTypesConfig, ParentalLeaveSettings, SimulationConfig,
    SimulationSettings, TargetBasis,
};

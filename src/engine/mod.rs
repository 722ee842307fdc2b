//! The leave assignment engine.
//!
//! Given a roster and a [`SimulationConfig`](crate::config::SimulationConfig),
//! [`generate`] places leave occurrences on people so that each category
//! approaches its target rate, no person holds two overlapping leaves, caps
//! are respected and load is spread evenly across the horizon. The run is
//! deterministic for a given seed.

mod generator;
mod placement;
mod targets;

pub use generator::{generate, generate_with_existing};
pub use targets::{
    OccurrenceTarget, expected_occurrences, fit_split_to_capacity, split_target,
    target_occurrences,
};

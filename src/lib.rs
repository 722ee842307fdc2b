//! Synthetic leave generation and coverage analysis for manpower planning.
//!
//! This crate places leave occurrences (maternity, long-term sickness,
//! unpaid and parental leave, or any configured category) on a roster over
//! a multi-year horizon so that each category approaches a target rate, and
//! measures the time-weighted coverage the placed leave actually achieves.
//!
//! # Example
//!
//! ```no_run
//! use leave_sim::analysis::analyze;
//! use leave_sim::config::ConfigLoader;
//! use leave_sim::engine::generate;
//! use leave_sim::models::Roster;
//!
//! let config = ConfigLoader::load("./config/default")?.into_config();
//! let roster = Roster::sample(100, 0.6);
//!
//! let result = generate(&roster, &config)?;
//! let report = analyze(&result.assignments, &config, &config.horizon, &roster.headcount())?;
//! for category in &report.categories {
//!     println!("{}: {:.2}%", category.category, category.actual_percent);
//! }
//! # Ok::<(), leave_sim::error::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod analysis;
pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;

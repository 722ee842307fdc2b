//! Core data models for the leave simulation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod assignment;
mod coverage;
mod period;
mod person;
mod simulation_result;

pub use assignment::{Assignment, DAYS_PER_MONTH};
pub use coverage::{
    CoverageReport, CoverageResult, CoverageSummary, LedgerEntry, MonthlyLedger, MonthlyLedgerRow,
};
pub use period::{Horizon, Period};
pub use person::{EmploymentStatus, Gender, GenderRestriction, Headcount, Person, Roster};
pub use simulation_result::{
    AuditStep, CategoryAllocation, GenerationResult, UnderAllocationWarning,
};

//! Coverage analysis of leave assignments.
//!
//! [`analyze`] turns a set of assignments into per-category time-weighted
//! coverage with an overall summary and a per-assignment ledger;
//! [`monthly_ledger`] tabulates person-months on leave per horizon month.
//! Both are pure and never modify the assignments they read.

mod coverage;
mod ledger;

pub use coverage::{analyze, eligible_population};
pub use ledger::monthly_ledger;

//! Request types for the leave simulation API.
//!
//! This module defines the JSON request structures for the `/simulate` and
//! `/analyze` endpoints.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{Assignment, EmploymentStatus, Gender, Person, Roster};

/// Request body for the `/simulate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// The people to place leave on.
    pub roster: Vec<PersonRequest>,
    /// Overrides the configured random seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Leave the roster already holds.
    #[serde(default)]
    pub existing: Vec<Assignment>,
}

/// Request body for the `/analyze` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// The population coverage is measured against.
    pub roster: Vec<PersonRequest>,
    /// The assignments to measure.
    pub assignments: Vec<Assignment>,
}

/// A person in a request roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRequest {
    /// Unique identifier for the person.
    pub id: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Recorded gender; missing means unspecified.
    #[serde(default = "default_gender")]
    pub gender: Gender,
    /// Employment status; missing means active.
    #[serde(default)]
    pub status: EmploymentStatus,
}

fn default_gender() -> Gender {
    Gender::Unspecified
}

impl From<PersonRequest> for Person {
    fn from(req: PersonRequest) -> Self {
        Person {
            id: req.id,
            name: req.name,
            gender: req.gender,
            status: req.status,
        }
    }
}

/// Builds a validated roster from request people.
pub(crate) fn into_roster(people: Vec<PersonRequest>) -> EngineResult<Roster> {
    Roster::new(people.into_iter().map(Into::into).collect())
}

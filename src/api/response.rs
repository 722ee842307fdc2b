//! Response types for the leave simulation API.
//!
//! This module defines the simulation response body, the error response
//! structures and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    Assignment, AuditStep, CategoryAllocation, CoverageReport, UnderAllocationWarning,
};

/// Response body for the `/simulate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResponse {
    /// Unique identifier of this run.
    pub simulation_id: Uuid,
    /// When the run completed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the run.
    pub engine_version: String,
    /// The seed the run used.
    pub seed: u64,
    /// Placed assignments.
    pub assignments: Vec<Assignment>,
    /// Categories that fell short of their target.
    pub warnings: Vec<UnderAllocationWarning>,
    /// Per-category placement statistics.
    pub allocations: Vec<CategoryAllocation>,
    /// Coverage achieved by the placed assignments.
    pub coverage: CoverageReport,
    /// Engine decisions.
    pub audit_trace: Vec<AuditStep>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfiguration { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_CONFIGURATION",
                    format!("Invalid configuration '{}': {}", field, message),
                    "The simulation configuration is inconsistent",
                ),
            },
            EngineError::NoEligiblePopulation {
                category,
                restriction,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "NO_ELIGIBLE_POPULATION",
                    format!("No eligible population for category '{}'", category),
                    format!("Nobody on the roster satisfies restriction '{}'", restriction),
                ),
            },
            EngineError::UnknownCategory { category } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "UNKNOWN_CATEGORY",
                    format!("Unknown leave category: {}", category),
                    "Assignments must use a configured leave category",
                ),
            },
            EngineError::InvalidRoster { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_ROSTER",
                    format!("Invalid roster field '{}': {}", field, message),
                    "The roster contains invalid information",
                ),
            },
            EngineError::InvalidPeriod { value, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(format!(
                    "Invalid period '{}': {}",
                    value, message
                )),
            },
        }
    }
}

//! HTTP API module for the leave simulation engine.
//!
//! This module provides the REST endpoints for generating leave assignments
//! (`POST /simulate`) and measuring the coverage of a set of assignments
//! (`POST /analyze`).

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AnalysisRequest, PersonRequest, SimulationRequest};
pub use response::{ApiError, SimulationResponse};
pub use state::AppState;

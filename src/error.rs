//! Error types for the leave simulation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every fatal condition the engine can hit. Soft conditions, such as
//! occurrences that could not be placed within the retry budget, are
//! reported as data on the result instead.

use thiserror::Error;

/// The main error type for the leave simulation engine.
///
/// # Example
///
/// ```
/// use leave_sim::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/simulation.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/simulation.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value is missing, out of range, or inconsistent.
    #[error("Invalid configuration '{field}': {message}")]
    InvalidConfiguration {
        /// The offending field, e.g. `leave_types[Maternity Leave].rate_percent`.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// A category has nobody on the roster who could ever take it.
    #[error("No eligible population for category '{category}' (restriction: {restriction})")]
    NoEligiblePopulation {
        /// The category name.
        category: String,
        /// The restriction that emptied the pool.
        restriction: String,
    },

    /// An assignment references a category that is not configured.
    #[error("Unknown leave category: {category}")]
    UnknownCategory {
        /// The category name found on the assignment.
        category: String,
    },

    /// A roster record was invalid or duplicated.
    #[error("Invalid roster field '{field}': {message}")]
    InvalidRoster {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A period string could not be parsed.
    #[error("Invalid period '{value}': {message}")]
    InvalidPeriod {
        /// The raw value.
        value: String,
        /// A description of the parse failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors caused by the simulation configuration
    /// rather than by the roster or by malformed input values.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::ConfigNotFound { .. }
                | EngineError::ConfigParseError { .. }
                | EngineError::InvalidConfiguration { .. }
                | EngineError::NoEligiblePopulation { .. }
                | EngineError::UnknownCategory { .. }
        )
    }

    pub(crate) fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_no_eligible_population_displays_category_and_restriction() {
        let error = EngineError::NoEligiblePopulation {
            category: "Maternity Leave".to_string(),
            restriction: "female".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "No eligible population for category 'Maternity Leave' (restriction: female)"
        );
    }

    #[test]
    fn test_unknown_category_displays_name() {
        let error = EngineError::UnknownCategory {
            category: "Sabbatical".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown leave category: Sabbatical");
    }

    #[test]
    fn test_invalid_roster_displays_field_and_message() {
        let error = EngineError::InvalidRoster {
            field: "id".to_string(),
            message: "duplicate id 'F001'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid roster field 'id': duplicate id 'F001'"
        );
    }

    #[test]
    fn test_configuration_errors_are_classified() {
        assert!(EngineError::invalid_config("horizon", "empty").is_configuration_error());
        assert!(
            EngineError::UnknownCategory {
                category: "x".to_string()
            }
            .is_configuration_error()
        );
        assert!(
            !EngineError::InvalidRoster {
                field: "id".to_string(),
                message: "empty".to_string()
            }
            .is_configuration_error()
        );
        assert!(
            !EngineError::InvalidPeriod {
                value: "2025-13".to_string(),
                message: "bad month".to_string()
            }
            .is_configuration_error()
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn fails() -> EngineResult<()> {
            Err(EngineError::invalid_config("assignment.max_assignment_attempts", "must be >= 1"))
        }

        fn propagates_error() -> EngineResult<()> {
            fails()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

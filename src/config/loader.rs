//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading simulation
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{LeaveTypesConfig, SimulationConfig, SimulationSettings};

/// Name of the file holding horizon, assignment and crew settings.
pub const SIMULATION_FILE: &str = "simulation.yaml";
/// Name of the file holding the ordered leave categories.
pub const LEAVE_TYPES_FILE: &str = "leave_types.yaml";

/// Loads and provides access to a resolved simulation configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── simulation.yaml   # Horizon, assignment, crew and parental settings
/// └── leave_types.yaml  # Leave categories, in processing order
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_sim::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Horizon: {} months", loader.config().horizon.len_months());
/// # Ok::<(), leave_sim::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SimulationConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Either file is missing (`ConfigNotFound`)
    /// - Either file contains invalid YAML (`ConfigParseError`)
    /// - The resolved configuration is inconsistent (`InvalidConfiguration`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<SimulationSettings>(&path.join(SIMULATION_FILE))?;
        let leave_types = Self::load_yaml::<LeaveTypesConfig>(&path.join(LEAVE_TYPES_FILE))?;

        let config = SimulationConfig::resolve(settings, leave_types.leave_types)?;
        info!(
            path = %path.display(),
            categories = config.categories.len(),
            horizon_months = config.horizon.len_months(),
            "Loaded simulation configuration"
        );

        Ok(Self { config })
    }

    /// Builds a configuration from the contents of the two YAML files.
    pub fn from_yaml_str(simulation: &str, leave_types: &str) -> EngineResult<Self> {
        let settings = Self::parse_yaml::<SimulationSettings>(SIMULATION_FILE, simulation)?;
        let leave_types = Self::parse_yaml::<LeaveTypesConfig>(LEAVE_TYPES_FILE, leave_types)?;
        let config = SimulationConfig::resolve(settings, leave_types.leave_types)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&path_str, &content)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(path: &str, content: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the resolved configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Consumes the loader, returning the resolved configuration.
    pub fn into_config(self) -> SimulationConfig {
        self.config
    }
}

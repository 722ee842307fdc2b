//! Application state for the leave simulation API.

use std::borrow::Cow;
use std::sync::Arc;

use crate::config::{ConfigLoader, SimulationConfig};

/// Shared application state.
///
/// Holds the loaded simulation configuration, which is read-only for the
/// lifetime of the server.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// The simulation configuration, with the seed replaced if one is given.
    pub fn simulation_config(&self, seed: Option<u64>) -> Cow<'_, SimulationConfig> {
        let config = self.config.config();
        match seed {
            Some(seed) if seed != config.random_seed => {
                Cow::Owned(config.clone().with_seed(seed))
            }
            _ => Cow::Borrowed(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(ConfigLoader::load("./config/default").unwrap())
    }

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_seed_override() {
        let state = state();
        assert_eq!(state.simulation_config(None).random_seed, 42);
        assert!(matches!(state.simulation_config(Some(42)), Cow::Borrowed(_)));

        let overridden = state.simulation_config(Some(9));
        assert_eq!(overridden.random_seed, 9);
        assert_eq!(overridden.categories, state.config().config().categories);
    }
}

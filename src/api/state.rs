//! Application state for the shift ledger API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::source::{InMemoryShiftSource, ShiftDataSource};

/// Shared application state.
///
/// Contains the loaded engine configuration and the shift data source.
#[derive(Clone)]
pub struct AppState {
    config: Arc<EngineConfig>,
    source: Arc<dyn ShiftDataSource>,
}

impl AppState {
    /// Creates a new application state over the given data source.
    pub fn new(config: EngineConfig, source: Arc<dyn ShiftDataSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
        }
    }

    /// Creates a state backed by an empty in-memory source.
    pub fn in_memory(config: EngineConfig) -> Self {
        let source = Arc::new(InMemoryShiftSource::from_config(&config));
        Self::new(config, source)
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the shift data source.
    pub fn source(&self) -> &dyn ShiftDataSource {
        self.source.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Required for axum state
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}

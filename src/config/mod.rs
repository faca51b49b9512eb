//! Configuration loading and management for the shift ledger engine.
//!
//! This module provides functionality to load engine settings and the shift
//! type catalog from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use shift_ledger::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Shift types: {}", config.config().catalog().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, EngineSettings, ShiftTypesConfig};

//! Configuration types for the shift ledger engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::calculation::{DEFAULT_DISPLAY_COUNT, ShabbatWindow};
use crate::models::{ShiftTypeCatalog, ShiftTypeDefinition, WorkplaceRateProfile};

/// Engine settings file structure (`engine.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Number of non-active shifts in the recent activity list.
    #[serde(default = "default_display_count")]
    pub display_count: usize,
    /// Rates for the selected workplace.
    pub rate_profile: WorkplaceRateProfile,
    /// Hours bounding the Shabbat window.
    #[serde(default)]
    pub shabbat: ShabbatWindow,
    /// Whether weekly batch creation is available.
    #[serde(default)]
    pub weekly_batch_allowed: bool,
}

fn default_display_count() -> usize {
    DEFAULT_DISPLAY_COUNT
}

/// Shift types file structure (`shift_types.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftTypesConfig {
    /// The shift type definitions.
    pub shift_types: Vec<ShiftTypeDefinition>,
}

/// Complete engine configuration.
///
/// This is the top-level configuration structure that combines the engine
/// settings with the shift type catalog.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: EngineSettings,
    catalog: ShiftTypeCatalog,
}

impl EngineConfig {
    /// Creates a new `EngineConfig` from its component parts.
    pub fn new(settings: EngineSettings, catalog: ShiftTypeCatalog) -> Self {
        Self { settings, catalog }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the shift type catalog.
    pub fn catalog(&self) -> &ShiftTypeCatalog {
        &self.catalog
    }

    /// Returns the workplace rate profile.
    pub fn rate_profile(&self) -> &WorkplaceRateProfile {
        &self.settings.rate_profile
    }

    /// Returns the recent list display count.
    pub fn display_count(&self) -> usize {
        self.settings.display_count
    }

    /// Returns the Shabbat window.
    pub fn shabbat_window(&self) -> &ShabbatWindow {
        &self.settings.shabbat
    }

    /// Returns whether weekly batch creation is allowed.
    pub fn weekly_batch_allowed(&self) -> bool {
        self.settings.weekly_batch_allowed
    }
}

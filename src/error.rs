//! Error types for the shift ledger engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving, classifying and
//! costing shifts.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the shift ledger engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use shift_ledger::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
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

    /// A shift type code was not found in the catalog.
    #[error("Shift type not found: {code}")]
    ShiftTypeNotFound {
        /// The shift type code that was not found.
        code: String,
    },

    /// A shift with the given id does not exist in the data source.
    #[error("Shift not found: {id}")]
    ShiftNotFound {
        /// The id that was looked up.
        id: u64,
    },

    /// A raw time-of-day value could not be normalized to `HH:MM`.
    #[error("Invalid time of day: '{value}'")]
    InvalidTimeOfDay {
        /// The raw value as received.
        value: String,
    },

    /// A shift's start or end instant could not be determined.
    ///
    /// This is non-fatal for classification: the record is treated as ended.
    #[error("Unresolvable span for shift {shift_id}: {reason}")]
    UnresolvableSpan {
        /// The id of the shift.
        shift_id: u64,
        /// What was missing or malformed.
        reason: String,
    },

    /// Overtime hours were present but no overtime rate could be resolved.
    #[error("No overtime rate resolvable for shift {shift_id} with {overtime_hours} overtime hours")]
    RateResolution {
        /// The id of the shift, or 0 for a standalone computation.
        shift_id: u64,
        /// The overtime hours that could not be costed.
        overtime_hours: Decimal,
    },

    /// A field of a shift or earnings input failed validation.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The caller is not permitted to use a gated feature.
    #[error("Feature not available: {feature}")]
    FeatureLocked {
        /// The name of the gated feature.
        feature: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

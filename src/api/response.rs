//! Response types for the shift ledger API.
//!
//! This module defines the JSON views returned by the handlers, the error
//! response structure, and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calculation::SpanPay;
use crate::error::EngineError;
use crate::models::{
    ClassifiedShift, EarningsBreakdown, PeriodSummary, ResolvedSpan, ShiftKind, ShiftPalette,
    ShiftRecord, ShiftState, ShiftTypeDefinition,
};

/// A shift type with its presentation hints.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftTypeView {
    /// The catalog entry.
    #[serde(flatten)]
    pub definition: ShiftTypeDefinition,
    /// The well-known kind of this type.
    pub kind: ShiftKind,
    /// Icon and accent colour.
    pub palette: ShiftPalette,
}

impl From<ShiftTypeDefinition> for ShiftTypeView {
    fn from(definition: ShiftTypeDefinition) -> Self {
        let kind = definition.kind();
        Self {
            definition,
            kind,
            palette: kind.palette(),
        }
    }
}

/// A classified shift with its derived figures.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftView {
    /// The stored record.
    #[serde(flatten)]
    pub record: ShiftRecord,
    /// The resolved span, if any.
    pub span: Option<ResolvedSpan>,
    /// State at the evaluation instant.
    pub state: ShiftState,
    /// Icon and accent colour for the shift's type.
    pub palette: ShiftPalette,
    /// Base, overtime and tip earnings.
    pub earnings: EarningsBreakdown,
    /// Span priced with the Shabbat premium, if the span resolved.
    pub span_pay: Option<SpanPay>,
}

impl ShiftView {
    /// Builds a view from a classified shift and its computed figures.
    pub fn new(
        shift: ClassifiedShift,
        earnings: EarningsBreakdown,
        span_pay: Option<SpanPay>,
    ) -> Self {
        let kind = shift
            .record
            .shift_type_code
            .as_deref()
            .map_or(ShiftKind::Custom, ShiftKind::from_code);
        Self {
            record: shift.record,
            span: shift.span,
            state: shift.state,
            palette: kind.palette(),
            earnings,
            span_pay,
        }
    }
}

/// Response body for `GET /summary`.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    /// The evaluation instant.
    pub now: NaiveDateTime,
    /// Active shift first, then the most recent others.
    pub recent: Vec<ShiftView>,
    /// Totals since the start of the week.
    pub week: PeriodSummary,
    /// Totals since the start of the month.
    pub month: PeriodSummary,
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
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::ShiftTypeNotFound { code } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "SHIFT_TYPE_NOT_FOUND",
                    message,
                    format!("The shift type '{}' is not in the catalog", code),
                ),
            ),
            EngineError::ShiftNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("SHIFT_NOT_FOUND", message),
            ),
            EngineError::InvalidTimeOfDay { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_TIME", message),
            ),
            EngineError::UnresolvableSpan { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "UNRESOLVABLE_SPAN",
                    message,
                    "Provide start and end times or a shift type with defaults",
                ),
            ),
            EngineError::RateResolution { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "RATE_RESOLUTION",
                    message,
                    "Set an overtime rate on the shift or in the rate profile",
                ),
            ),
            EngineError::InvalidInput { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::validation_error(message))
            }
            EngineError::FeatureLocked { .. } => (
                StatusCode::FORBIDDEN,
                ApiError::new("FEATURE_LOCKED", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_engine_error_status_mapping() {
        let cases = vec![
            (EngineError::ShiftNotFound { id: 3 }, StatusCode::NOT_FOUND, "SHIFT_NOT_FOUND"),
            (
                EngineError::RateResolution {
                    shift_id: 3,
                    overtime_hours: Decimal::ONE,
                },
                StatusCode::UNPROCESSABLE_ENTITY,
                "RATE_RESOLUTION",
            ),
            (
                EngineError::invalid_input("tip_amount", "must not be negative"),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                EngineError::FeatureLocked {
                    feature: "weekly_batch".to_string(),
                },
                StatusCode::FORBIDDEN,
                "FEATURE_LOCKED",
            ),
            (
                EngineError::ConfigNotFound {
                    path: "engine.yaml".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
        ];

        for (engine_error, status, code) in cases {
            let api_error: ApiErrorResponse = engine_error.into();
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.error.code, code);
        }
    }

    #[test]
    fn test_shift_type_view_carries_palette() {
        let view = ShiftTypeView::from(ShiftTypeDefinition {
            code: "NIGHT".to_string(),
            name: "Night".to_string(),
            default_start: None,
            default_end: None,
            unpaid_break_minutes: 0,
            sort_order: 60,
        });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["code"], "NIGHT");
        assert_eq!(json["kind"], "night");
        assert!(json["palette"]["accent"].is_string());
    }
}

//! HTTP API module for the shift ledger engine.
//!
//! This module provides the REST endpoints for logging shifts, ending them,
//! recording tips and reading the dashboard summary.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ClockQuery, ShiftListQuery, TipRequest, WeeklyBatchRequest};
pub use response::{ApiError, ApiErrorResponse, ShiftTypeView, ShiftView, SummaryResponse};
pub use state::AppState;

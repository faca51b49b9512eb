//! HTTP request handlers for the shift ledger API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler reads the clock at most once and passes that instant through the
//! pure calculation functions.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    ShabbatWindow, aggregate_recent, calculate_span_pay, classify_pool, classify_record,
    compute_earnings, plan_week, project_dashboard,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ClassifiedShift, EarningsInput, ShiftDraft, ShiftRecord, ShiftTypeCatalog,
    WorkplaceRateProfile,
};
use crate::source::{DateRange, ShiftDataSource};

use super::request::{ClockQuery, ShiftListQuery, TipRequest, WeeklyBatchRequest};
use super::response::{ApiError, ApiErrorResponse, ShiftTypeView, ShiftView, SummaryResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shift-types", get(list_shift_types_handler))
        .route(
            "/shifts",
            get(list_shifts_handler).post(create_shift_handler),
        )
        .route("/shifts/weekly", post(weekly_batch_handler))
        .route(
            "/shifts/:id",
            put(update_shift_handler).delete(delete_shift_handler),
        )
        .route("/shifts/:id/end", post(end_shift_handler))
        .route("/shifts/:id/tip", post(tip_handler))
        .route("/summary", get(summary_handler))
        .route("/earnings", post(earnings_handler))
        .with_state(state)
}

/// Handler for GET /shift-types.
async fn list_shift_types_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Listing shift types");

    match state.source().list_shift_types() {
        Ok(definitions) => {
            let views: Vec<ShiftTypeView> = definitions.into_iter().map(Into::into).collect();
            json_response(StatusCode::OK, &views)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /shifts.
///
/// Returns every shift in the optional date range, classified against now.
async fn list_shifts_handler(
    State(state): State<AppState>,
    Query(query): Query<ShiftListQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let now = query.clock().resolve();
    info!(correlation_id = %correlation_id, now = %now, "Listing shifts");

    match list_shifts(&state, query.range(), now) {
        Ok(views) => {
            info!(correlation_id = %correlation_id, count = views.len(), "Listed shifts");
            json_response(StatusCode::OK, &views)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /shifts.
async fn create_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftDraft>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Creating shift");

    let draft = match payload {
        Ok(Json(draft)) => draft,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.source().create_shift(draft) {
        Ok(record) => {
            info!(correlation_id = %correlation_id, shift_id = record.id, "Shift created");
            json_response(StatusCode::CREATED, &record)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /shifts/weekly.
///
/// Creates one shift per selected day. Requires the weekly batch permission.
async fn weekly_batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<WeeklyBatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Creating weekly batch");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match create_weekly_batch(&state, &request) {
        Ok(records) => {
            info!(
                correlation_id = %correlation_id,
                first_day = %request.first_day,
                created = records.len(),
                "Weekly batch created"
            );
            json_response(StatusCode::CREATED, &records)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /shifts/:id.
async fn update_shift_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<ShiftDraft>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, shift_id = id, "Updating shift");

    let draft = match payload {
        Ok(Json(draft)) => draft,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.source().update_shift(id, draft) {
        Ok(record) => json_response(StatusCode::OK, &record),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /shifts/:id.
async fn delete_shift_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, shift_id = id, "Deleting shift");

    match state.source().delete_shift(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /shifts/:id/end.
///
/// Closes the shift at now and returns it classified at that instant.
async fn end_shift_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(clock): Query<ClockQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let now = clock.resolve();
    info!(correlation_id = %correlation_id, shift_id = id, now = %now, "Ending shift");

    match end_shift(&state, id, now) {
        Ok(view) => json_response(StatusCode::OK, &view),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /shifts/:id/tip.
async fn tip_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<TipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, shift_id = id, "Updating tip");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.source().add_or_update_tip(id, request.tip_amount) {
        Ok(record) => json_response(StatusCode::OK, &record),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /summary.
///
/// Returns the recent activity list with the week and month totals.
async fn summary_handler(
    State(state): State<AppState>,
    Query(clock): Query<ClockQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let now = clock.resolve();
    info!(correlation_id = %correlation_id, now = %now, "Building summary");

    match build_summary(&state, now) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                recent = summary.recent.len(),
                week_salary = %summary.week.projected_salary,
                month_salary = %summary.month.projected_salary,
                "Summary built"
            );
            json_response(StatusCode::OK, &summary)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /earnings.
///
/// Stateless earnings computation for an arbitrary input.
async fn earnings_handler(payload: Result<Json<EarningsInput>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Computing earnings");

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match compute_earnings(&input) {
        Ok(breakdown) => {
            info!(correlation_id = %correlation_id, total = %breakdown.total, "Earnings computed");
            json_response(StatusCode::OK, &breakdown)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Reads the catalog and rate profile from the data source.
fn load_context(
    source: &dyn ShiftDataSource,
) -> EngineResult<(ShiftTypeCatalog, WorkplaceRateProfile)> {
    let catalog = ShiftTypeCatalog::new(source.list_shift_types()?)?;
    let profile = source.rate_profile()?;
    Ok((catalog, profile))
}

/// Attaches earnings and Shabbat pricing to classified shifts.
fn build_views(
    shifts: Vec<ClassifiedShift>,
    profile: &WorkplaceRateProfile,
    window: &ShabbatWindow,
) -> EngineResult<Vec<ShiftView>> {
    shifts
        .into_iter()
        .map(|shift| {
            let earnings = compute_earnings(&EarningsInput::for_shift(&shift.record, profile))?;
            let span_pay = shift
                .span
                .as_ref()
                .map(|span| calculate_span_pay(span, profile, window))
                .transpose()?;
            Ok(ShiftView::new(shift, earnings, span_pay))
        })
        .collect()
}

fn list_shifts(
    state: &AppState,
    range: Option<DateRange>,
    now: NaiveDateTime,
) -> EngineResult<Vec<ShiftView>> {
    let source = state.source();
    let (catalog, profile) = load_context(source)?;
    let records = source.list_shifts(range)?;
    let classified = classify_pool(&records, &catalog, now);
    build_views(classified, &profile, state.config().shabbat_window())
}

fn create_weekly_batch(
    state: &AppState,
    request: &WeeklyBatchRequest,
) -> EngineResult<Vec<ShiftRecord>> {
    let source = state.source();
    let (catalog, _) = load_context(source)?;
    let drafts = plan_week(
        request.first_day,
        &request.selections,
        &catalog,
        state.config().weekly_batch_allowed(),
    )?;

    drafts
        .into_iter()
        .map(|draft| source.create_shift(draft))
        .collect()
}

fn end_shift(state: &AppState, id: u64, now: NaiveDateTime) -> EngineResult<ShiftView> {
    let source = state.source();
    let (catalog, profile) = load_context(source)?;
    let record = source.end_shift_now(id, now)?;
    let classified = classify_record(&record, &catalog, now);

    build_views(vec![classified], &profile, state.config().shabbat_window())?
        .pop()
        .ok_or(EngineError::ShiftNotFound { id })
}

fn build_summary(state: &AppState, now: NaiveDateTime) -> EngineResult<SummaryResponse> {
    let source = state.source();
    let (catalog, profile) = load_context(source)?;
    let records = source.list_shifts(None)?;

    let pool = classify_pool(&records, &catalog, now);
    let recent = aggregate_recent(&pool, state.config().display_count());
    let dashboard = project_dashboard(&records, &catalog, &profile, now)?;

    Ok(SummaryResponse {
        now,
        recent: build_views(recent, &profile, state.config().shabbat_window())?,
        week: dashboard.week,
        month: dashboard.month,
    })
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, &api_error.error)
}

/// Maps a JSON body rejection to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, &error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::in_memory(config.into_config())
    }

    async fn send(router: Router, method: &str, uri: &str, body: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("Content-Type", "application/json");
        }
        router
            .oneshot(
                builder
                    .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_list_shift_types_in_catalog_order() {
        let router = create_router(create_test_state());

        let response = send(router, "GET", "/shift-types", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let types = json.as_array().unwrap();
        assert_eq!(types.len(), 6);
        assert_eq!(types[0]["code"], "MORNING");
        assert_eq!(types[0]["palette"]["icon"], "sun");
        assert_eq!(types[5]["kind"], "night");
    }

    #[tokio::test]
    async fn test_create_shift_returns_201() {
        let router = create_router(create_test_state());

        let response = send(
            router,
            "POST",
            "/shifts",
            Some(r#"{ "date": "2026-01-15", "shift_type_code": "MORNING" }"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["id"], 1);
        assert_eq!(json["start_time"], "06:30");
        assert_eq!(
            json["base_hours"].as_str().map(|h| h.parse::<rust_decimal::Decimal>().unwrap()),
            Some(rust_decimal::Decimal::new(8, 0))
        );
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = send(router, "POST", "/shifts", Some("{ not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_earnings_rate_resolution_returns_422() {
        let router = create_router(create_test_state());

        let response = send(
            router,
            "POST",
            "/earnings",
            Some(r#"{ "base_hours": "4", "hourly_rate": "40", "overtime_hours": "1" }"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "RATE_RESOLUTION");
    }

    #[tokio::test]
    async fn test_delete_unknown_shift_returns_404() {
        let router = create_router(create_test_state());

        let response = send(router, "DELETE", "/shifts/99", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

//! HTTP request handlers for the attendance kiosk API.
//!
//! Kiosk routes are open; admin routes other than login sit behind a bearer
//! token check.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, Request, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::KioskError;
use crate::models::{
    AttendanceRecord, Employee, EmployeeProfile, LedgerSummary, NewEmployee, RecordFilter,
};
use crate::submission::{CancelSignal, CheckRequest};

use super::request::{
    LatePenaltyQuery, LoginRequest, RecordQuery, ReviewRequest, UpdatePinRequest,
    VerifyPinRequest,
};
use super::response::{ApiError, ApiErrorResponse, LatePenaltyResponse, LoginResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/logout", post(logout_handler))
        .route("/records", get(list_records_handler))
        .route("/records/:id/approve", post(approve_handler))
        .route("/records/:id/reject", post(reject_handler))
        .route("/summary", get(summary_handler))
        .route(
            "/employees",
            get(list_employees_handler).post(add_employee_handler),
        )
        .route("/employees/:id", delete(remove_employee_handler))
        .route("/employees/:id/pin", put(update_pin_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route("/login", post(login_handler));

    Router::new()
        .route("/kiosk/verify-pin", post(verify_pin_handler))
        .route("/kiosk/check-in", post(check_in_handler))
        .route("/kiosk/check-out", post(check_out_handler))
        .route("/kiosk/late-penalty", get(late_penalty_handler))
        .nest("/admin", admin)
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

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
    Err(ApiErrorResponse::bad_request(error))
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Parses an optional review body. Only an empty body means "no note"; any
/// body that is present must be well-formed JSON.
fn parse_review(
    headers: &HeaderMap,
    body: &Bytes,
    correlation_id: Uuid,
) -> ApiResult<ReviewRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ReviewRequest::default());
    }
    if !has_json_content_type(headers) {
        warn!(correlation_id = %correlation_id, "Review body sent without JSON content type");
        return Err(ApiErrorResponse::bad_request(ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        )));
    }
    parse_json(Json::from_bytes(body), correlation_id)
}

/// Logs a domain failure and converts it to a response.
fn failure(correlation_id: Uuid, err: KioskError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    err.into()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects admin requests that do not carry a live session token.
async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let authorized = match bearer_token(request.headers()) {
        Some(token) => state.auth().read().await.authorize(token),
        None => Err(KioskError::Unauthorized),
    };

    if let Err(err) = authorized {
        warn!(path = %request.uri().path(), "Admin request without a valid session");
        return Err(err.into());
    }
    Ok(next.run(request).await)
}

/// Handler for POST /kiosk/verify-pin.
async fn verify_pin_handler(
    State(state): State<AppState>,
    payload: Result<Json<VerifyPinRequest>, JsonRejection>,
) -> ApiResult<Json<EmployeeProfile>> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;

    let employee = state
        .submissions()
        .verify_pin(&request.pin)
        .await
        .map_err(|err| failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee.id,
        "PIN verified"
    );
    Ok(Json(EmployeeProfile::from(&employee)))
}

/// Handler for POST /kiosk/check-in.
async fn check_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AttendanceRecord>)> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing check-in");
    let request = parse_json(payload, correlation_id)?;

    let record = state
        .submissions()
        .check_in(request, CancelSignal::never())
        .await
        .map_err(|err| failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        record_id = %record.id,
        late_penalty = record.late_penalty,
        "Check-in completed"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for POST /kiosk/check-out.
async fn check_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> ApiResult<Json<AttendanceRecord>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing check-out");
    let request = parse_json(payload, correlation_id)?;

    let record = state
        .submissions()
        .check_out(request, CancelSignal::never())
        .await
        .map_err(|err| failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        record_id = %record.id,
        "Check-out completed"
    );
    Ok(Json(record))
}

/// Handler for GET /kiosk/late-penalty.
///
/// Previews the penalty for the given time, or for now when no time is given.
async fn late_penalty_handler(
    State(state): State<AppState>,
    Query(query): Query<LatePenaltyQuery>,
) -> ApiResult<Json<LatePenaltyResponse>> {
    let time = query.time().map_err(ApiErrorResponse::bad_request)?;
    let submissions = state.submissions();
    let time = submissions.resolve_time(time);

    Ok(Json(LatePenaltyResponse::new(
        time,
        submissions.preview_penalty(Some(time)),
    )))
}

/// Handler for POST /admin/login.
async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;

    let credentials = state.auth().read().await.credentials().clone();
    let LoginRequest { username, password } = request;

    tokio::task::spawn_blocking(move || credentials.verify(&username, &password))
        .await
        .map_err(|err| {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Credential check task failed"
            );
            ApiErrorResponse::internal(ApiError::with_details(
                "INTERNAL_ERROR",
                "Credential check did not complete",
                err.to_string(),
            ))
        })?
        .map_err(|err| failure(correlation_id, err))?;

    let token = state.auth().write().await.open_session();
    Ok(Json(LoginResponse { token }))
}

/// Handler for POST /admin/logout.
async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> StatusCode {
    if let Some(token) = bearer_token(&headers) {
        state.auth().write().await.logout(token);
    }
    StatusCode::NO_CONTENT
}

/// Handler for GET /admin/records.
async fn list_records_handler(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> ApiResult<Json<Vec<AttendanceRecord>>> {
    let filter = RecordFilter::try_from(query).map_err(ApiErrorResponse::bad_request)?;
    let store = state.store().read().await;

    Ok(Json(
        store.ledger().filter(&filter).into_iter().cloned().collect(),
    ))
}

/// Handler for GET /admin/summary.
async fn summary_handler(State(state): State<AppState>) -> Json<LedgerSummary> {
    Json(state.store().read().await.ledger().summary())
}

/// Handler for POST /admin/records/:id/approve.
async fn approve_handler(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<AttendanceRecord>> {
    let correlation_id = Uuid::new_v4();
    let note = parse_review(&headers, &body, correlation_id)?.note;

    let record = state
        .store()
        .write()
        .await
        .approve(&record_id, note.as_deref())
        .map_err(|err| failure(correlation_id, err))?;

    info!(correlation_id = %correlation_id, record_id = %record.id, "Record approved");
    Ok(Json(record))
}

/// Handler for POST /admin/records/:id/reject.
async fn reject_handler(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<AttendanceRecord>> {
    let correlation_id = Uuid::new_v4();
    let note = parse_review(&headers, &body, correlation_id)?
        .note
        .unwrap_or_default();

    let record = state
        .store()
        .write()
        .await
        .reject(&record_id, &note)
        .map_err(|err| failure(correlation_id, err))?;

    info!(correlation_id = %correlation_id, record_id = %record.id, "Record rejected");
    Ok(Json(record))
}

/// Handler for GET /admin/employees.
async fn list_employees_handler(State(state): State<AppState>) -> Json<Vec<Employee>> {
    Json(state.store().read().await.directory().all().to_vec())
}

/// Handler for POST /admin/employees.
async fn add_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let correlation_id = Uuid::new_v4();
    let new_employee = parse_json(payload, correlation_id)?;

    let employee = state
        .store()
        .write()
        .await
        .add_employee(new_employee)
        .map_err(|err| failure(correlation_id, err))?;

    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for DELETE /admin/employees/:id.
///
/// Unknown ids are a no-op.
async fn remove_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> impl IntoResponse {
    state.store().write().await.remove_employee(&employee_id);
    StatusCode::NO_CONTENT
}

/// Handler for PUT /admin/employees/:id/pin.
///
/// Unknown ids are a no-op; a malformed PIN is rejected.
async fn update_pin_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<UpdatePinRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;

    state
        .store()
        .write()
        .await
        .update_employee_pin(&employee_id, &request.pin)
        .map_err(|err| failure(correlation_id, err))?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::from_config(&config)
    }

    async fn read_error(response: Response) -> ApiError {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_json_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!has_json_content_type(&headers));

        headers.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
        assert!(!has_json_content_type(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            "application/json; charset=utf-8".parse().unwrap(),
        );
        assert!(has_json_content_type(&headers));

        headers.insert(header::CONTENT_TYPE, "application/problem+json".parse().unwrap());
        assert!(has_json_content_type(&headers));
    }

    #[test]
    fn test_empty_review_body_means_no_note() {
        let headers = HeaderMap::new();
        let review = parse_review(&headers, &Bytes::from_static(b"  \n"), Uuid::new_v4()).unwrap();
        assert!(review.note.is_none());
    }

    #[test]
    fn test_review_body_without_content_type_is_rejected() {
        let headers = HeaderMap::new();
        let result = parse_review(
            &headers,
            &Bytes::from_static(br#"{"note":"excused"}"#),
            Uuid::new_v4(),
        );
        assert_eq!(result.unwrap_err().error.code, "MISSING_CONTENT_TYPE");
    }

    #[test]
    fn test_review_body_with_wrong_note_type_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        let result = parse_review(&headers, &Bytes::from_static(br#"{"note":42}"#), Uuid::new_v4());
        assert_eq!(result.unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/kiosk/verify-pin")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_pin_field_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/kiosk/verify-pin")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_pin_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/kiosk/verify-pin")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"pin":"000000"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_error(response).await.code, "PIN_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_admin_route_without_token_returns_401() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                HttpRequest::builder()
                    .uri("/admin/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(read_error(response).await.code, "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_login_disabled_without_hash_returns_401() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/admin/login")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        r#"{"username":"admin@etcfoodbox.co","password":"Etc#1234"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(read_error(response).await.code, "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_late_penalty_with_half_query_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                HttpRequest::builder()
                    .uri("/kiosk/late-penalty?hour=9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "VALIDATION_ERROR");
    }
}

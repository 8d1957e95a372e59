//! Student-facing API handlers.
//!
//! # Purpose
//! Scoped content listings, redacted test delivery, submission grading, and
//! the download-counter increment. Every handler resolves policy through
//! `api::require` and row visibility through the scope filter; there is no
//! role branching at the call sites.
use crate::api::error::{api_bad_request, api_internal, api_not_found, ApiError};
use crate::api::types::{
    ContentListResponse, MessageResponse, SubmitRequest, SubmitResponse, TestListResponse,
    TestResponse,
};
use crate::api::require;
use crate::app::AppState;
use crate::assessment::{self, RedactedTest};
use crate::auth::policy::{Action, ResourceKind};
use crate::auth::principal::Principal;
use crate::auth::scope::{scope_for, ContentQuery, ListFilter};
use crate::model::ContentKind;
use crate::store::StoreError;
use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

async fn list_content_kind(
    state: AppState,
    principal: Principal,
    kind: ContentKind,
    filter: ListFilter,
) -> Result<Json<ContentListResponse>, ApiError> {
    require(&principal, Action::AccessContent(kind.into()))?;
    let query = ContentQuery::with_filter(scope_for(&principal), filter);
    let items = state
        .store
        .list_content(kind, &query)
        .await
        .map_err(|err| api_internal("failed to list content", &err))?;
    Ok(Json(ContentListResponse {
        success: true,
        count: items.len(),
        items,
    }))
}

#[utoipa::path(
    get,
    path = "/api/student/notes",
    tag = "student",
    params(
        ("subject" = Option<String>, Query, description = "Exact subject filter"),
        ("search" = Option<String>, Query, description = "Free-text search")
    ),
    responses(
        (status = 200, description = "Scoped note list", body = ContentListResponse),
        (status = 403, description = "Permission denied", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_notes(
    State(state): State<AppState>,
    principal: Principal,
    Query(filter): Query<ListFilter>,
) -> Result<Json<ContentListResponse>, ApiError> {
    list_content_kind(state, principal, ContentKind::Note, filter).await
}

#[utoipa::path(
    get,
    path = "/api/student/books",
    tag = "student",
    responses((status = 200, description = "Scoped book list", body = ContentListResponse))
)]
pub(crate) async fn list_books(
    State(state): State<AppState>,
    principal: Principal,
    Query(filter): Query<ListFilter>,
) -> Result<Json<ContentListResponse>, ApiError> {
    list_content_kind(state, principal, ContentKind::Book, filter).await
}

#[utoipa::path(
    get,
    path = "/api/student/ppts",
    tag = "student",
    responses((status = 200, description = "Scoped PPT list", body = ContentListResponse))
)]
pub(crate) async fn list_ppts(
    State(state): State<AppState>,
    principal: Principal,
    Query(filter): Query<ListFilter>,
) -> Result<Json<ContentListResponse>, ApiError> {
    list_content_kind(state, principal, ContentKind::Ppt, filter).await
}

#[utoipa::path(
    get,
    path = "/api/student/projects",
    tag = "student",
    responses((status = 200, description = "Scoped project list", body = ContentListResponse))
)]
pub(crate) async fn list_projects(
    State(state): State<AppState>,
    principal: Principal,
    Query(filter): Query<ListFilter>,
) -> Result<Json<ContentListResponse>, ApiError> {
    list_content_kind(state, principal, ContentKind::Project, filter).await
}

#[utoipa::path(
    get,
    path = "/api/student/assignments",
    tag = "student",
    responses((status = 200, description = "Scoped assignment list", body = ContentListResponse))
)]
pub(crate) async fn list_assignments(
    State(state): State<AppState>,
    principal: Principal,
    Query(filter): Query<ListFilter>,
) -> Result<Json<ContentListResponse>, ApiError> {
    list_content_kind(state, principal, ContentKind::Assignment, filter).await
}

#[utoipa::path(
    get,
    path = "/api/student/tests",
    tag = "student",
    params(
        ("subject" = Option<String>, Query, description = "Exact subject filter"),
        ("difficulty" = Option<String>, Query, description = "Difficulty filter"),
        ("search" = Option<String>, Query, description = "Free-text search")
    ),
    responses((status = 200, description = "Scoped, redacted test list", body = TestListResponse))
)]
pub(crate) async fn list_tests(
    State(state): State<AppState>,
    principal: Principal,
    Query(filter): Query<ListFilter>,
) -> Result<Json<TestListResponse>, ApiError> {
    require(&principal, Action::AccessContent(ResourceKind::Tests))?;
    let query = ContentQuery::with_filter(scope_for(&principal), filter);
    let tests = state
        .store
        .list_tests(&query)
        .await
        .map_err(|err| api_internal("failed to list tests", &err))?;
    let tests: Vec<RedactedTest> = tests.iter().map(RedactedTest::from).collect();
    Ok(Json(TestListResponse {
        success: true,
        count: tests.len(),
        tests,
    }))
}

#[utoipa::path(
    get,
    path = "/api/student/tests/{id}",
    tag = "student",
    params(("id" = Uuid, Path, description = "Test identifier")),
    responses(
        (status = 200, description = "Redacted test delivery", body = TestResponse),
        (status = 404, description = "Test not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_test(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<TestResponse>, ApiError> {
    require(&principal, Action::AccessContent(ResourceKind::Tests))?;
    let test = match state.store.get_test(id).await {
        Ok(test) => test,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("test not found")),
        Err(err) => return Err(api_internal("failed to load test", &err)),
    };
    Ok(Json(TestResponse {
        success: true,
        test: RedactedTest::from(&test),
    }))
}

#[utoipa::path(
    post,
    path = "/api/student/tests/{id}/submit",
    tag = "student",
    request_body = SubmitRequest,
    params(("id" = Uuid, Path, description = "Test identifier")),
    responses(
        (status = 200, description = "Score report", body = SubmitResponse),
        (status = 404, description = "Test not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn submit_test(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    require(&principal, Action::AccessContent(ResourceKind::Tests))?;
    let test = match state.store.get_test(id).await {
        Ok(test) => test,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("test not found")),
        Err(err) => return Err(api_internal("failed to load test", &err)),
    };
    let results = assessment::score(&test, &body.answers);
    // One attempt per completed submission, pass or fail. The increment is
    // fire-and-commit: a failure here (e.g. the test was deleted while
    // grading) does not invalidate the report already computed.
    if let Err(err) = state.store.increment_attempts(id).await {
        tracing::warn!(test_id = %id, error = ?err, "attempts increment failed after grading");
    }
    Ok(Json(SubmitResponse {
        success: true,
        results,
    }))
}

#[utoipa::path(
    put,
    path = "/api/student/download/{kind}/{id}",
    tag = "student",
    params(
        ("kind" = String, Path, description = "Content kind tag"),
        ("id" = Uuid, Path, description = "Content identifier")
    ),
    responses(
        (status = 200, description = "Counter updated", body = MessageResponse),
        (status = 400, description = "Unknown content kind", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Content not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn register_download(
    Path((kind, id)): Path<(String, Uuid)>,
    State(state): State<AppState>,
    _principal: Principal,
) -> Result<Json<MessageResponse>, ApiError> {
    // Unknown kind is a client error, distinct from a missing item.
    let kind: ContentKind = kind
        .parse()
        .map_err(|message: String| api_bad_request(&message))?;
    match state.store.increment_downloads(kind, id).await {
        Ok(_) => Ok(Json(MessageResponse {
            success: true,
            message: "download count updated".into(),
        })),
        Err(StoreError::NotFound(_)) => Err(api_not_found("content not found")),
        Err(err) => Err(api_internal("failed to update download count", &err)),
    }
}

//! Subject directory handlers.
//!
//! Listing is open to every authenticated user: students see their own
//! scope, admin tiers see everything and may filter. Mutation is admin-only.
use crate::api::error::{api_conflict, api_internal, api_not_found, ApiError};
use crate::api::types::{
    MessageResponse, SubjectCreateRequest, SubjectListParams, SubjectListResponse, SubjectResponse,
    SubjectUpdateRequest,
};
use crate::api::require;
use crate::app::AppState;
use crate::auth::policy::Action;
use crate::auth::principal::Principal;
use crate::auth::scope::{scope_for, ScopeConstraint, SubjectQuery};
use crate::model::Subject;
use crate::store::StoreError;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/subjects",
    tag = "subjects",
    params(
        ("category" = Option<String>, Query, description = "Category filter (admin tier only)"),
        ("subcategory" = Option<String>, Query, description = "Subcategory filter (admin tier only)")
    ),
    responses((status = 200, description = "Visible subjects", body = SubjectListResponse))
)]
pub(crate) async fn list_subjects(
    State(state): State<AppState>,
    principal: Principal,
    Query(params): Query<SubjectListParams>,
) -> Result<Json<SubjectListResponse>, ApiError> {
    // Students cannot widen their view through query parameters.
    let query = if principal.role.is_admin_tier() {
        SubjectQuery {
            scope: ScopeConstraint::Unrestricted,
            category: params.category,
            subcategory: params.subcategory,
        }
    } else {
        SubjectQuery {
            scope: scope_for(&principal),
            category: None,
            subcategory: None,
        }
    };
    let subjects = state
        .store
        .list_subjects(&query)
        .await
        .map_err(|err| api_internal("failed to list subjects", &err))?;
    Ok(Json(SubjectListResponse {
        success: true,
        count: subjects.len(),
        subjects,
    }))
}

#[utoipa::path(
    post,
    path = "/api/subjects",
    tag = "subjects",
    request_body = SubjectCreateRequest,
    responses(
        (status = 201, description = "Subject created", body = SubjectResponse),
        (status = 409, description = "Duplicate subject in scope", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_subject(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<SubjectCreateRequest>,
) -> Result<(StatusCode, Json<SubjectResponse>), ApiError> {
    require(&principal, Action::ManageContent)?;
    let subject = Subject {
        id: Uuid::new_v4(),
        name: body.name,
        category: body.category,
        subcategory: body.subcategory,
        created_by: principal.id,
        created_at: Utc::now(),
    };
    let subject = state
        .store
        .create_subject(subject)
        .await
        .map_err(|err| match err {
            StoreError::Conflict(_) => {
                api_conflict("subject already exists for this category and subcategory")
            }
            other => api_internal("failed to create subject", &other),
        })?;
    Ok((
        StatusCode::CREATED,
        Json(SubjectResponse {
            success: true,
            message: "subject created".into(),
            subject,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/subjects/{id}",
    tag = "subjects",
    request_body = SubjectUpdateRequest,
    params(("id" = Uuid, Path, description = "Subject identifier")),
    responses(
        (status = 200, description = "Subject renamed", body = SubjectResponse),
        (status = 404, description = "Subject not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn rename_subject(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<SubjectUpdateRequest>,
) -> Result<Json<SubjectResponse>, ApiError> {
    require(&principal, Action::ManageContent)?;
    match state.store.rename_subject(id, body.name).await {
        Ok(subject) => Ok(Json(SubjectResponse {
            success: true,
            message: "subject updated".into(),
            subject,
        })),
        Err(StoreError::NotFound(_)) => Err(api_not_found("subject not found")),
        Err(StoreError::Conflict(_)) => {
            Err(api_conflict("subject already exists for this category and subcategory"))
        }
        Err(err) => Err(api_internal("failed to rename subject", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/subjects/{id}",
    tag = "subjects",
    params(("id" = Uuid, Path, description = "Subject identifier")),
    responses(
        (status = 200, description = "Subject deleted", body = MessageResponse),
        (status = 404, description = "Subject not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_subject(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<MessageResponse>, ApiError> {
    require(&principal, Action::ManageContent)?;
    match state.store.delete_subject(id).await {
        Ok(()) => Ok(Json(MessageResponse {
            success: true,
            message: "subject deleted".into(),
        })),
        Err(StoreError::NotFound(_)) => Err(api_not_found("subject not found")),
        Err(err) => Err(api_internal("failed to delete subject", &err)),
    }
}

//! Admin and superadmin API handlers.
//!
//! # Purpose
//! Student account management, content and test CRUD, platform analytics,
//! and the superadmin-only admin account management. All authorization goes
//! through `api::require`; handlers never branch on role directly.
use crate::api::error::{
    api_bad_request, api_conflict, api_internal, api_not_found, api_validation_error, ApiError,
};
use crate::api::types::{
    AdminAccountResponse, AdminCreateRequest, AdminListResponse, AdminTestListResponse,
    AdminTestResponse, AdminUpdateRequest, Analytics, AnalyticsResponse, ContentCreateRequest,
    ContentListResponse, ContentResponse, ContentStats, MessageResponse, PermissionsUpdateRequest,
    ScopeUpdateRequest, StudentCreateRequest, StudentListResponse, StudentResponse, StudentStats,
    TestCreateRequest,
};
use crate::api::require;
use crate::app::AppState;
use crate::auth::policy::Action;
use crate::auth::principal::Principal;
use crate::auth::scope::{ContentQuery, ListFilter, ScopeConstraint};
use crate::model::{
    ContentItem, ContentKind, ContentUpdate, Question, Role, Test, TestUpdate, User,
};
use crate::store::StoreError;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

// ---- students ----

#[utoipa::path(
    get,
    path = "/api/admin/students",
    tag = "admin",
    responses(
        (status = 200, description = "All student accounts", body = StudentListResponse),
        (status = 403, description = "Admin role required", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_students(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<StudentListResponse>, ApiError> {
    require(&principal, Action::ManageStudents)?;
    let students = state
        .store
        .list_users_by_role(&[Role::Student])
        .await
        .map_err(|err| api_internal("failed to list students", &err))?;
    Ok(Json(StudentListResponse {
        success: true,
        count: students.len(),
        students,
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/students",
    tag = "admin",
    request_body = StudentCreateRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 409, description = "Email already registered", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_student(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<StudentCreateRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    require(&principal, Action::ManageStudents)?;
    if let Some(existing) = state
        .store
        .find_user_by_email(&body.email)
        .await
        .map_err(|err| api_internal("failed to check email", &err))?
    {
        tracing::debug!(user_id = %existing.id, "student create rejected, email taken");
        return Err(api_conflict("a user with this email already exists"));
    }
    let mut student = User::new(body.name, body.email, Role::Student);
    student.category = body.category;
    student.subcategory = body.subcategory;
    let student = state
        .store
        .create_user(student)
        .await
        .map_err(|err| match err {
            StoreError::Conflict(_) => api_conflict("a user with this email already exists"),
            other => api_internal("failed to create student", &other),
        })?;
    Ok((
        StatusCode::CREATED,
        Json(StudentResponse {
            success: true,
            message: "student created".into(),
            student,
        }),
    ))
}

/// Fetch a user and insist it is a student; any other role looks like a
/// missing student to the caller.
async fn load_student(state: &AppState, id: Uuid) -> Result<User, ApiError> {
    let user = match state.store.get_user(id).await {
        Ok(user) => user,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("student not found")),
        Err(err) => return Err(api_internal("failed to load student", &err)),
    };
    if user.role != Role::Student {
        return Err(api_not_found("student not found"));
    }
    Ok(user)
}

#[utoipa::path(
    put,
    path = "/api/admin/students/{id}/block",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Block flag toggled", body = StudentResponse),
        (status = 400, description = "Target is not a student", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn toggle_block(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<StudentResponse>, ApiError> {
    require(&principal, Action::ManageStudents)?;
    let mut user = match state.store.get_user(id).await {
        Ok(user) => user,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("student not found")),
        Err(err) => return Err(api_internal("failed to load student", &err)),
    };
    if user.role != Role::Student {
        return Err(api_bad_request("can only block or unblock students"));
    }
    user.is_blocked = !user.is_blocked;
    let message = if user.is_blocked {
        "student blocked"
    } else {
        "student unblocked"
    };
    let student = state
        .store
        .update_user(user)
        .await
        .map_err(|err| api_internal("failed to update student", &err))?;
    Ok(Json(StudentResponse {
        success: true,
        message: message.into(),
        student,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/students/{id}/permissions",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Current permission flags", body = StudentResponse),
        (status = 404, description = "Student not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_permissions(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<StudentResponse>, ApiError> {
    require(&principal, Action::ManageStudents)?;
    let student = load_student(&state, id).await?;
    Ok(Json(StudentResponse {
        success: true,
        message: "permissions fetched".into(),
        student,
    }))
}

#[utoipa::path(
    put,
    path = "/api/admin/students/{id}/permissions",
    tag = "admin",
    request_body = PermissionsUpdateRequest,
    params(("id" = Uuid, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Permissions updated", body = StudentResponse),
        (status = 404, description = "Student not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_permissions(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<PermissionsUpdateRequest>,
) -> Result<Json<StudentResponse>, ApiError> {
    require(&principal, Action::ManageStudents)?;
    let mut student = load_student(&state, id).await?;
    student.permissions.apply(&body.permissions);
    let student = state
        .store
        .update_user(student)
        .await
        .map_err(|err| api_internal("failed to update permissions", &err))?;
    Ok(Json(StudentResponse {
        success: true,
        message: "permissions updated".into(),
        student,
    }))
}

#[utoipa::path(
    put,
    path = "/api/admin/students/{id}/scope",
    tag = "admin",
    request_body = ScopeUpdateRequest,
    params(("id" = Uuid, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Scope updated", body = StudentResponse),
        (status = 404, description = "Student not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_scope(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<ScopeUpdateRequest>,
) -> Result<Json<StudentResponse>, ApiError> {
    require(&principal, Action::ManageStudents)?;
    let mut student = load_student(&state, id).await?;
    // Absent fields clear the assignment; a student with no category sees
    // no content until an admin assigns one again.
    student.category = body.category;
    student.subcategory = body.subcategory;
    let student = state
        .store
        .update_user(student)
        .await
        .map_err(|err| api_internal("failed to update scope", &err))?;
    Ok(Json(StudentResponse {
        success: true,
        message: "scope updated".into(),
        student,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/admin/students/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 403, description = "Superadmin role required", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_student(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<MessageResponse>, ApiError> {
    require(&principal, Action::DeleteStudent)?;
    let student = load_student(&state, id).await?;
    state
        .store
        .delete_user(student.id)
        .await
        .map_err(|err| api_internal("failed to delete student", &err))?;
    Ok(Json(MessageResponse {
        success: true,
        message: "student deleted".into(),
    }))
}

// ---- content ----

fn parse_kind(kind: &str) -> Result<ContentKind, ApiError> {
    kind.parse()
        .map_err(|message: String| api_bad_request(&message))
}

#[utoipa::path(
    get,
    path = "/api/admin/content/{kind}",
    tag = "admin",
    params(("kind" = String, Path, description = "Content kind tag")),
    responses(
        (status = 200, description = "Unscoped content list", body = ContentListResponse),
        (status = 400, description = "Unknown content kind", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_content(
    Path(kind): Path<String>,
    State(state): State<AppState>,
    principal: Principal,
    Query(filter): Query<ListFilter>,
) -> Result<Json<ContentListResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    require(&principal, Action::ManageContent)?;
    let query = ContentQuery::with_filter(ScopeConstraint::Unrestricted, filter);
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
    post,
    path = "/api/admin/content/{kind}",
    tag = "admin",
    request_body = ContentCreateRequest,
    params(("kind" = String, Path, description = "Content kind tag")),
    responses(
        (status = 201, description = "Content created", body = ContentResponse),
        (status = 400, description = "Unknown content kind", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_content(
    Path(kind): Path<String>,
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<ContentCreateRequest>,
) -> Result<(StatusCode, Json<ContentResponse>), ApiError> {
    let kind = parse_kind(&kind)?;
    require(&principal, Action::ManageContent)?;
    let item = ContentItem {
        id: Uuid::new_v4(),
        kind,
        title: body.title,
        description: body.description,
        subject: body.subject,
        category: body.category,
        subcategory: body.subcategory,
        file_urls: body.file_urls,
        uploaded_by: principal.id,
        downloads: 0,
        created_at: Utc::now(),
    };
    let item = state
        .store
        .create_content(item)
        .await
        .map_err(|err| api_internal("failed to create content", &err))?;
    Ok((
        StatusCode::CREATED,
        Json(ContentResponse {
            success: true,
            message: format!("{kind} created"),
            item,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/content/{kind}/{id}",
    tag = "admin",
    request_body = ContentUpdate,
    params(
        ("kind" = String, Path, description = "Content kind tag"),
        ("id" = Uuid, Path, description = "Content identifier")
    ),
    responses(
        (status = 200, description = "Content updated", body = ContentResponse),
        (status = 404, description = "Content not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_content(
    Path((kind, id)): Path<(String, Uuid)>,
    State(state): State<AppState>,
    principal: Principal,
    Json(update): Json<ContentUpdate>,
) -> Result<Json<ContentResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    require(&principal, Action::ManageContent)?;
    let mut item = match state.store.get_content(kind, id).await {
        Ok(item) => item,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("content not found")),
        Err(err) => return Err(api_internal("failed to load content", &err)),
    };
    item.apply(update);
    let item = state
        .store
        .update_content(item)
        .await
        .map_err(|err| api_internal("failed to update content", &err))?;
    Ok(Json(ContentResponse {
        success: true,
        message: format!("{kind} updated"),
        item,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/admin/content/{kind}/{id}",
    tag = "admin",
    params(
        ("kind" = String, Path, description = "Content kind tag"),
        ("id" = Uuid, Path, description = "Content identifier")
    ),
    responses(
        (status = 200, description = "Content deleted", body = MessageResponse),
        (status = 404, description = "Content not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_content(
    Path((kind, id)): Path<(String, Uuid)>,
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<MessageResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    require(&principal, Action::ManageContent)?;
    match state.store.delete_content(kind, id).await {
        Ok(()) => Ok(Json(MessageResponse {
            success: true,
            message: format!("{kind} deleted"),
        })),
        Err(StoreError::NotFound(_)) => Err(api_not_found("content not found")),
        Err(err) => Err(api_internal("failed to delete content", &err)),
    }
}

// ---- tests ----

#[utoipa::path(
    get,
    path = "/api/admin/tests",
    tag = "admin",
    responses((status = 200, description = "Unredacted test list", body = AdminTestListResponse))
)]
pub(crate) async fn list_tests(
    State(state): State<AppState>,
    principal: Principal,
    Query(filter): Query<ListFilter>,
) -> Result<Json<AdminTestListResponse>, ApiError> {
    require(&principal, Action::ManageContent)?;
    let query = ContentQuery::with_filter(ScopeConstraint::Unrestricted, filter);
    let tests = state
        .store
        .list_tests(&query)
        .await
        .map_err(|err| api_internal("failed to list tests", &err))?;
    Ok(Json(AdminTestListResponse {
        success: true,
        count: tests.len(),
        tests,
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/tests",
    tag = "admin",
    request_body = TestCreateRequest,
    responses(
        (status = 201, description = "Test created", body = AdminTestResponse),
        (status = 400, description = "Invalid marks or questions", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_test(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<TestCreateRequest>,
) -> Result<(StatusCode, Json<AdminTestResponse>), ApiError> {
    require(&principal, Action::ManageContent)?;
    let test = Test {
        id: Uuid::new_v4(),
        title: body.title,
        description: body.description,
        subject: body.subject,
        category: body.category,
        subcategory: body.subcategory,
        difficulty: body.difficulty,
        duration: body.duration,
        questions: body.questions.into_iter().map(Question::from_input).collect(),
        total_marks: body.total_marks,
        passing_marks: body.passing_marks,
        uploaded_by: principal.id,
        attempts: 0,
        created_at: Utc::now(),
    };
    test.validate()
        .map_err(|detail| api_validation_error("invalid test", detail))?;
    let test = state
        .store
        .create_test(test)
        .await
        .map_err(|err| api_internal("failed to create test", &err))?;
    Ok((
        StatusCode::CREATED,
        Json(AdminTestResponse {
            success: true,
            message: "test created".into(),
            test,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/tests/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Test identifier")),
    responses(
        (status = 200, description = "Full test with answer keys", body = AdminTestResponse),
        (status = 404, description = "Test not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_test(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<AdminTestResponse>, ApiError> {
    require(&principal, Action::ManageContent)?;
    let test = match state.store.get_test(id).await {
        Ok(test) => test,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("test not found")),
        Err(err) => return Err(api_internal("failed to load test", &err)),
    };
    Ok(Json(AdminTestResponse {
        success: true,
        message: "test fetched".into(),
        test,
    }))
}

#[utoipa::path(
    put,
    path = "/api/admin/tests/{id}",
    tag = "admin",
    request_body = TestUpdate,
    params(("id" = Uuid, Path, description = "Test identifier")),
    responses(
        (status = 200, description = "Test updated", body = AdminTestResponse),
        (status = 400, description = "Invalid marks or questions", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_test(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    principal: Principal,
    Json(update): Json<TestUpdate>,
) -> Result<Json<AdminTestResponse>, ApiError> {
    require(&principal, Action::ManageContent)?;
    let mut test = match state.store.get_test(id).await {
        Ok(test) => test,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("test not found")),
        Err(err) => return Err(api_internal("failed to load test", &err)),
    };
    test.apply(update);
    test.validate()
        .map_err(|detail| api_validation_error("invalid test", detail))?;
    let test = state
        .store
        .update_test(test)
        .await
        .map_err(|err| api_internal("failed to update test", &err))?;
    Ok(Json(AdminTestResponse {
        success: true,
        message: "test updated".into(),
        test,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/admin/tests/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Test identifier")),
    responses(
        (status = 200, description = "Test deleted", body = MessageResponse),
        (status = 404, description = "Test not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_test(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<MessageResponse>, ApiError> {
    require(&principal, Action::ManageContent)?;
    match state.store.delete_test(id).await {
        Ok(()) => Ok(Json(MessageResponse {
            success: true,
            message: "test deleted".into(),
        })),
        Err(StoreError::NotFound(_)) => Err(api_not_found("test not found")),
        Err(err) => Err(api_internal("failed to delete test", &err)),
    }
}

// ---- analytics ----

#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    tag = "admin",
    responses((status = 200, description = "Platform counters", body = AnalyticsResponse))
)]
pub(crate) async fn analytics(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    require(&principal, Action::ManageStudents)?;
    let stats = state
        .store
        .stats()
        .await
        .map_err(|err| api_internal("failed to compute analytics", &err))?;
    let content = ContentStats {
        notes: stats.notes,
        books: stats.books,
        tests: stats.tests,
        ppts: stats.ppts,
        projects: stats.projects,
        assignments: stats.assignments,
        total: stats.notes
            + stats.books
            + stats.tests
            + stats.ppts
            + stats.projects
            + stats.assignments,
    };
    Ok(Json(AnalyticsResponse {
        success: true,
        analytics: Analytics {
            students: StudentStats {
                total: stats.total_students,
                active: stats.active_students,
                blocked: stats.blocked_students,
            },
            content,
        },
    }))
}

// ---- admin accounts (superadmin only) ----

#[utoipa::path(
    get,
    path = "/api/admin/admins",
    tag = "superadmin",
    responses(
        (status = 200, description = "Admin and superadmin accounts", body = AdminListResponse),
        (status = 403, description = "Superadmin role required", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_admins(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<AdminListResponse>, ApiError> {
    require(&principal, Action::ManageAdmins)?;
    let admins = state
        .store
        .list_users_by_role(&[Role::Admin, Role::Superadmin])
        .await
        .map_err(|err| api_internal("failed to list admins", &err))?;
    Ok(Json(AdminListResponse {
        success: true,
        count: admins.len(),
        admins,
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/admins",
    tag = "superadmin",
    request_body = AdminCreateRequest,
    responses(
        (status = 201, description = "Admin created", body = AdminAccountResponse),
        (status = 409, description = "Email already registered", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_admin(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<AdminCreateRequest>,
) -> Result<(StatusCode, Json<AdminAccountResponse>), ApiError> {
    require(&principal, Action::ManageAdmins)?;
    if state
        .store
        .find_user_by_email(&body.email)
        .await
        .map_err(|err| api_internal("failed to check email", &err))?
        .is_some()
    {
        return Err(api_conflict("a user with this email already exists"));
    }
    let admin = User::new(body.name, body.email, Role::Admin);
    let admin = state
        .store
        .create_user(admin)
        .await
        .map_err(|err| match err {
            StoreError::Conflict(_) => api_conflict("a user with this email already exists"),
            other => api_internal("failed to create admin", &other),
        })?;
    Ok((
        StatusCode::CREATED,
        Json(AdminAccountResponse {
            success: true,
            message: "admin created".into(),
            admin,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/admins/{id}",
    tag = "superadmin",
    request_body = AdminUpdateRequest,
    params(("id" = Uuid, Path, description = "Admin identifier")),
    responses(
        (status = 200, description = "Admin updated", body = AdminAccountResponse),
        (status = 404, description = "Admin not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_admin(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<AdminUpdateRequest>,
) -> Result<Json<AdminAccountResponse>, ApiError> {
    require(&principal, Action::ManageAdmins)?;
    let mut admin = match state.store.get_user(id).await {
        Ok(user) => user,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("admin not found")),
        Err(err) => return Err(api_internal("failed to load admin", &err)),
    };
    if !admin.role.is_admin_tier() {
        return Err(api_not_found("admin not found"));
    }
    if let Some(name) = body.name {
        admin.name = name;
    }
    if let Some(email) = body.email {
        if let Some(other) = state
            .store
            .find_user_by_email(&email)
            .await
            .map_err(|err| api_internal("failed to check email", &err))?
        {
            if other.id != admin.id {
                return Err(api_conflict("a user with this email already exists"));
            }
        }
        admin.email = email;
    }
    let admin = state
        .store
        .update_user(admin)
        .await
        .map_err(|err| api_internal("failed to update admin", &err))?;
    Ok(Json(AdminAccountResponse {
        success: true,
        message: "admin updated".into(),
        admin,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/admin/admins/{id}",
    tag = "superadmin",
    params(("id" = Uuid, Path, description = "Admin identifier")),
    responses(
        (status = 200, description = "Admin deleted", body = MessageResponse),
        (status = 400, description = "Target is a superadmin", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_admin(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<MessageResponse>, ApiError> {
    require(&principal, Action::ManageAdmins)?;
    let admin = match state.store.get_user(id).await {
        Ok(user) => user,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("admin not found")),
        Err(err) => return Err(api_internal("failed to load admin", &err)),
    };
    match admin.role {
        Role::Superadmin => Err(api_bad_request("cannot delete a superadmin account")),
        Role::Admin => {
            state
                .store
                .delete_user(admin.id)
                .await
                .map_err(|err| api_internal("failed to delete admin", &err))?;
            Ok(Json(MessageResponse {
                success: true,
                message: "admin deleted".into(),
            }))
        }
        Role::Student => Err(api_not_found("admin not found")),
    }
}

//! HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! application state injected into handlers.
//!
//! # Notes
//! This module centralizes route composition to keep `main` small and testable.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::store::StudyStore;
use axum::http::StatusCode;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StudyStore>,
    pub jwt_secret: String,
    pub bootstrap_enabled: bool,
    pub bootstrap_token: Option<String>,
}

async fn route_not_found() -> (StatusCode, axum::Json<api::types::ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        axum::Json(api::types::ErrorResponse {
            success: false,
            message: "route not found".into(),
            error: None,
        }),
    )
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            )
        });

    Router::new()
        .route("/", axum::routing::get(api::system::service_info))
        .route("/health", axum::routing::get(api::system::health))
        .route(
            "/api/student/notes",
            axum::routing::get(api::student::list_notes),
        )
        .route(
            "/api/student/books",
            axum::routing::get(api::student::list_books),
        )
        .route(
            "/api/student/ppts",
            axum::routing::get(api::student::list_ppts),
        )
        .route(
            "/api/student/projects",
            axum::routing::get(api::student::list_projects),
        )
        .route(
            "/api/student/assignments",
            axum::routing::get(api::student::list_assignments),
        )
        .route(
            "/api/student/tests",
            axum::routing::get(api::student::list_tests),
        )
        .route(
            "/api/student/tests/:id",
            axum::routing::get(api::student::get_test),
        )
        .route(
            "/api/student/tests/:id/submit",
            axum::routing::post(api::student::submit_test),
        )
        .route(
            "/api/student/download/:kind/:id",
            axum::routing::put(api::student::register_download),
        )
        .route(
            "/api/admin/students",
            axum::routing::get(api::admin::list_students).post(api::admin::create_student),
        )
        .route(
            "/api/admin/students/:id",
            axum::routing::delete(api::admin::delete_student),
        )
        .route(
            "/api/admin/students/:id/block",
            axum::routing::put(api::admin::toggle_block),
        )
        .route(
            "/api/admin/students/:id/permissions",
            axum::routing::get(api::admin::get_permissions).put(api::admin::update_permissions),
        )
        .route(
            "/api/admin/students/:id/scope",
            axum::routing::put(api::admin::update_scope),
        )
        .route(
            "/api/admin/content/:kind",
            axum::routing::get(api::admin::list_content).post(api::admin::create_content),
        )
        .route(
            "/api/admin/content/:kind/:id",
            axum::routing::put(api::admin::update_content).delete(api::admin::delete_content),
        )
        .route(
            "/api/admin/tests",
            axum::routing::get(api::admin::list_tests).post(api::admin::create_test),
        )
        .route(
            "/api/admin/tests/:id",
            axum::routing::get(api::admin::get_test)
                .put(api::admin::update_test)
                .delete(api::admin::delete_test),
        )
        .route(
            "/api/admin/analytics",
            axum::routing::get(api::admin::analytics),
        )
        .route(
            "/api/admin/admins",
            axum::routing::get(api::admin::list_admins).post(api::admin::create_admin),
        )
        .route(
            "/api/admin/admins/:id",
            axum::routing::put(api::admin::update_admin).delete(api::admin::delete_admin),
        )
        .route(
            "/api/subjects",
            axum::routing::get(api::subjects::list_subjects).post(api::subjects::create_subject),
        )
        .route(
            "/api/subjects/:id",
            axum::routing::put(api::subjects::rename_subject)
                .delete(api::subjects::delete_subject),
        )
        .merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs").url("/api/openapi.json", ApiDoc::openapi()),
        )
        .fallback(route_not_found)
        .layer(trace_layer)
        .with_state(state)
}

pub fn build_bootstrap_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/internal/bootstrap/superadmin",
            axum::routing::post(api::bootstrap::bootstrap_superadmin),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! First-run superadmin provisioning.
//!
//! # Purpose
//! A fresh deployment has no users, so nothing can pass the bearer-token
//! guard. This endpoint lives on the internal listener, is disabled unless
//! configured, and requires the shared bootstrap token. It creates (or
//! re-mints a token for) the superadmin account named in the request.
use crate::api::error::{api_conflict, api_internal, api_not_found, api_unauthorized, ApiError};
use crate::api::types::{BootstrapRequest, BootstrapResponse};
use crate::app::AppState;
use crate::auth::token;
use crate::model::{Role, User};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use std::time::Duration;

const BOOTSTRAP_TOKEN_HEADER: &str = "x-bootstrap-token";
const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[utoipa::path(
    post,
    path = "/internal/bootstrap/superadmin",
    tag = "internal",
    request_body = BootstrapRequest,
    responses(
        (status = 200, description = "Superadmin ready, session token minted", body = BootstrapResponse),
        (status = 401, description = "Bad or missing bootstrap token", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Email belongs to a non-superadmin account", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn bootstrap_superadmin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<BootstrapRequest>,
) -> Result<Json<BootstrapResponse>, ApiError> {
    if !state.bootstrap_enabled {
        return Err(api_not_found("route not found"));
    }
    let expected = state
        .bootstrap_token
        .as_deref()
        .ok_or_else(|| api_unauthorized("bootstrap token not configured"))?;
    let presented = headers
        .get(BOOTSTRAP_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    if presented != Some(expected) {
        return Err(api_unauthorized("invalid bootstrap token"));
    }

    let user = match state
        .store
        .find_user_by_email(&body.email)
        .await
        .map_err(|err| api_internal("failed to check email", &err))?
    {
        // Re-running bootstrap against the same superadmin is idempotent
        // and just mints a fresh session token.
        Some(existing) if existing.role == Role::Superadmin => existing,
        Some(_) => return Err(api_conflict("a user with this email already exists")),
        None => {
            let user = User::new(body.name, body.email, Role::Superadmin);
            state
                .store
                .create_user(user)
                .await
                .map_err(|err| api_internal("failed to create superadmin", &err))?
        }
    };

    let token = token::mint(&state.jwt_secret, user.id, SESSION_TTL)
        .map_err(|err| api_internal_anyhow("failed to mint token", err))?;
    tracing::info!(user_id = %user.id, "superadmin bootstrap completed");
    Ok(Json(BootstrapResponse {
        success: true,
        message: "superadmin ready".into(),
        token,
        user,
    }))
}

fn api_internal_anyhow(message: &str, err: anyhow::Error) -> ApiError {
    tracing::error!(error = ?err, "{message}");
    crate::api::error::api_internal_message(message)
}

//! Principal resolution from bearer credentials.
//!
//! # Purpose
//! Resolves a request's `Authorization: Bearer` token into a `Principal`
//! (identity plus role and capability attributes) exactly once per request,
//! as an axum extractor. Handlers receive an already-authenticated principal
//! and only consult the policy evaluator.
//!
//! # Key invariants
//! - A blocked user is rejected here, before any handler or policy runs.
//! - Identity attributes come from the store lookup, never the token body.
use crate::api::error::{api_forbidden, api_internal, api_unauthorized, ApiError};
use crate::app::AppState;
use crate::auth::token;
use crate::model::{Category, PermissionSet, Role, User};
use crate::store::StoreError;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

/// A resolved identity plus the attributes policy and scope decisions need.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub is_blocked: bool,
    pub permissions: PermissionSet,
    pub category: Option<Category>,
    pub subcategory: Option<String>,
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            role: user.role,
            is_blocked: user.is_blocked,
            permissions: user.permissions,
            category: user.category,
            subcategory: user.subcategory,
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for Principal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(bearer) = bearer_token(parts) else {
            return Err(api_unauthorized("not authorized to access this route"));
        };
        let claims = token::verify(&state.jwt_secret, bearer)
            .map_err(|_| api_unauthorized("not authorized to access this route"))?;
        let user = match state.store.get_user(claims.sub).await {
            Ok(user) => user,
            Err(StoreError::NotFound(_)) => return Err(api_unauthorized("user not found")),
            Err(err) => return Err(api_internal("failed to resolve user", &err)),
        };
        if user.is_blocked {
            return Err(api_forbidden(
                "your account has been blocked, please contact an admin",
            ));
        }
        Ok(Principal::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (parts, ()) = builder.body(()).expect("request").into_parts();
        parts
    }

    #[test]
    fn bearer_token_requires_scheme_prefix() {
        assert_eq!(bearer_token(&parts_with_auth(Some("Bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts_with_auth(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts_with_auth(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts_with_auth(None)), None);
    }
}

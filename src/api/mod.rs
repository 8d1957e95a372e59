//! Studymate HTTP API module.
//!
//! # Purpose
//! Exposes route handler modules and the shared helper that turns policy
//! decisions into HTTP failures.
pub mod admin;
pub mod bootstrap;
pub mod error;
pub mod openapi;
pub mod student;
pub mod subjects;
pub mod system;
pub mod types;

use crate::api::error::{api_forbidden, ApiError};
use crate::auth::policy::{self, Action, Decision};
use crate::auth::principal::Principal;

/// Run the access policy evaluator and map a denial to a 403 envelope.
///
/// Denial stays a value until this single point; handlers call this and
/// propagate with `?`.
pub(crate) fn require(principal: &Principal, action: Action) -> Result<(), ApiError> {
    match policy::evaluate(principal, action) {
        Decision::Allow => Ok(()),
        Decision::Deny(reason) => Err(api_forbidden(&reason.to_string())),
    }
}

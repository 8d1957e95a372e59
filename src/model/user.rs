//! User accounts, roles, and the per-student permission set.
//!
//! # Purpose
//! Defines the principal-backing `User` record, the fixed role and category
//! enumerations, and the granular content permissions a student carries.
//!
//! # Key invariants and assumptions
//! - New students start with every content permission enabled.
//! - Permission edits arrive as an explicit partial-update structure and are
//!   applied field-by-field; unknown keys are rejected at deserialization.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
    Superadmin,
}

impl Role {
    /// True for the roles that bypass granular permission checks.
    pub fn is_admin_tier(&self) -> bool {
        matches!(self, Role::Admin | Role::Superadmin)
    }
}

/// Top-level content category. A fixed enumeration; student scope and every
/// content item reference one of these.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    College,
    School,
    Competitive,
}

/// One boolean per content kind. Mutated only by admin action on a target
/// student; students cannot self-mutate.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    pub can_access_notes: bool,
    pub can_access_books: bool,
    pub can_access_tests: bool,
    #[serde(rename = "canAccessPPTs")]
    pub can_access_ppts: bool,
    pub can_access_projects: bool,
    pub can_access_assignments: bool,
}

impl Default for PermissionSet {
    fn default() -> Self {
        // New students can reach everything until an admin narrows it.
        Self {
            can_access_notes: true,
            can_access_books: true,
            can_access_tests: true,
            can_access_ppts: true,
            can_access_projects: true,
            can_access_assignments: true,
        }
    }
}

/// Partial update for a student's permission set.
///
/// Enumerated optional fields instead of an open-ended merge: a key that is
/// not one of the six flags fails deserialization rather than being silently
/// accepted.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PermissionPatch {
    pub can_access_notes: Option<bool>,
    pub can_access_books: Option<bool>,
    pub can_access_tests: Option<bool>,
    #[serde(rename = "canAccessPPTs")]
    pub can_access_ppts: Option<bool>,
    pub can_access_projects: Option<bool>,
    pub can_access_assignments: Option<bool>,
}

impl PermissionSet {
    /// Apply a patch field-by-field; absent fields keep their current value.
    pub fn apply(&mut self, patch: &PermissionPatch) {
        if let Some(value) = patch.can_access_notes {
            self.can_access_notes = value;
        }
        if let Some(value) = patch.can_access_books {
            self.can_access_books = value;
        }
        if let Some(value) = patch.can_access_tests {
            self.can_access_tests = value;
        }
        if let Some(value) = patch.can_access_ppts {
            self.can_access_ppts = value;
        }
        if let Some(value) = patch.can_access_projects {
            self.can_access_projects = value;
        }
        if let Some(value) = patch.can_access_assignments {
            self.can_access_assignments = value;
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_blocked: bool,
    pub permissions: PermissionSet,
    /// Content scope; a student without one sees no content (fail closed).
    pub category: Option<Category>,
    pub subcategory: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            role,
            is_blocked: false,
            permissions: PermissionSet::default(),
            category: None,
            subcategory: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_students_have_all_permissions() {
        let user = User::new("a".into(), "a@example.com".into(), Role::Student);
        assert!(user.permissions.can_access_notes);
        assert!(user.permissions.can_access_tests);
        assert!(user.permissions.can_access_assignments);
        assert!(!user.is_blocked);
        assert!(user.category.is_none());
    }

    #[test]
    fn patch_applies_field_by_field() {
        let mut perms = PermissionSet::default();
        let patch = PermissionPatch {
            can_access_tests: Some(false),
            can_access_ppts: Some(false),
            ..PermissionPatch::default()
        };
        perms.apply(&patch);
        assert!(!perms.can_access_tests);
        assert!(!perms.can_access_ppts);
        assert!(perms.can_access_notes);
        assert!(perms.can_access_books);
    }

    #[test]
    fn patch_rejects_unknown_keys() {
        let result: Result<PermissionPatch, _> =
            serde_json::from_value(serde_json::json!({ "canAccessEverything": true }));
        assert!(result.is_err());
    }

    #[test]
    fn patch_uses_wire_field_names() {
        let patch: PermissionPatch = serde_json::from_value(serde_json::json!({
            "canAccessNotes": false,
            "canAccessPPTs": true
        }))
        .expect("patch");
        assert_eq!(patch.can_access_notes, Some(false));
        assert_eq!(patch.can_access_ppts, Some(true));
    }

    #[test]
    fn admin_tier_covers_both_admin_roles() {
        assert!(Role::Admin.is_admin_tier());
        assert!(Role::Superadmin.is_admin_tier());
        assert!(!Role::Student.is_admin_tier());
    }
}

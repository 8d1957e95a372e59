//! Access policy evaluator.
//!
//! # Purpose and responsibility
//! One pure decision function for every authorization question in the
//! service, replacing scattered role conditionals at call sites. The policy
//! is two-tier: a role-tier check first (admin and superadmin bypass the
//! permission map), then a permission-tier check reached only for students.
//!
//! # Key invariants and assumptions
//! - A blocked principal is denied before any other rule is consulted.
//! - Denial is a first-class return value, never an error or panic, so
//!   callers cannot mistake a deny for a crash.
//! - The kind-to-flag permission mapping is fixed; unknown wire tags never
//!   reach this module because `ContentKind`/`ResourceKind` are closed enums
//!   and string parsing rejects unmapped tags at the routing boundary.
use crate::auth::principal::Principal;
use crate::model::{ContentKind, PermissionSet, Role};
use std::fmt;

/// Content collections a principal can be granted access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Notes,
    Books,
    Tests,
    Ppts,
    Projects,
    Assignments,
}

impl From<ContentKind> for ResourceKind {
    fn from(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Note => ResourceKind::Notes,
            ContentKind::Book => ResourceKind::Books,
            ContentKind::Ppt => ResourceKind::Ppts,
            ContentKind::Project => ResourceKind::Projects,
            ContentKind::Assignment => ResourceKind::Assignments,
        }
    }
}

/// Operations the policy distinguishes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Read/list/download a content collection (student-facing).
    AccessContent(ResourceKind),
    /// Create/update/delete content, tests, or subjects.
    ManageContent,
    /// Block/unblock students, edit permissions and scope.
    ManageStudents,
    /// Delete a student account outright. Superadmin only.
    DeleteStudent,
    /// Create/list/edit/delete admin accounts. Superadmin only.
    ManageAdmins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The account is blocked; nothing else is evaluated.
    Blocked,
    /// A student's permission flag for the resource kind is off.
    MissingPermission(ResourceKind),
    /// The action needs the admin tier.
    AdminRequired,
    /// The action is reserved for the superadmin.
    SuperadminRequired,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::Blocked => {
                write!(f, "your account has been blocked, please contact an admin")
            }
            DenyReason::MissingPermission(kind) => {
                write!(f, "you don't have permission to access {}", kind.label())
            }
            DenyReason::AdminRequired => write!(f, "this action requires an admin account"),
            DenyReason::SuperadminRequired => {
                write!(f, "this action is reserved for the super admin")
            }
        }
    }
}

impl ResourceKind {
    fn label(&self) -> &'static str {
        match self {
            ResourceKind::Notes => "notes",
            ResourceKind::Books => "books",
            ResourceKind::Tests => "tests",
            ResourceKind::Ppts => "ppts",
            ResourceKind::Projects => "projects",
            ResourceKind::Assignments => "assignments",
        }
    }
}

/// The fixed mapping from resource kind to permission flag.
fn permission_flag(permissions: &PermissionSet, kind: ResourceKind) -> bool {
    match kind {
        ResourceKind::Notes => permissions.can_access_notes,
        ResourceKind::Books => permissions.can_access_books,
        ResourceKind::Tests => permissions.can_access_tests,
        ResourceKind::Ppts => permissions.can_access_ppts,
        ResourceKind::Projects => permissions.can_access_projects,
        ResourceKind::Assignments => permissions.can_access_assignments,
    }
}

/// Decide whether `principal` may perform `action`.
///
/// Pure function of its inputs; no I/O, no side effects.
pub fn evaluate(principal: &Principal, action: Action) -> Decision {
    if principal.is_blocked {
        return Decision::Deny(DenyReason::Blocked);
    }
    match principal.role {
        Role::Superadmin => Decision::Allow,
        Role::Admin => match action {
            Action::ManageAdmins | Action::DeleteStudent => {
                Decision::Deny(DenyReason::SuperadminRequired)
            }
            _ => Decision::Allow,
        },
        Role::Student => match action {
            Action::AccessContent(kind) => {
                if permission_flag(&principal.permissions, kind) {
                    Decision::Allow
                } else {
                    Decision::Deny(DenyReason::MissingPermission(kind))
                }
            }
            _ => Decision::Deny(DenyReason::AdminRequired),
        },
    }
}

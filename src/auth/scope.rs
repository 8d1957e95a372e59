//! Content scope filter.
//!
//! # Purpose and responsibility
//! Derives a row-level predicate from a principal's category/subcategory
//! attributes so list operations restrict result sets without role branching
//! at the call site. Caller-supplied filters are ANDed on top of the scope;
//! they can narrow a student's visible set but never widen it.
//!
//! # Key invariants and assumptions
//! - Admin-tier principals are unrestricted (global visibility).
//! - A student's scope always constrains category, and additionally
//!   subcategory when the student has one; this single rule applies to every
//!   content kind, tests, and subjects.
//! - A student with no category assigned matches nothing. Fail closed until
//!   an admin assigns their scope.
use crate::auth::principal::Principal;
use crate::model::{Category, ContentItem, Difficulty, Subject, Test};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeConstraint {
    /// Admin tier: no implicit narrowing.
    Unrestricted,
    /// Student tier: rows must match the principal's scope attributes.
    Member {
        category: Option<Category>,
        subcategory: Option<String>,
    },
}

impl ScopeConstraint {
    /// Row-level check a candidate row must pass before any caller filter.
    pub fn permits(&self, category: Category, subcategory: &str) -> bool {
        match self {
            ScopeConstraint::Unrestricted => true,
            // No category assigned yet: the student sees nothing.
            ScopeConstraint::Member { category: None, .. } => false,
            ScopeConstraint::Member {
                category: Some(own_category),
                subcategory: own_subcategory,
            } => {
                category == *own_category
                    && own_subcategory
                        .as_deref()
                        .map_or(true, |own| own == subcategory)
            }
        }
    }
}

/// Derive the scope constraint for a principal.
pub fn scope_for(principal: &Principal) -> ScopeConstraint {
    if principal.role.is_admin_tier() {
        ScopeConstraint::Unrestricted
    } else {
        ScopeConstraint::Member {
            category: principal.category,
            subcategory: principal.subcategory.clone(),
        }
    }
}

/// Caller-supplied list filters, straight from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFilter {
    pub subject: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub search: Option<String>,
}

/// Combined predicate for content and test listings: the scope constraint
/// plus caller filters.
#[derive(Debug, Clone)]
pub struct ContentQuery {
    pub scope: ScopeConstraint,
    pub subject: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub search: Option<String>,
}

impl ContentQuery {
    pub fn scoped(scope: ScopeConstraint) -> Self {
        Self {
            scope,
            subject: None,
            difficulty: None,
            search: None,
        }
    }

    pub fn with_filter(scope: ScopeConstraint, filter: ListFilter) -> Self {
        Self {
            scope,
            subject: filter.subject,
            difficulty: filter.difficulty,
            search: filter.search,
        }
    }

    /// Case-insensitive free-text clause over the item's text fields,
    /// combined with OR; absent search matches everything.
    fn search_matches(&self, title: &str, description: Option<&str>, subject: &str) -> bool {
        let Some(needle) = self.search.as_deref() else {
            return true;
        };
        let needle = needle.to_lowercase();
        title.to_lowercase().contains(&needle)
            || description
                .map(|text| text.to_lowercase().contains(&needle))
                .unwrap_or(false)
            || subject.to_lowercase().contains(&needle)
    }

    pub fn matches_content(&self, item: &ContentItem) -> bool {
        self.scope.permits(item.category, &item.subcategory)
            && self
                .subject
                .as_deref()
                .map_or(true, |subject| item.subject == subject)
            && self.search_matches(&item.title, item.description.as_deref(), &item.subject)
    }

    pub fn matches_test(&self, test: &Test) -> bool {
        self.scope.permits(test.category, &test.subcategory)
            && self
                .subject
                .as_deref()
                .map_or(true, |subject| test.subject == subject)
            && self
                .difficulty
                .map_or(true, |difficulty| test.difficulty == difficulty)
            && self.search_matches(&test.title, test.description.as_deref(), &test.subject)
    }
}

/// Predicate for subject listings: scope plus optional explicit filters
/// (the explicit filters are only ever set for admin-tier callers).
#[derive(Debug, Clone)]
pub struct SubjectQuery {
    pub scope: ScopeConstraint,
    pub category: Option<Category>,
    pub subcategory: Option<String>,
}

impl SubjectQuery {
    pub fn matches(&self, subject: &Subject) -> bool {
        self.scope.permits(subject.category, &subject.subcategory)
            && self
                .category
                .map_or(true, |category| subject.category == category)
            && self
                .subcategory
                .as_deref()
                .map_or(true, |subcategory| subject.subcategory == subcategory)
    }
}

//! Storage trait and error types.
//!
//! # Purpose
//! Abstracts persistence behind an async trait so handlers stay
//! backend-agnostic. Counter mutations (`increment_downloads`,
//! `increment_attempts`) are atomic with respect to concurrent calls on the
//! same entity; everything else is last-write-wins with no cross-entity
//! transactions.
use crate::auth::scope::{ContentQuery, SubjectQuery};
use crate::model::{ContentItem, ContentKind, Role, Subject, Test, User};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Aggregate counts for the analytics endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_students: usize,
    pub active_students: usize,
    pub blocked_students: usize,
    pub notes: usize,
    pub books: usize,
    pub tests: usize,
    pub ppts: usize,
    pub projects: usize,
    pub assignments: usize,
}

#[async_trait]
pub trait StudyStore: Send + Sync {
    async fn get_user(&self, id: Uuid) -> StoreResult<User>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn create_user(&self, user: User) -> StoreResult<User>;
    async fn update_user(&self, user: User) -> StoreResult<User>;
    async fn delete_user(&self, id: Uuid) -> StoreResult<()>;
    async fn list_users_by_role(&self, roles: &[Role]) -> StoreResult<Vec<User>>;

    async fn list_content(
        &self,
        kind: ContentKind,
        query: &ContentQuery,
    ) -> StoreResult<Vec<ContentItem>>;
    async fn get_content(&self, kind: ContentKind, id: Uuid) -> StoreResult<ContentItem>;
    async fn create_content(&self, item: ContentItem) -> StoreResult<ContentItem>;
    async fn update_content(&self, item: ContentItem) -> StoreResult<ContentItem>;
    async fn delete_content(&self, kind: ContentKind, id: Uuid) -> StoreResult<()>;
    /// Atomic `downloads += 1`; returns the new counter value.
    async fn increment_downloads(&self, kind: ContentKind, id: Uuid) -> StoreResult<u64>;

    async fn list_tests(&self, query: &ContentQuery) -> StoreResult<Vec<Test>>;
    async fn get_test(&self, id: Uuid) -> StoreResult<Test>;
    async fn create_test(&self, test: Test) -> StoreResult<Test>;
    async fn update_test(&self, test: Test) -> StoreResult<Test>;
    async fn delete_test(&self, id: Uuid) -> StoreResult<()>;
    /// Atomic `attempts += 1`; returns the new counter value.
    async fn increment_attempts(&self, id: Uuid) -> StoreResult<u64>;

    async fn list_subjects(&self, query: &SubjectQuery) -> StoreResult<Vec<Subject>>;
    async fn create_subject(&self, subject: Subject) -> StoreResult<Subject>;
    async fn rename_subject(&self, id: Uuid, name: String) -> StoreResult<Subject>;
    async fn delete_subject(&self, id: Uuid) -> StoreResult<()>;

    async fn stats(&self) -> StoreResult<PlatformStats>;
    async fn health_check(&self) -> StoreResult<()>;
    fn backend_name(&self) -> &'static str;
}

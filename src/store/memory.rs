//! In-memory implementation of the study store.
//!
//! # Purpose
//! Implements `StudyStore` entirely in memory using `HashMap`s guarded by
//! `tokio::sync::RwLock`. It exists for:
//! - local development and tests (no external dependencies)
//! - deployments where durability is not required
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - **Single-process consistency**: mutations take write locks, reads take
//!   read locks, so counter increments never lose updates under concurrent
//!   callers.
//! - **No multi-node coordination**: multiple instances have independent
//!   state.
//!
//! # Content dispatch
//! All five content kinds live in one map keyed by kind; the kind tag is the
//! dispatch, so download increments and CRUD share a single code path.
use super::{PlatformStats, StoreError, StoreResult, StudyStore};
use crate::auth::scope::{ContentQuery, SubjectQuery};
use crate::model::{ContentItem, ContentKind, Role, Subject, Test, User};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct InMemoryStore {
    /// User records keyed by id.
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    /// All content kinds in one map; the outer key is the dispatch tag.
    content: Arc<RwLock<HashMap<ContentKind, HashMap<Uuid, ContentItem>>>>,
    /// Test records keyed by id.
    tests: Arc<RwLock<HashMap<Uuid, Test>>>,
    /// Subject records keyed by id; the (name, category, subcategory)
    /// triple is kept unique on insert.
    subjects: Arc<RwLock<HashMap<Uuid, Subject>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        let mut content = HashMap::new();
        for kind in ContentKind::ALL {
            content.insert(kind, HashMap::new());
        }
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            content: Arc::new(RwLock::new(content)),
            tests: Arc::new(RwLock::new(HashMap::new())),
            subjects: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudyStore for InMemoryStore {
    async fn get_user(&self, id: Uuid) -> StoreResult<User> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("user".into()))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(StoreError::Conflict("email already registered".into()));
        }
        users.insert(user.id, user.clone());
        metrics::gauge!("studymate_users_total").set(users.len() as f64);
        Ok(user)
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(StoreError::NotFound("user".into()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if users.remove(&id).is_none() {
            return Err(StoreError::NotFound("user".into()));
        }
        metrics::gauge!("studymate_users_total").set(users.len() as f64);
        Ok(())
    }

    async fn list_users_by_role(&self, roles: &[Role]) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        let mut matched: Vec<User> = users
            .values()
            .filter(|user| roles.contains(&user.role))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn list_content(
        &self,
        kind: ContentKind,
        query: &ContentQuery,
    ) -> StoreResult<Vec<ContentItem>> {
        let content = self.content.read().await;
        let mut items: Vec<ContentItem> = content
            .get(&kind)
            .map(|by_id| {
                by_id
                    .values()
                    .filter(|item| query.matches_content(item))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn get_content(&self, kind: ContentKind, id: Uuid) -> StoreResult<ContentItem> {
        self.content
            .read()
            .await
            .get(&kind)
            .and_then(|by_id| by_id.get(&id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(kind.as_str().into()))
    }

    async fn create_content(&self, item: ContentItem) -> StoreResult<ContentItem> {
        let mut content = self.content.write().await;
        content
            .entry(item.kind)
            .or_default()
            .insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_content(&self, item: ContentItem) -> StoreResult<ContentItem> {
        let mut content = self.content.write().await;
        let by_id = content.entry(item.kind).or_default();
        if !by_id.contains_key(&item.id) {
            return Err(StoreError::NotFound(item.kind.as_str().into()));
        }
        by_id.insert(item.id, item.clone());
        Ok(item)
    }

    async fn delete_content(&self, kind: ContentKind, id: Uuid) -> StoreResult<()> {
        let mut content = self.content.write().await;
        let removed = content.get_mut(&kind).and_then(|by_id| by_id.remove(&id));
        if removed.is_none() {
            return Err(StoreError::NotFound(kind.as_str().into()));
        }
        Ok(())
    }

    async fn increment_downloads(&self, kind: ContentKind, id: Uuid) -> StoreResult<u64> {
        // Write lock makes the read-then-increment atomic; concurrent
        // increments on the same item serialize here.
        let mut content = self.content.write().await;
        let item = content
            .get_mut(&kind)
            .and_then(|by_id| by_id.get_mut(&id))
            .ok_or_else(|| StoreError::NotFound(kind.as_str().into()))?;
        item.downloads += 1;
        metrics::counter!("studymate_downloads_total").increment(1);
        Ok(item.downloads)
    }

    async fn list_tests(&self, query: &ContentQuery) -> StoreResult<Vec<Test>> {
        let tests = self.tests.read().await;
        let mut matched: Vec<Test> = tests
            .values()
            .filter(|test| query.matches_test(test))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn get_test(&self, id: Uuid) -> StoreResult<Test> {
        self.tests
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("test".into()))
    }

    async fn create_test(&self, test: Test) -> StoreResult<Test> {
        let mut tests = self.tests.write().await;
        tests.insert(test.id, test.clone());
        Ok(test)
    }

    async fn update_test(&self, test: Test) -> StoreResult<Test> {
        let mut tests = self.tests.write().await;
        if !tests.contains_key(&test.id) {
            return Err(StoreError::NotFound("test".into()));
        }
        tests.insert(test.id, test.clone());
        Ok(test)
    }

    async fn delete_test(&self, id: Uuid) -> StoreResult<()> {
        let mut tests = self.tests.write().await;
        if tests.remove(&id).is_none() {
            return Err(StoreError::NotFound("test".into()));
        }
        Ok(())
    }

    async fn increment_attempts(&self, id: Uuid) -> StoreResult<u64> {
        let mut tests = self.tests.write().await;
        let test = tests
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("test".into()))?;
        test.attempts += 1;
        metrics::counter!("studymate_test_attempts_total").increment(1);
        Ok(test.attempts)
    }

    async fn list_subjects(&self, query: &SubjectQuery) -> StoreResult<Vec<Subject>> {
        let subjects = self.subjects.read().await;
        let mut matched: Vec<Subject> = subjects
            .values()
            .filter(|subject| query.matches(subject))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matched)
    }

    async fn create_subject(&self, subject: Subject) -> StoreResult<Subject> {
        let mut subjects = self.subjects.write().await;
        let duplicate = subjects.values().any(|existing| {
            existing.name == subject.name
                && existing.category == subject.category
                && existing.subcategory == subject.subcategory
        });
        if duplicate {
            return Err(StoreError::Conflict(
                "subject already exists in this category/subcategory".into(),
            ));
        }
        subjects.insert(subject.id, subject.clone());
        Ok(subject)
    }

    async fn rename_subject(&self, id: Uuid, name: String) -> StoreResult<Subject> {
        let mut subjects = self.subjects.write().await;
        let target = subjects
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("subject".into()))?;
        let duplicate = subjects.values().any(|existing| {
            existing.id != id
                && existing.name == name
                && existing.category == target.category
                && existing.subcategory == target.subcategory
        });
        if duplicate {
            return Err(StoreError::Conflict(
                "subject already exists in this category/subcategory".into(),
            ));
        }
        let subject = subjects
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("subject".into()))?;
        subject.name = name;
        Ok(subject.clone())
    }

    async fn delete_subject(&self, id: Uuid) -> StoreResult<()> {
        let mut subjects = self.subjects.write().await;
        if subjects.remove(&id).is_none() {
            return Err(StoreError::NotFound("subject".into()));
        }
        Ok(())
    }

    async fn stats(&self) -> StoreResult<PlatformStats> {
        let users = self.users.read().await;
        let content = self.content.read().await;
        let tests = self.tests.read().await;
        let count = |kind: ContentKind| content.get(&kind).map(HashMap::len).unwrap_or(0);
        let total_students = users
            .values()
            .filter(|user| user.role == Role::Student)
            .count();
        let blocked_students = users
            .values()
            .filter(|user| user.role == Role::Student && user.is_blocked)
            .count();
        Ok(PlatformStats {
            total_students,
            active_students: total_students - blocked_students,
            blocked_students,
            notes: count(ContentKind::Note),
            books: count(ContentKind::Book),
            tests: tests.len(),
            ppts: count(ContentKind::Ppt),
            projects: count(ContentKind::Project),
            assignments: count(ContentKind::Assignment),
        })
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

//! Redacted test projection for student-facing delivery.
//!
//! # Purpose
//! One shared projection invoked from every student delivery path (listing
//! and single-test fetch). The projection types simply do not contain the
//! correct-answer index or the explanation, so redaction holds by
//! construction: no serializer configuration or per-call-site field
//! stripping can regress it.
//!
//! # Notes
//! Marks, passing threshold, and duration are not secret and pass through
//! unchanged. Admin editing uses the stored `Test` model on a separate path.
use crate::model::{Category, Difficulty, Test};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RedactedQuestion {
    pub id: Uuid,
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RedactedTest {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub category: Category,
    pub subcategory: String,
    pub difficulty: Difficulty,
    pub duration: u32,
    pub questions: Vec<RedactedQuestion>,
    pub total_marks: f64,
    pub passing_marks: f64,
    pub attempts: u64,
    pub created_at: DateTime<Utc>,
}

impl From<&Test> for RedactedTest {
    fn from(test: &Test) -> Self {
        Self {
            id: test.id,
            title: test.title.clone(),
            description: test.description.clone(),
            subject: test.subject.clone(),
            category: test.category,
            subcategory: test.subcategory.clone(),
            difficulty: test.difficulty,
            duration: test.duration,
            questions: test
                .questions
                .iter()
                .map(|question| RedactedQuestion {
                    id: question.id,
                    question: question.question.clone(),
                    options: question.options.clone(),
                })
                .collect(),
            total_marks: test.total_marks,
            passing_marks: test.passing_marks,
            attempts: test.attempts,
            created_at: test.created_at,
        }
    }
}

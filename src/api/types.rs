//! HTTP API request/response types.
//!
//! # Purpose
//! Defines the shared payload shapes for the REST API and OpenAPI schema
//! generation. Success envelopes carry `success: true` next to the payload;
//! the failure envelope is `ErrorResponse`.
use crate::assessment::{RedactedTest, ScoreReport, SubmittedAnswer};
use crate::model::{
    Category, ContentItem, Difficulty, PermissionPatch, QuestionInput, Subject, Test, User,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    pub success: bool,
    pub message: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

// ---- content ----

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContentListResponse {
    pub success: bool,
    pub count: usize,
    pub items: Vec<ContentItem>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContentResponse {
    pub success: bool,
    pub message: String,
    pub item: ContentItem,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentCreateRequest {
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub category: Category,
    pub subcategory: String,
    #[serde(default)]
    pub file_urls: Vec<String>,
}

// ---- tests ----

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TestListResponse {
    pub success: bool,
    pub count: usize,
    pub tests: Vec<RedactedTest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TestResponse {
    pub success: bool,
    pub test: RedactedTest,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminTestListResponse {
    pub success: bool,
    pub count: usize,
    pub tests: Vec<Test>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminTestResponse {
    pub success: bool,
    pub message: String,
    pub test: Test,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestCreateRequest {
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub category: Category,
    pub subcategory: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Time limit in minutes.
    #[serde(default = "default_duration")]
    pub duration: u32,
    pub questions: Vec<QuestionInput>,
    pub total_marks: f64,
    pub passing_marks: f64,
}

fn default_duration() -> u32 {
    30
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitRequest {
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitResponse {
    pub success: bool,
    pub results: ScoreReport,
}

// ---- students & admins ----

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentListResponse {
    pub success: bool,
    pub count: usize,
    pub students: Vec<User>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub success: bool,
    pub message: String,
    pub student: User,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentCreateRequest {
    pub name: String,
    pub email: String,
    pub category: Option<Category>,
    pub subcategory: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScopeUpdateRequest {
    pub category: Option<Category>,
    pub subcategory: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PermissionsUpdateRequest {
    pub permissions: PermissionPatch,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminListResponse {
    pub success: bool,
    pub count: usize,
    pub admins: Vec<User>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminAccountResponse {
    pub success: bool,
    pub message: String,
    pub admin: User,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminCreateRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

// ---- subjects ----

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubjectListResponse {
    pub success: bool,
    pub count: usize,
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubjectResponse {
    pub success: bool,
    pub message: String,
    pub subject: Subject,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubjectCreateRequest {
    pub name: String,
    pub category: Category,
    pub subcategory: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubjectUpdateRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SubjectListParams {
    pub category: Option<Category>,
    pub subcategory: Option<String>,
}

// ---- analytics ----

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentStats {
    pub total: usize,
    pub active: usize,
    pub blocked: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContentStats {
    pub notes: usize,
    pub books: usize,
    pub tests: usize,
    pub ppts: usize,
    pub projects: usize,
    pub assignments: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Analytics {
    pub students: StudentStats,
    pub content: ContentStats,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsResponse {
    pub success: bool,
    pub analytics: Analytics,
}

// ---- bootstrap ----

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BootstrapRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BootstrapResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: User,
}

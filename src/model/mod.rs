//! Studymate data model module.
//!
//! # Purpose
//! Re-exports the user/content/test/subject models and the patch payloads
//! used by the API and store layers.
mod content;
mod subject;
mod user;

pub use content::{ContentItem, ContentKind, ContentUpdate};
pub use subject::Subject;
pub use test::{Difficulty, Question, QuestionInput, Test, TestUpdate};
pub use user::{Category, PermissionPatch, PermissionSet, Role, User};

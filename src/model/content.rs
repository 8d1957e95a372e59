//! Content item model shared by all downloadable material kinds.
//!
//! # Purpose
//! Notes, books, PPTs, projects, and assignments are structurally identical
//! for this service's purposes, so they share one `ContentItem` struct tagged
//! with a `ContentKind` instead of five copy-pasted models.
use crate::model::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Note,
    Book,
    Ppt,
    Project,
    Assignment,
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Note,
        ContentKind::Book,
        ContentKind::Ppt,
        ContentKind::Project,
        ContentKind::Assignment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Note => "note",
            ContentKind::Book => "book",
            ContentKind::Ppt => "ppt",
            ContentKind::Project => "project",
            ContentKind::Assignment => "assignment",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    /// Parse a wire kind tag. Unknown tags are an invalid-argument error at
    /// the routing boundary, distinct from a missing item.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "note" => Ok(ContentKind::Note),
            "book" => Ok(ContentKind::Book),
            "ppt" => Ok(ContentKind::Ppt),
            "project" => Ok(ContentKind::Project),
            "assignment" => Ok(ContentKind::Assignment),
            other => Err(format!("invalid content type '{other}'")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: Uuid,
    pub kind: ContentKind,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub category: Category,
    pub subcategory: String,
    /// Resource locators for the item's files (main document first).
    pub file_urls: Vec<String>,
    pub uploaded_by: Uuid,
    pub downloads: u64,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a content item; counters and ownership are not
/// reachable through this structure.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub category: Option<Category>,
    pub subcategory: Option<String>,
    pub file_urls: Option<Vec<String>>,
}

impl ContentItem {
    pub fn apply(&mut self, update: ContentUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if update.description.is_some() {
            self.description = update.description;
        }
        if let Some(subject) = update.subject {
            self.subject = subject;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(subcategory) = update.subcategory {
            self.subcategory = subcategory;
        }
        if let Some(file_urls) = update.file_urls {
            self.file_urls = file_urls;
        }
    }
}

//! Subject model.
//!
//! The (name, category, subcategory) triple is unique; the store enforces it
//! with a conflict error.
use crate::model::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub subcategory: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

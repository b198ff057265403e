//! Relation database model
//!
//! Shared by likes, bookmarks, follows and topic_follows. Queries alias the
//! pair columns to `subject_id` / `target_id`.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct RelationModel {
    pub subject_id: i64,
    pub target_id: i64,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl RelationModel {
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

//! Topic entity - a named subject users can follow

use chrono::{DateTime, Utc};

use crate::value_objects::{topic_slug, TopicId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopic {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl NewTopic {
    /// Derive the slug from the name
    pub fn new(name: &str, description: Option<String>) -> Self {
        let name = name.trim().to_string();
        Self {
            slug: topic_slug(&name),
            name,
            description,
        }
    }
}

//! User entity - an account that can author posts and comments

use chrono::{DateTime, Utc};

use crate::value_objects::{RecordState, UserId};

/// User account.
///
/// The password hash is deliberately not part of the entity; it is only
/// reachable through `UserRepository::get_password_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: RecordState,
}

impl User {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Name to show in bylines
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Fields needed to create a user; the id is assigned by storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl NewUser {
    /// Emails are stored and compared lowercase
    pub fn new(email: &str, username: impl Into<String>) -> Self {
        Self {
            email: normalize_email(email),
            username: username.into(),
            full_name: None,
            bio: None,
            avatar: None,
        }
    }
}

/// Trim and lowercase an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

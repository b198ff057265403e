//! Session token records

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// Persisted refresh token.
///
/// Valid only while the row exists, has not lapsed by wall-clock time, and
/// the token itself still passes signature verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: i64,
    pub user_id: UserId,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Access token revoked before its natural expiry.
///
/// `expires_at` is the token's own expiry; once it passes the record can be
/// purged because the token would be rejected anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RevokedToken {
    #[inline]
    pub fn is_purgeable_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

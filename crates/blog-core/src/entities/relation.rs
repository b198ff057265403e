//! Relations between a user and something they like, bookmark or follow

use chrono::{DateTime, Utc};

use crate::value_objects::{PostId, RecordState, TopicId, UserId};

/// A soft-deletable `(subject, target)` pair, unique per pair in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation<S, T> {
    pub subject: S,
    pub target: T,
    pub created_at: DateTime<Utc>,
    pub state: RecordState,
}

/// User likes a post
pub type Like = Relation<UserId, PostId>;
/// User bookmarked a post
pub type Bookmark = Relation<UserId, PostId>;
/// Follower follows another user
pub type Follow = Relation<UserId, UserId>;
/// User follows a topic
pub type TopicFollow = Relation<UserId, TopicId>;

/// What adding a relation has to do given the stored row, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationTransition {
    /// No row yet
    Create,
    /// Row was removed earlier: `Removed -> Active`
    Restore,
    /// Row is already active
    AlreadyActive,
}

impl<S, T> Relation<S, T> {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

impl RelationTransition {
    pub fn for_existing<S, T>(existing: Option<&Relation<S, T>>) -> Self {
        match existing.map(|r| r.state) {
            None => Self::Create,
            Some(RecordState::Removed { .. }) => Self::Restore,
            Some(RecordState::Active) => Self::AlreadyActive,
        }
    }
}

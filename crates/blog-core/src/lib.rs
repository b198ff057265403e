//! # blog-core
//!
//! Domain layer containing entities, value objects and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    estimate_read_time, normalize_email, Bookmark, Comment, Follow, Like, NewComment, NewPost,
    NewTopic, NewUser, Post, RefreshToken, Relation, RelationTransition, RevokedToken, Topic,
    TopicFollow, User,
};
pub use error::DomainError;
pub use traits::{
    BookmarkRepository, CommentRepository, FollowRepository, LikeRepository, PostQuery,
    PostRepository, PostSort, RefreshTokenRepository, RelationRepository, RepoResult,
    RevokedTokenRepository, TopicFollowRepository, TopicRepository, UserRepository,
};
pub use value_objects::{
    slugify, topic_slug, CommentId, IdParseError, PostId, RecordState, TopicId, UserId,
};

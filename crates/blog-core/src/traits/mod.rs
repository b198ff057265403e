//! Repository traits (ports)

mod repositories;

pub use repositories::{
    BookmarkRepository, CommentRepository, FollowRepository, LikeRepository, PostQuery,
    PostRepository, PostSort, RefreshTokenRepository, RelationRepository, RepoResult,
    RevokedTokenRepository, TopicFollowRepository, TopicRepository, UserRepository,
};

//! Domain entities - core business objects

mod comment;
mod post;
mod relation;
mod token;
mod topic;
mod user;

pub use comment::{Comment, NewComment};
pub use post::{estimate_read_time, NewPost, Post};
pub use relation::{Bookmark, Follow, Like, Relation, RelationTransition, TopicFollow};
pub use token::{RefreshToken, RevokedToken};
pub use topic::{NewTopic, Topic};
pub use user::{normalize_email, NewUser, User};

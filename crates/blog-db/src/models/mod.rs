//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod post;
mod relation;
mod token;
mod topic;
mod user;

pub use comment::CommentModel;
pub use post::PostModel;
pub use relation::RelationModel;
pub use token::{RefreshTokenModel, RevokedTokenModel};
pub use topic::TopicModel;
pub use user::UserModel;

//! Value objects - immutable types that represent domain concepts

mod ids;
mod record_state;
mod slug;

pub use ids::{CommentId, IdParseError, PostId, TopicId, UserId};
pub use record_state::RecordState;
pub use slug::{slugify, topic_slug};

//! Post entity - a blog article

use chrono::{DateTime, Utc};

use crate::value_objects::{PostId, RecordState, UserId};

const WORDS_PER_MINUTE: usize = 200;

/// Blog post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Option<String>,
    pub published: bool,
    pub view_count: i64,
    pub read_time: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub state: RecordState,
}

impl Post {
    #[inline]
    pub fn is_author(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    /// Published posts are public; drafts are only visible to their author
    pub fn is_visible_to(&self, viewer: Option<UserId>) -> bool {
        self.state.is_active() && (self.published || viewer.is_some_and(|id| self.is_author(id)))
    }

    /// Publish the post, stamping `published_at` the first time only
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.published = true;
        if self.published_at.is_none() {
            self.published_at = Some(now);
        }
    }

    pub fn set_content(&mut self, content: String) {
        self.read_time = estimate_read_time(&content);
        self.content = content;
    }
}

/// Fields needed to create a post; the id is assigned by storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_id: UserId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Option<String>,
    pub published: bool,
    pub read_time: i32,
    pub published_at: Option<DateTime<Utc>>,
}

impl NewPost {
    pub fn new(author_id: UserId, title: String, slug: String, content: String) -> Self {
        let read_time = estimate_read_time(&content);
        Self {
            author_id,
            title,
            slug,
            content,
            excerpt: None,
            cover_image: None,
            tags: None,
            published: false,
            read_time,
            published_at: None,
        }
    }

    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.published = true;
        self.published_at = Some(now);
    }
}

/// Minutes to read `content`, ignoring HTML markup. Rounded up.
pub fn estimate_read_time(content: &str) -> i32 {
    let mut text = String::with_capacity(content.len());
    let mut in_tag = false;
    for c in content.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    let words = text.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE) as i32
}

//! Plain-data projections returned by query handlers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{AggregateRoot, Comment, Post, Tag, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub status: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id().to_string(),
            title: post.title().as_str().to_string(),
            content: post.content().as_str().to_string(),
            status: post.status().as_str().to_string(),
            author_id: post.author_id().to_string(),
            created_at: post.created_at().as_datetime(),
            published_at: post.published_at().map(|t| t.as_datetime()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    pub id: String,
    pub content: String,
    pub post_id: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id().to_string(),
            content: comment.content().as_str().to_string(),
            post_id: comment.post_id().to_string(),
            author_id: comment.author_id().to_string(),
            created_at: comment.created_at().as_datetime(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagView {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Tag> for TagView {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id().to_string(),
            name: tag.name().as_str().to_string(),
            slug: tag.slug().as_str().to_string(),
            color: tag.color().as_str().to_string(),
            created_at: tag.created_at().as_datetime(),
        }
    }
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().as_str().to_string(),
            role: user.role().as_str().to_string(),
            created_at: user.created_at().as_datetime(),
        }
    }
}

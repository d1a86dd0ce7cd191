use super::AggregateRoot;
use super::value_objects::{CreationTimestamp, Identifier, PostContent, PostStatus, PostTitle};
use crate::error::{DomainError, DomainResult};

/// Post aggregate - a blog article moving from draft to published to archived.
///
/// `published_at` is stamped once, by [`Post::publish`], and never cleared.
#[derive(Debug, Clone)]
pub struct Post {
    id: Identifier,
    title: PostTitle,
    content: PostContent,
    status: PostStatus,
    author_id: Identifier,
    created_at: CreationTimestamp,
    published_at: Option<CreationTimestamp>,
}

impl Post {
    /// Create a new draft post.
    pub fn create(title: PostTitle, content: PostContent, author_id: Identifier) -> Self {
        Self {
            id: Identifier::generate(),
            title,
            content,
            status: PostStatus::Draft,
            author_id,
            created_at: CreationTimestamp::now(),
            published_at: None,
        }
    }

    /// Rebuild a post from stored, already-validated parts.
    pub fn reconstitute(
        id: Identifier,
        title: PostTitle,
        content: PostContent,
        status: PostStatus,
        author_id: Identifier,
        created_at: CreationTimestamp,
        published_at: Option<CreationTimestamp>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            status,
            author_id,
            created_at,
            published_at,
        }
    }

    pub fn publish(&mut self) -> DomainResult<()> {
        match self.status {
            PostStatus::Draft => {
                self.status = PostStatus::Published;
                self.published_at = Some(CreationTimestamp::now());
                Ok(())
            }
            PostStatus::Published => Err(DomainError::invalid_state("Post is already published")),
            PostStatus::Archived => {
                Err(DomainError::invalid_state("Cannot publish an archived post"))
            }
        }
    }

    /// Archive from either draft or published.
    pub fn archive(&mut self) -> DomainResult<()> {
        match self.status {
            PostStatus::Draft | PostStatus::Published => {
                self.status = PostStatus::Archived;
                Ok(())
            }
            PostStatus::Archived => Err(DomainError::invalid_state("Post is already archived")),
        }
    }

    /// Replace title and content. Refused once the post is published.
    // Archived posts are deliberately still editable.
    pub fn update_content(&mut self, title: PostTitle, content: PostContent) -> DomainResult<()> {
        if self.status.is_published() {
            return Err(DomainError::invalid_state(
                "Cannot edit the content of a published post",
            ));
        }

        self.title = title;
        self.content = content;
        Ok(())
    }

    pub fn title(&self) -> &PostTitle {
        &self.title
    }

    pub fn content(&self) -> &PostContent {
        &self.content
    }

    pub fn status(&self) -> PostStatus {
        self.status
    }

    pub fn author_id(&self) -> Identifier {
        self.author_id
    }

    pub fn created_at(&self) -> CreationTimestamp {
        self.created_at
    }

    pub fn published_at(&self) -> Option<CreationTimestamp> {
        self.published_at
    }
}

impl AggregateRoot for Post {
    const NAME: &'static str = "Post";

    fn id(&self) -> Identifier {
        self.id
    }
}

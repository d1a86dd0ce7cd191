use super::AggregateRoot;
use super::value_objects::{CommentContent, CreationTimestamp, Identifier};

/// Comment on a post. References its post and author by id only.
#[derive(Debug, Clone)]
pub struct Comment {
    id: Identifier,
    content: CommentContent,
    post_id: Identifier,
    author_id: Identifier,
    created_at: CreationTimestamp,
}

impl Comment {
    pub fn create(content: CommentContent, post_id: Identifier, author_id: Identifier) -> Self {
        Self {
            id: Identifier::generate(),
            content,
            post_id,
            author_id,
            created_at: CreationTimestamp::now(),
        }
    }

    /// Rebuild a comment from stored, already-validated parts.
    pub fn reconstitute(
        id: Identifier,
        content: CommentContent,
        post_id: Identifier,
        author_id: Identifier,
        created_at: CreationTimestamp,
    ) -> Self {
        Self {
            id,
            content,
            post_id,
            author_id,
            created_at,
        }
    }

    pub fn update_content(&mut self, content: CommentContent) {
        self.content = content;
    }

    pub fn content(&self) -> &CommentContent {
        &self.content
    }

    pub fn post_id(&self) -> Identifier {
        self.post_id
    }

    pub fn author_id(&self) -> Identifier {
        self.author_id
    }

    pub fn created_at(&self) -> CreationTimestamp {
        self.created_at
    }
}

impl AggregateRoot for Comment {
    const NAME: &'static str = "Comment";

    fn id(&self) -> Identifier {
        self.id
    }
}

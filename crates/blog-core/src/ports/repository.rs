use async_trait::async_trait;

use crate::domain::{Comment, EmailAddress, Identifier, Post, Tag, TagSlug, User};
use crate::error::RepoError;

/// Generic repository trait shared by every aggregate.
#[async_trait]
pub trait BaseRepository<T>: Send + Sync {
    /// Find an entity by its identity.
    async fn find_by_id(&self, id: Identifier) -> Result<Option<T>, RepoError>;

    /// Insert or update, decided by storage. Must be atomic per identity.
    async fn save(&self, entity: &T) -> Result<(), RepoError>;

    /// Delete an entity. Fails with [`RepoError::NotFound`] when absent.
    async fn delete(&self, entity: &T) -> Result<(), RepoError>;
}

/// Post repository. Collections are ordered oldest first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post> {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_published(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_author(&self, author_id: Identifier) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment> {
    /// Comments on a post, oldest first.
    async fn find_by_post_id(&self, post_id: Identifier) -> Result<Vec<Comment>, RepoError>;

    /// Remove every comment on a post, returning how many were removed.
    async fn delete_by_post_id(&self, post_id: Identifier) -> Result<u64, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag> {
    /// All tags ordered by name.
    async fn find_all(&self) -> Result<Vec<Tag>, RepoError>;

    async fn find_by_slug(&self, slug: &TagSlug) -> Result<Option<Tag>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepoError>;

    async fn find_all(&self) -> Result<Vec<User>, RepoError>;
}

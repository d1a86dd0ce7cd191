//! In-memory repositories for development and tests.
//!
//! Rows live in a `tokio::sync::RwLock<Vec<T>>`. Every save takes the write
//! lock, so the insert-or-update decision and the unique-key check are atomic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use blog_core::domain::{
    AggregateRoot, Comment, EmailAddress, Identifier, Post, Tag, TagSlug, User,
};
use blog_core::error::RepoError;
use blog_core::ports::{
    BaseRepository, CommentRepository, PostRepository, TagRepository, UserRepository,
};

/// An aggregate that can be held by [`InMemoryRepository`].
pub trait Stored: AggregateRoot + Clone + Send + Sync + 'static {
    /// Natural key that must stay unique across rows, if any.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

impl Stored for Post {}

impl Stored for Comment {}

impl Stored for Tag {
    fn unique_key(&self) -> Option<&str> {
        Some(self.slug().as_str())
    }
}

impl Stored for User {
    fn unique_key(&self) -> Option<&str> {
        Some(self.email().as_str())
    }
}

pub struct InMemoryRepository<T> {
    rows: RwLock<Vec<T>>,
}

pub type InMemoryPostRepository = InMemoryRepository<Post>;
pub type InMemoryCommentRepository = InMemoryRepository<Comment>;
pub type InMemoryTagRepository = InMemoryRepository<Tag>;
pub type InMemoryUserRepository = InMemoryRepository<User>;

impl<T: Stored> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    async fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .read()
            .await
            .iter()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }
}

impl<T: Stored> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Stored> BaseRepository<T> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Identifier) -> Result<Option<T>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|row| row.id() == id)
            .cloned())
    }

    async fn save(&self, entity: &T) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;

        if let Some(key) = entity.unique_key() {
            let taken = rows
                .iter()
                .any(|row| row.id() != entity.id() && row.unique_key() == Some(key));
            if taken {
                return Err(RepoError::Constraint(format!(
                    "{} with key '{key}' already exists",
                    T::NAME
                )));
            }
        }

        match rows.iter_mut().find(|row| row.id() == entity.id()) {
            Some(row) => *row = entity.clone(),
            None => rows.push(entity.clone()),
        }
        Ok(())
    }

    async fn delete(&self, entity: &T) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|row| row.id() == entity.id())
            .ok_or(RepoError::NotFound)?;
        rows.remove(index);
        Ok(())
    }
}

fn oldest_first<T>(mut rows: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    rows.sort_by_key(created_at);
    rows
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let rows = self.select(|_| true).await;
        Ok(oldest_first(rows, |p| p.created_at().as_datetime()))
    }

    async fn find_published(&self) -> Result<Vec<Post>, RepoError> {
        let rows = self.select(|p| p.status().is_published()).await;
        Ok(oldest_first(rows, |p| p.created_at().as_datetime()))
    }

    async fn find_by_author(&self, author_id: Identifier) -> Result<Vec<Post>, RepoError> {
        let rows = self.select(|p| p.author_id() == author_id).await;
        Ok(oldest_first(rows, |p| p.created_at().as_datetime()))
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post_id(&self, post_id: Identifier) -> Result<Vec<Comment>, RepoError> {
        let rows = self.select(|c| c.post_id() == post_id).await;
        Ok(oldest_first(rows, |c| c.created_at().as_datetime()))
    }

    async fn delete_by_post_id(&self, post_id: Identifier) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|c| c.post_id() != post_id);
        Ok((before - rows.len()) as u64)
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn find_all(&self) -> Result<Vec<Tag>, RepoError> {
        let mut rows = self.select(|_| true).await;
        rows.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(rows)
    }

    async fn find_by_slug(&self, slug: &TagSlug) -> Result<Option<Tag>, RepoError> {
        Ok(self.select(|t| t.slug() == slug).await.into_iter().next())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %email.masked(), "Finding user by email");
        Ok(self.select(|u| u.email() == email).await.into_iter().next())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let rows = self.select(|_| true).await;
        Ok(oldest_first(rows, |u| u.created_at().as_datetime()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use blog_core::domain::{CommentContent, PostContent, PostTitle, TagColor, TagName, UserRole};

    use super::*;

    fn draft(title: &str, author_id: Identifier) -> Post {
        Post::create(
            PostTitle::from_string(title).unwrap(),
            PostContent::from_string("Body text for the post").unwrap(),
            author_id,
        )
    }

    fn tag(name: &str, slug: &str) -> Tag {
        Tag::create(
            TagName::from_string(name).unwrap(),
            TagSlug::from_string(slug).unwrap(),
            TagColor::default(),
        )
    }

    #[tokio::test]
    async fn test_save_inserts_then_updates() {
        let repo = InMemoryPostRepository::new();
        let mut post = draft("First Post", Identifier::generate());

        repo.save(&post).await.unwrap();
        post.publish().unwrap();
        repo.save(&post).await.unwrap();

        let all = PostRepository::find_all(&repo).await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].status().is_published());
    }

    #[tokio::test]
    async fn test_find_published_filters_drafts() {
        let repo = InMemoryPostRepository::new();
        let author = Identifier::generate();
        let mut published = draft("Published One", author);
        published.publish().unwrap();

        repo.save(&draft("Draft One", author)).await.unwrap();
        repo.save(&published).await.unwrap();

        let found = repo.find_published().await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), published.id());
    }

    #[tokio::test]
    async fn test_find_by_author() {
        let repo = InMemoryPostRepository::new();
        let alice = Identifier::generate();

        repo.save(&draft("Alice Post", alice)).await.unwrap();
        repo.save(&draft("Other Post", Identifier::generate()))
            .await
            .unwrap();

        let found = repo.find_by_author(alice).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title().as_str(), "Alice Post");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let post = draft("Never Saved", Identifier::generate());

        assert!(matches!(repo.delete(&post).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_comments_of_post() {
        let repo = InMemoryCommentRepository::new();
        let post_id = Identifier::generate();
        let other_post = Identifier::generate();
        for target in [post_id, post_id, other_post] {
            let comment = Comment::create(
                CommentContent::from_string("Nice post").unwrap(),
                target,
                Identifier::generate(),
            );
            repo.save(&comment).await.unwrap();
        }

        assert_eq!(repo.delete_by_post_id(post_id).await.unwrap(), 2);
        assert!(repo.find_by_post_id(post_id).await.unwrap().is_empty());
        assert_eq!(repo.find_by_post_id(other_post).await.unwrap().len(), 1);
        assert_eq!(repo.delete_by_post_id(post_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected() {
        let repo = InMemoryTagRepository::new();
        repo.save(&tag("Rust", "rust")).await.unwrap();

        let result = repo.save(&tag("Rust Again", "rust")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_tags_sorted_by_name() {
        let repo = InMemoryTagRepository::new();
        repo.save(&tag("Zig", "zig")).await.unwrap();
        repo.save(&tag("Go", "go")).await.unwrap();

        let names: Vec<_> = TagRepository::find_all(&repo)
            .await
            .unwrap()
            .iter()
            .map(|t| t.name().as_str().to_owned())
            .collect();
        assert_eq!(names, vec!["Go", "Zig"]);
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repo = InMemoryUserRepository::new();
        let email = EmailAddress::from_string("reader@example.com").unwrap();
        let user = User::create(email.clone(), "hash".to_owned(), Some(UserRole::User));
        repo.save(&user).await.unwrap();

        let found = repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(found.id(), user.id());
    }

    #[tokio::test]
    async fn test_concurrent_registration_keeps_one_user() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let email = EmailAddress::from_string("race@example.com").unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                let user = User::create(email.clone(), "hash".to_owned(), None);
                tokio::spawn(async move { repo.save(&user).await })
            })
            .collect();

        let mut ok = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                ok += 1;
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(UserRepository::find_all(repo.as_ref()).await.unwrap().len(), 1);
    }
}

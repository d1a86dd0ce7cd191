//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use blog_core::domain::{
    Comment, EmailAddress, Identifier, Post, PostStatus, Tag, TagSlug, User,
};
use blog_core::error::RepoError;
use blog_core::ports::{CommentRepository, PostRepository, TagRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %email.masked(), "Finding user by email");

        self.fetch_one(UserEntity::find().filter(user::Column::Email.eq(email.as_str())))
            .await
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        self.fetch(UserEntity::find().order_by_asc(user::Column::CreatedAt))
            .await
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        self.fetch(PostEntity::find().order_by_asc(post::Column::CreatedAt))
            .await
    }

    async fn find_published(&self) -> Result<Vec<Post>, RepoError> {
        self.fetch(
            PostEntity::find()
                .filter(post::Column::Status.eq(PostStatus::Published.as_str()))
                .order_by_asc(post::Column::CreatedAt),
        )
        .await
    }

    async fn find_by_author(&self, author_id: Identifier) -> Result<Vec<Post>, RepoError> {
        self.fetch(
            PostEntity::find()
                .filter(post::Column::AuthorId.eq(*author_id.as_uuid()))
                .order_by_asc(post::Column::CreatedAt),
        )
        .await
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post_id(&self, post_id: Identifier) -> Result<Vec<Comment>, RepoError> {
        self.fetch(
            CommentEntity::find()
                .filter(comment::Column::PostId.eq(*post_id.as_uuid()))
                .order_by_asc(comment::Column::CreatedAt),
        )
        .await
    }

    async fn delete_by_post_id(&self, post_id: Identifier) -> Result<u64, RepoError> {
        let result = CommentEntity::delete_many()
            .filter(comment::Column::PostId.eq(*post_id.as_uuid()))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected)
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_all(&self) -> Result<Vec<Tag>, RepoError> {
        self.fetch(TagEntity::find().order_by_asc(tag::Column::Name))
            .await
    }

    async fn find_by_slug(&self, slug: &TagSlug) -> Result<Option<Tag>, RepoError> {
        self.fetch_one(TagEntity::find().filter(tag::Column::Slug.eq(slug.as_str())))
            .await
    }
}

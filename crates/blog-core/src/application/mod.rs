//! Command and query handlers.
//!
//! Each handler turns a plain-data command or query into value objects,
//! drives a single entity operation and persists through the repository
//! ports it was constructed with. Routing an input to its handler is left
//! to the caller.

mod comment;
mod post;
mod tag;
mod user;
mod views;

use async_trait::async_trait;

use crate::domain::{AggregateRoot, Identifier};
use crate::error::{DomainError, DomainResult};
use crate::ports::BaseRepository;

pub use comment::{
    CreateComment, CreateCommentHandler, DeleteComment, DeleteCommentHandler, GetComment,
    GetCommentHandler, ListComments, ListCommentsHandler, UpdateComment, UpdateCommentHandler,
};
pub use post::{
    ArchivePost, ArchivePostHandler, CreatePost, CreatePostHandler, DeletePost,
    DeletePostHandler, GetPost, GetPostHandler, ListPosts, ListPostsHandler, PublishPost,
    PublishPostHandler, UpdatePostContent, UpdatePostContentHandler,
};
pub use tag::{
    CreateTag, CreateTagHandler, DeleteTag, DeleteTagHandler, GetTag, GetTagHandler, ListTags,
    ListTagsHandler, UpdateTag, UpdateTagHandler,
};
pub use user::{
    AuthenticateUser, AuthenticateUserHandler, ChangePassword, ChangePasswordHandler, GetUser,
    GetUserHandler, IssueAccessToken, IssueAccessTokenHandler, PromoteUser, PromoteUserHandler,
    RegisterUser, RegisterUserHandler,
};
pub use views::{CommentView, PostView, TagView, UserView};

/// A unit that handles exactly one kind of command or query.
#[async_trait]
pub trait Handler<I: Send + 'static>: Send + Sync {
    type Output: Send;

    async fn handle(&self, input: I) -> DomainResult<Self::Output>;
}

/// Load an aggregate by id, failing with `NotFound` when absent.
async fn load<T, R>(repo: &R, id: Identifier) -> DomainResult<T>
where
    T: AggregateRoot,
    R: BaseRepository<T> + ?Sized,
{
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(T::NAME, id))
}

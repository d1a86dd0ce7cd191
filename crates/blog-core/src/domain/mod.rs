//! Domain entities - the core business objects.

mod comment;
mod post;
mod tag;
mod user;

pub mod value_objects;

pub use comment::Comment;
pub use post::Post;
pub use tag::Tag;
pub use user::User;
pub use value_objects::{
    CommentContent, CreationTimestamp, EmailAddress, Identifier, PostContent, PostStatus,
    PostTitle, TagColor, TagName, TagSlug, UserRole,
};

/// An entity that owns its consistency boundary and is persisted by identity.
pub trait AggregateRoot {
    /// Entity name used in not-found errors and logs.
    const NAME: &'static str;

    fn id(&self) -> Identifier;
}

//! Value objects - immutable, self-validating domain values.
//!
//! Every constructor validates its input and fails with
//! [`DomainError::Validation`](crate::DomainError::Validation). None of these
//! types expose a mutator.

mod comment;
mod email;
mod identifier;
mod post;
mod tag;
mod timestamp;
mod user;

pub use comment::CommentContent;
pub use email::EmailAddress;
pub use identifier::Identifier;
pub use post::{PostContent, PostStatus, PostTitle};
pub use tag::{TagColor, TagName, TagSlug};
pub use timestamp::CreationTimestamp;
pub use user::UserRole;

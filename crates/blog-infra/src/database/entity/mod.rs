//! SeaORM table models and their conversions to and from domain entities.

pub mod comment;
pub mod post;
pub mod tag;
pub mod user;

use blog_core::DomainError;
use blog_core::error::RepoError;

/// A stored value failed domain validation on load.
pub(crate) fn corrupted(err: DomainError) -> RepoError {
    RepoError::Corrupted(err.to_string())
}

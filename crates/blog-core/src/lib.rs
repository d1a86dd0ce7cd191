//! # Blog Core
//!
//! The domain layer of the blog backend: value objects, entities, the ports
//! storage and auth collaborators implement, and the command/query handlers
//! that drive them. No infrastructure dependencies.

pub mod application;
pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, DomainResult, RepoError};

//! # Blog Shared
//!
//! Request and response shapes of the HTTP API, kept free of domain types so
//! clients can depend on them directly.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};

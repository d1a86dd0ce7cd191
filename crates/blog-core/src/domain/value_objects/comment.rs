use std::fmt;

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

const MIN_LENGTH: usize = 3;
const MAX_LENGTH: usize = 1000;

/// Trimmed comment body, 3 to 1000 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommentContent(String);

impl CommentContent {
    pub fn from_string(value: &str) -> DomainResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Comment cannot be empty"));
        }

        let len = trimmed.chars().count();
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&len) {
            return Err(DomainError::validation(format!(
                "Comment must be between {MIN_LENGTH} and {MAX_LENGTH} characters, got {len}"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

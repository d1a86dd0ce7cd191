use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 255;
const CONTENT_MIN: usize = 10;

/// Trimmed post title, 3 to 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn from_string(value: &str) -> DomainResult<Self> {
        let trimmed = value.trim();
        let len = trimmed.chars().count();

        if len == 0 {
            return Err(DomainError::validation("Post title cannot be blank"));
        }
        if !(TITLE_MIN..=TITLE_MAX).contains(&len) {
            return Err(DomainError::validation(format!(
                "Post title must be between {TITLE_MIN} and {TITLE_MAX} characters, got {len}"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Post body. Length is counted in characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PostContent(String);

impl PostContent {
    pub fn from_string(value: &str) -> DomainResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Post content cannot be blank"));
        }

        let len = trimmed.chars().count();
        if len < CONTENT_MIN {
            return Err(DomainError::validation(format!(
                "Post content must be at least {CONTENT_MIN} characters, got {len}"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn from_string(value: &str) -> DomainResult<Self> {
        match value {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(DomainError::validation(format!(
                "'{other}' is not a valid post status (expected draft, published or archived)"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }

    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }

    pub fn is_archived(&self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert!(PostTitle::from_string("ab").is_err());
        assert!(PostTitle::from_string("abc").is_ok());
        assert!(PostTitle::from_string(&"a".repeat(255)).is_ok());
        assert!(PostTitle::from_string(&"a".repeat(256)).is_err());
    }

    #[test]
    fn test_title_rejects_whitespace_and_trims() {
        assert!(PostTitle::from_string("     ").is_err());
        assert!(PostTitle::from_string("  ab  ").is_err());

        let title = PostTitle::from_string("  My First Post ").unwrap();
        assert_eq!(title.as_str(), "My First Post");
    }

    #[test]
    fn test_title_counts_characters() {
        // 255 multi-byte characters are well over 255 bytes.
        assert!(PostTitle::from_string(&"é".repeat(255)).is_ok());
    }

    #[test]
    fn test_content_minimum() {
        assert!(PostContent::from_string("123456789").is_err());
        assert!(PostContent::from_string("1234567890").is_ok());
        assert!(PostContent::from_string("\n\t          \n").is_err());
    }

    #[test]
    fn test_content_counts_characters_not_bytes() {
        // 5 characters, 15 bytes.
        assert!(PostContent::from_string("日本語です").is_err());
        assert!(PostContent::from_string("日本語の記事を書きました").is_ok());
    }

    #[test]
    fn test_status_tokens() {
        assert_eq!(PostStatus::from_string("draft").unwrap(), PostStatus::Draft);
        assert_eq!(
            "published".parse::<PostStatus>().unwrap(),
            PostStatus::Published
        );
        assert_eq!(PostStatus::Archived.as_str(), "archived");
        assert!(PostStatus::from_string("Draft").is_err());
        assert!(PostStatus::from_string("deleted").is_err());
    }

    #[test]
    fn test_status_predicates() {
        assert!(PostStatus::Draft.is_draft());
        assert!(!PostStatus::Draft.is_published());
        assert!(PostStatus::Published.is_published());
        assert!(PostStatus::Archived.is_archived());
    }
}

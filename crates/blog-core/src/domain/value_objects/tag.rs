use std::fmt;

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const SLUG_MIN: usize = 2;
const SLUG_MAX: usize = 50;

/// Human-readable tag label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagName(String);

impl TagName {
    pub fn from_string(value: &str) -> DomainResult<Self> {
        let trimmed = value.trim();
        let len = trimmed.chars().count();

        if !(NAME_MIN..=NAME_MAX).contains(&len) {
            return Err(DomainError::validation(format!(
                "Tag name must be between {NAME_MIN} and {NAME_MAX} characters, got {len}"
            )));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_'))
        {
            return Err(DomainError::validation(format!(
                "Tag name contains invalid character '{bad}'"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URL-safe tag key: `[a-z0-9-]`, no leading or trailing hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TagSlug(String);

impl TagSlug {
    pub fn from_string(value: &str) -> DomainResult<Self> {
        let len = value.chars().count();
        if !(SLUG_MIN..=SLUG_MAX).contains(&len) {
            return Err(DomainError::validation(format!(
                "Tag slug must be between {SLUG_MIN} and {SLUG_MAX} characters, got {len}"
            )));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::validation(
                "Tag slug may only contain lowercase letters, digits and hyphens",
            ));
        }
        if value.starts_with('-') || value.ends_with('-') {
            return Err(DomainError::validation(
                "Tag slug cannot start or end with a hyphen",
            ));
        }

        Ok(Self(value.to_string()))
    }

    /// Derive a slug from a display name.
    ///
    /// Lowercases, drops anything outside `[a-z0-9]`, and turns every run of
    /// whitespace, underscores or hyphens into one hyphen. Separators at either
    /// end are dropped.
    pub fn from_name(name: &str) -> DomainResult<Self> {
        let mut slug = String::with_capacity(name.len());
        let mut pending_separator = false;

        for c in name.to_lowercase().chars() {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                if pending_separator && !slug.is_empty() {
                    slug.push('-');
                }
                pending_separator = false;
                slug.push(c);
            } else if c.is_whitespace() || c == '_' || c == '-' {
                pending_separator = true;
            }
        }

        if slug.is_empty() {
            return Err(DomainError::validation(format!(
                "Cannot derive a slug from '{}'",
                name.trim()
            )));
        }

        Self::from_string(&slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `#RRGGBB` color, always uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagColor(String);

impl TagColor {
    /// Accepts `RGB`, `RRGGBB`, with or without a leading `#`.
    pub fn from_string(value: &str) -> DomainResult<Self> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DomainError::validation(format!(
                "'{value}' is not a hex color"
            )));
        }

        let expanded = match hex.len() {
            6 => hex.to_string(),
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            _ => {
                return Err(DomainError::validation(format!(
                    "'{value}' must have 3 or 6 hex digits"
                )));
            }
        };

        Ok(Self(format!("#{}", expanded.to_ascii_uppercase())))
    }

    pub fn blue() -> Self {
        Self("#3B82F6".to_string())
    }

    pub fn green() -> Self {
        Self("#10B981".to_string())
    }

    pub fn red() -> Self {
        Self("#EF4444".to_string())
    }

    pub fn yellow() -> Self {
        Self("#F59E0B".to_string())
    }

    pub fn purple() -> Self {
        Self("#8B5CF6".to_string())
    }

    pub fn gray() -> Self {
        Self("#6B7280".to_string())
    }

    /// Look up a named preset.
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "blue" => Some(Self::blue()),
            "green" => Some(Self::green()),
            "red" => Some(Self::red()),
            "yellow" => Some(Self::yellow()),
            "purple" => Some(Self::purple()),
            "gray" | "grey" => Some(Self::gray()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TagColor {
    fn default() -> Self {
        Self::blue()
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

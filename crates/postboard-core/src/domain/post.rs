use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Opaque post identifier.
///
/// Each store mints identifiers in its own format (ObjectId hex, UUID), so
/// the domain only carries the string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PostId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Post entity - a titled piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

/// A post that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl NewPost {
    /// Build a new post, requiring a non-empty title and content.
    ///
    /// `updated_at` defaults to now.
    pub fn new(
        title: Option<String>,
        content: Option<String>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        match (title, content) {
            (Some(title), Some(content)) if !title.is_empty() && !content.is_empty() => Ok(Self {
                title,
                content,
                updated_at: updated_at.unwrap_or_else(Utc::now),
            }),
            _ => Err(DomainError::Validation(
                "Title and content are required".to_string(),
            )),
        }
    }

    /// Attach the store-assigned identifier.
    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            updated_at: self.updated_at,
        }
    }
}

/// Partial update of a stored post.
///
/// `None` leaves the stored field alone; an empty string still replaces it.
/// The timestamp is always written.
#[derive(Debug, Clone, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl PostChanges {
    /// `updated_at` falls back to now when the caller supplied none.
    pub fn new(
        title: Option<String>,
        content: Option<String>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            title,
            content,
            updated_at: updated_at.unwrap_or_else(Utc::now),
        }
    }

    /// Apply the changes to an in-memory copy of a post.
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        post.updated_at = self.updated_at;
    }
}

/*!
 * Document records as seen by the translation and filtering core.
 *
 * The archive owns the documents; this crate only reads them and hands back
 * either a new translation or an error.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store identifier
    pub id: i64,

    /// Human readable title, used in outcome messages
    pub title: String,

    /// Extracted text content
    #[serde(default)]
    pub content: String,

    /// Last successful translation of `content`, if any
    #[serde(default)]
    pub translation: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Document {
    /// Create a document without a translation
    pub fn new(id: i64, title: impl Into<String>, content: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            translation: None,
            created,
        }
    }

    /// Whether the document carries a translation
    pub fn is_translated(&self) -> bool {
        self.translation.as_deref().is_some_and(|t| !t.is_empty())
    }
}

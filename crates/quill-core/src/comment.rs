use crate::post::PostId;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Number of characters shown by a comment's display form.
const PREVIEW_CHARS: usize = 20;

/// Store-generated identifier of a [`Comment`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CommentId(i64);

impl CommentId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for CommentId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored comment, existentially dependent on its parent [`Post`].
///
/// A comment is only addressable through the `(post_id, id)` pair; the
/// parent reference must resolve to an existing post at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub content: String,
    pub created_at: Timestamp,
}

impl Comment {
    /// Returns the first 20 characters of the content, suitable for log
    /// lines and compact listings.
    pub fn preview(&self) -> String {
        self.content.chars().take(PREVIEW_CHARS).collect()
    }
}

impl Display for Comment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.preview())
    }
}

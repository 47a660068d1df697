use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Store-generated identifier of a [`Post`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PostId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored blog post.
///
/// `created_at` is set once when the post is inserted; `updated_at` is
/// refreshed by the repository on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

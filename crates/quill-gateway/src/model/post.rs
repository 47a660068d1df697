use jiff::Timestamp;
use quill_core::repository::PostPatch;
use quill_core::{Post, PostId};
use quill_service::PostDraft;
use serde::{Deserialize, Serialize};

/// Inbound body for `POST /api/posts`.
///
/// Both fields deserialize as optional so that a missing field surfaces as a
/// field-keyed validation error from the service rather than a
/// deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl CreatePostRequest {
    pub fn into_draft(self) -> PostDraft {
        PostDraft {
            title: self.title,
            content: self.content,
        }
    }
}

/// Inbound body for `PUT`/`PATCH /api/posts/{post_id}`.
///
/// Only the fields below are updatable; anything else in the body is
/// ignored.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl UpdatePostRequest {
    pub fn into_patch(self) -> PostPatch {
        PostPatch {
            title: self.title,
            content: self.content,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

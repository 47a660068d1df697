use jiff::Timestamp;
use quill_core::repository::CommentPatch;
use quill_core::{Comment, CommentId, PostId};
use quill_service::CommentDraft;
use serde::{Deserialize, Serialize};

/// Inbound body for `POST /api/posts/{post_id}/comments`.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub content: Option<String>,
}

impl CreateCommentRequest {
    pub fn into_draft(self) -> CommentDraft {
        CommentDraft {
            content: self.content,
        }
    }
}

/// Inbound body for `PUT`/`PATCH` on a comment.
#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    #[serde(default)]
    pub content: Option<String>,
}

impl UpdateCommentRequest {
    pub fn into_patch(self) -> CommentPatch {
        CommentPatch {
            content: self.content,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub post_id: PostId,
    pub content: String,
    pub created_at: Timestamp,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

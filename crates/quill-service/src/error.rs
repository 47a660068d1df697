use quill_core::{CommentId, PostId, StorageError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// A single field-level validation failure, keyed by the wire field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldViolation {
    pub fn missing(field: &'static str) -> Self {
        Self {
            field,
            message: "this field is required",
        }
    }

    pub fn blank(field: &'static str) -> Self {
        Self {
            field,
            message: "this field may not be blank",
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),
    #[error("post {0} does not exist")]
    PostNotFound(PostId),
    #[error("comment {comment_id} for post {post_id} does not exist")]
    CommentNotFound {
        post_id: PostId,
        comment_id: CommentId,
    },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

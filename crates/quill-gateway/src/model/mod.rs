pub mod comment;
pub mod post;

pub use comment::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
pub use post::{CreatePostRequest, PostResponse, UpdatePostRequest};

use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

//! Core types and traits for the Quill blog service.
//!
//! This crate provides the entities and repository contracts shared by the
//! storage backends, the service layer, and the HTTP gateway.

pub mod comment;
pub mod error;
pub mod post;
pub mod repository;

pub use comment::{Comment, CommentId};
pub use error::StorageError;
pub use post::{Post, PostId};
pub use repository::{
    CommentPatch, CommentRepository, NewComment, NewPost, PostPatch, PostRepository,
};

use crate::comment::{Comment, CommentId};
use crate::error::Result;
use crate::post::{Post, PostId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fields required to insert a new post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

/// Partial update for a post.
///
/// Only fields in this struct can ever be changed; anything else a caller
/// submits is discarded before it reaches the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Fields required to insert a new comment under a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub content: String,
}

/// Partial update for a comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentPatch {
    pub content: Option<String>,
}

impl CommentPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }
}

/// Storage contract for posts.
///
/// Absence is signaled with `None`/`false`, never an error; only genuine
/// storage faults surface as `Err`.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Returns all posts in ascending id order.
    async fn list(&self) -> Result<Vec<Post>>;

    /// Retrieves a post by id. Returns `None` if the id does not exist.
    async fn get(&self, id: PostId) -> Result<Option<Post>>;

    /// Persists a new post and returns it with generated id and timestamps.
    async fn insert(&self, new: NewPost) -> Result<Post>;

    /// Applies the present patch fields and refreshes `updated_at`.
    /// Returns `None` if the id does not exist.
    async fn update(&self, id: PostId, patch: PostPatch) -> Result<Option<Post>>;

    /// Deletes a post. Returns `true` if a row existed and was removed.
    async fn delete(&self, id: PostId) -> Result<bool>;
}

/// Storage contract for comments.
///
/// Every operation is scoped by the parent post id; a comment whose
/// `post_id` does not match the given one is treated as absent.
#[async_trait]
pub trait CommentRepository: Send + Sync + 'static {
    /// Returns all comments of a post in ascending id order.
    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>>;

    /// Retrieves a comment by `(post_id, id)`. Returns `None` when the pair
    /// does not resolve.
    async fn get(&self, post_id: PostId, id: CommentId) -> Result<Option<Comment>>;

    /// Persists a new comment under a post.
    /// Fails with [`StorageError::ForeignKey`](crate::StorageError::ForeignKey)
    /// when the post does not exist.
    async fn insert(&self, post_id: PostId, new: NewComment) -> Result<Comment>;

    /// Applies the present patch fields to a comment scoped by its post.
    /// Returns `None` when the pair does not resolve.
    async fn update(
        &self,
        post_id: PostId,
        id: CommentId,
        patch: CommentPatch,
    ) -> Result<Option<Comment>>;

    /// Deletes a comment scoped by its post. Returns `true` if a row existed
    /// and was removed.
    async fn delete(&self, post_id: PostId, id: CommentId) -> Result<bool>;
}

use crate::error::{FieldViolation, Result, ServiceError};
use crate::validate::require_text;
use quill_core::repository::{CommentPatch, CommentRepository, NewComment, PostRepository};
use quill_core::{Comment, CommentId, PostId, StorageError};
use std::sync::Arc;
use tracing::{debug, trace};

/// Inbound fields for creating a comment, before validation.
#[derive(Debug, Clone, Default)]
pub struct CommentDraft {
    pub content: Option<String>,
}

/// Comment operations, scoped by the parent post.
///
/// Holds the post repository as well so the parent reference can be checked
/// before inserting.
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { comments, posts }
    }

    /// Returns all comments of a post.
    ///
    /// An unknown post id yields an empty list; the parent reference is only
    /// enforced on the create path.
    pub async fn list(&self, post_id: PostId) -> Result<Vec<Comment>> {
        Ok(self.comments.list_for_post(post_id).await?)
    }

    /// Retrieves a comment by its `(post, comment)` pair.
    pub async fn get(&self, post_id: PostId, id: CommentId) -> Result<Comment> {
        trace!(post_id = %post_id, id = %id, "fetching comment");

        match self.comments.get(post_id, id).await? {
            Some(comment) => Ok(comment),
            None => Err(ServiceError::CommentNotFound {
                post_id,
                comment_id: id,
            }),
        }
    }

    /// Validates the draft and persists a new comment under a post.
    ///
    /// Fails with [`ServiceError::PostNotFound`] when the parent post does
    /// not exist, including when it vanishes between the existence check and
    /// the insert.
    pub async fn create(&self, post_id: PostId, draft: CommentDraft) -> Result<Comment> {
        let new = validate_draft(draft)?;

        if self.posts.get(post_id).await?.is_none() {
            return Err(ServiceError::PostNotFound(post_id));
        }

        match self.comments.insert(post_id, new).await {
            Ok(comment) => {
                debug!(id = %comment.id, post_id = %post_id, preview = %comment, "created comment");
                Ok(comment)
            }
            Err(StorageError::ForeignKey(_)) => Err(ServiceError::PostNotFound(post_id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Applies a partial update to a comment scoped by its post.
    ///
    /// Follows the same patch policy as posts: no fields is rejected, a
    /// present-but-blank field is rejected as blank.
    pub async fn update(
        &self,
        post_id: PostId,
        id: CommentId,
        patch: CommentPatch,
    ) -> Result<Comment> {
        validate_patch(&patch)?;

        match self.comments.update(post_id, id, patch).await? {
            Some(comment) => {
                debug!(id = %comment.id, post_id = %post_id, "updated comment");
                Ok(comment)
            }
            None => Err(ServiceError::CommentNotFound {
                post_id,
                comment_id: id,
            }),
        }
    }

    /// Deletes a comment scoped by its post.
    pub async fn delete(&self, post_id: PostId, id: CommentId) -> Result<()> {
        if self.comments.delete(post_id, id).await? {
            debug!(id = %id, post_id = %post_id, "deleted comment");
            Ok(())
        } else {
            Err(ServiceError::CommentNotFound {
                post_id,
                comment_id: id,
            })
        }
    }
}

fn validate_draft(draft: CommentDraft) -> Result<NewComment> {
    let mut violations = Vec::new();

    match require_text("content", draft.content, &mut violations) {
        Some(content) => Ok(NewComment { content }),
        None => Err(ServiceError::Validation(violations)),
    }
}

fn validate_patch(patch: &CommentPatch) -> Result<()> {
    if patch.is_empty() {
        return Err(ServiceError::Validation(vec![FieldViolation::missing(
            "content",
        )]));
    }

    if matches!(&patch.content, Some(content) if content.trim().is_empty()) {
        return Err(ServiceError::Validation(vec![FieldViolation::blank(
            "content",
        )]));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::{PostDraft, PostService};
    use quill_storage::InMemoryRepository;

    fn services() -> (PostService, CommentService) {
        let repo = Arc::new(InMemoryRepository::new());
        let posts = PostService::new(repo.clone());
        let comments = CommentService::new(repo.clone(), repo);
        (posts, comments)
    }

    async fn seeded_post(posts: &PostService) -> quill_core::Post {
        posts
            .create(PostDraft {
                title: Some("Test Post".to_string()),
                content: Some("This is a test post".to_string()),
            })
            .await
            .unwrap()
    }

    fn draft(content: &str) -> CommentDraft {
        CommentDraft {
            content: Some(content.to_string()),
        }
    }

    #[tokio::test]
    async fn create_and_list_by_post() {
        let (posts, comments) = services();
        let post = seeded_post(&posts).await;

        let comment = comments
            .create(post.id, draft("This is a test comment"))
            .await
            .unwrap();
        assert_eq!(comment.to_string(), "This is a test comm");

        let listed = comments.list(post.id).await.unwrap();
        assert_eq!(listed, vec![comment]);
    }

    #[tokio::test]
    async fn create_under_unknown_post_is_post_not_found() {
        let (_, comments) = services();

        let err = comments
            .create(PostId::new(42), draft("orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::PostNotFound(_)));
    }

    #[tokio::test]
    async fn create_with_blank_content_is_a_validation_error() {
        let (posts, comments) = services();
        let post = seeded_post(&posts).await;

        let err = comments.create(post.id, draft(" ")).await.unwrap_err();
        let ServiceError::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert_eq!(violations[0].field, "content");
    }

    #[tokio::test]
    async fn get_with_mismatched_post_does_not_resolve() {
        let (posts, comments) = services();
        let post = seeded_post(&posts).await;
        let other = seeded_post(&posts).await;
        let comment = comments.create(post.id, draft("scoped")).await.unwrap();

        let err = comments.get(other.id, comment.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::CommentNotFound { .. }));

        let got = comments.get(post.id, comment.id).await.unwrap();
        assert_eq!(got.content, "scoped");
    }

    #[tokio::test]
    async fn update_changes_only_submitted_fields() {
        let (posts, comments) = services();
        let post = seeded_post(&posts).await;
        let comment = comments.create(post.id, draft("before")).await.unwrap();

        let updated = comments
            .update(
                post.id,
                comment.id,
                CommentPatch {
                    content: Some("after".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.content, "after");
        assert_eq!(updated.created_at, comment.created_at);
    }

    #[tokio::test]
    async fn update_with_empty_patch_is_rejected() {
        let (posts, comments) = services();
        let post = seeded_post(&posts).await;
        let comment = comments.create(post.id, draft("body")).await.unwrap();

        let err = comments
            .update(post.id, comment.id, CommentPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (posts, comments) = services();
        let post = seeded_post(&posts).await;
        let comment = comments.create(post.id, draft("gone")).await.unwrap();

        comments.delete(post.id, comment.id).await.unwrap();

        let err = comments.get(post.id, comment.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::CommentNotFound { .. }));
    }
}

use crate::error::{FieldViolation, Result, ServiceError};
use crate::validate::{reject_blank, require_text};
use quill_core::repository::{NewPost, PostPatch, PostRepository};
use quill_core::{Post, PostId};
use std::sync::Arc;
use tracing::{debug, trace};

/// Inbound fields for creating a post, before validation.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Post operations: a validation gate plus not-found normalization over a
/// [`PostRepository`].
#[derive(Clone)]
pub struct PostService {
    repository: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        Self { repository }
    }

    /// Returns all posts.
    pub async fn list(&self) -> Result<Vec<Post>> {
        Ok(self.repository.list().await?)
    }

    /// Retrieves a post, failing with [`ServiceError::PostNotFound`] when the
    /// id does not resolve.
    pub async fn get(&self, id: PostId) -> Result<Post> {
        trace!(id = %id, "fetching post");

        match self.repository.get(id).await? {
            Some(post) => Ok(post),
            None => Err(ServiceError::PostNotFound(id)),
        }
    }

    /// Validates the draft and persists a new post.
    ///
    /// Title and content must both be present and non-blank; a draft missing
    /// both yields a violation for each field.
    pub async fn create(&self, draft: PostDraft) -> Result<Post> {
        let new = validate_draft(draft)?;
        let post = self.repository.insert(new).await?;
        debug!(id = %post.id, "created post");
        Ok(post)
    }

    /// Applies a partial update.
    ///
    /// A patch with no fields is rejected; a present-but-blank field is
    /// rejected as blank. Comment updates follow the same policy.
    pub async fn update(&self, id: PostId, patch: PostPatch) -> Result<Post> {
        validate_patch(&patch)?;

        match self.repository.update(id, patch).await? {
            Some(post) => {
                debug!(id = %post.id, "updated post");
                Ok(post)
            }
            None => Err(ServiceError::PostNotFound(id)),
        }
    }

    /// Deletes a post, failing with [`ServiceError::PostNotFound`] when
    /// nothing was removed.
    pub async fn delete(&self, id: PostId) -> Result<()> {
        if self.repository.delete(id).await? {
            debug!(id = %id, "deleted post");
            Ok(())
        } else {
            Err(ServiceError::PostNotFound(id))
        }
    }
}

fn validate_draft(draft: PostDraft) -> Result<NewPost> {
    let mut violations = Vec::new();
    let title = require_text("title", draft.title, &mut violations);
    let content = require_text("content", draft.content, &mut violations);

    match (title, content) {
        (Some(title), Some(content)) => Ok(NewPost { title, content }),
        _ => Err(ServiceError::Validation(violations)),
    }
}

fn validate_patch(patch: &PostPatch) -> Result<()> {
    let mut violations = Vec::new();

    if patch.is_empty() {
        violations.push(FieldViolation::missing("title"));
        violations.push(FieldViolation::missing("content"));
    } else {
        reject_blank("title", &patch.title, &mut violations);
        reject_blank("content", &patch.content, &mut violations);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(violations))
    }
}

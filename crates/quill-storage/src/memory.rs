use async_trait::async_trait;
use dashmap::DashMap;
use jiff::Timestamp;
use quill_core::error::{Result, StorageError};
use quill_core::repository::{CommentPatch, NewComment, NewPost, PostPatch};
use quill_core::{Comment, CommentId, CommentRepository, Post, PostId, PostRepository};
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory implementation of both repository contracts using DashMap.
///
/// Ids come from per-entity atomic counters, starting at 1 like the MySQL
/// auto-increment columns. Deleting a post removes its comments, mirroring
/// the `ON DELETE CASCADE` constraint of the MySQL schema.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    posts: DashMap<i64, Post>,
    comments: DashMap<i64, Comment>,
    next_post_id: AtomicI64,
    next_comment_id: AtomicI64,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryRepository {
    async fn list(&self) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self.posts.iter().map(|entry| entry.value().clone()).collect();
        posts.sort_by_key(|post| post.id);
        Ok(posts)
    }

    async fn get(&self, id: PostId) -> Result<Option<Post>> {
        Ok(self.posts.get(&id.as_i64()).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, new: NewPost) -> Result<Post> {
        let id = self.next_post_id.fetch_add(1, Ordering::Relaxed) + 1;
        let now = Timestamp::now();
        let post = Post {
            id: PostId::new(id),
            title: new.title,
            content: new.content,
            created_at: now,
            updated_at: now,
        };

        self.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: PostId, patch: PostPatch) -> Result<Option<Post>> {
        let Some(mut entry) = self.posts.get_mut(&id.as_i64()) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            entry.title = title;
        }
        if let Some(content) = patch.content {
            entry.content = content;
        }
        entry.updated_at = Timestamp::now();

        Ok(Some(entry.value().clone()))
    }

    async fn delete(&self, id: PostId) -> Result<bool> {
        let removed = self.posts.remove(&id.as_i64()).is_some();
        if removed {
            // Cascade, as the MySQL foreign key would.
            self.comments.retain(|_, comment| comment.post_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl CommentRepository for InMemoryRepository {
    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|entry| entry.post_id == post_id)
            .map(|entry| entry.value().clone())
            .collect();
        comments.sort_by_key(|comment| comment.id);
        Ok(comments)
    }

    async fn get(&self, post_id: PostId, id: CommentId) -> Result<Option<Comment>> {
        let Some(entry) = self.comments.get(&id.as_i64()) else {
            return Ok(None);
        };

        if entry.post_id != post_id {
            return Ok(None);
        }

        Ok(Some(entry.value().clone()))
    }

    async fn insert(&self, post_id: PostId, new: NewComment) -> Result<Comment> {
        if !self.posts.contains_key(&post_id.as_i64()) {
            return Err(StorageError::ForeignKey(post_id.to_string()));
        }

        let id = self.next_comment_id.fetch_add(1, Ordering::Relaxed) + 1;
        let comment = Comment {
            id: CommentId::new(id),
            post_id,
            content: new.content,
            created_at: Timestamp::now(),
        };

        self.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn update(
        &self,
        post_id: PostId,
        id: CommentId,
        patch: CommentPatch,
    ) -> Result<Option<Comment>> {
        let Some(mut entry) = self.comments.get_mut(&id.as_i64()) else {
            return Ok(None);
        };

        if entry.post_id != post_id {
            return Ok(None);
        }

        if let Some(content) = patch.content {
            entry.content = content;
        }

        Ok(Some(entry.value().clone()))
    }

    async fn delete(&self, post_id: PostId, id: CommentId) -> Result<bool> {
        let Some(entry) = self.comments.get(&id.as_i64()) else {
            return Ok(false);
        };

        if entry.post_id != post_id {
            return Ok(false);
        }

        drop(entry);
        Ok(self.comments.remove(&id.as_i64()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Bound as trait objects because the store implements both repository
    // traits and the shared method names would otherwise be ambiguous.
    fn store() -> (Arc<dyn PostRepository>, Arc<dyn CommentRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        (repo.clone(), repo)
    }

    fn new_post(title: &str, content: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    fn new_comment(content: &str) -> NewComment {
        NewComment {
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_get_post() {
        let (posts, _) = store();

        let post = posts
            .insert(new_post("Test Post", "This is a test post"))
            .await
            .unwrap();

        let got = posts.get(post.id).await.unwrap().unwrap();
        assert_eq!(got.title, "Test Post");
        assert_eq!(got.content, "This is a test post");
        assert_eq!(got.created_at, got.updated_at);
    }

    #[tokio::test]
    async fn get_nonexistent_post() {
        let (posts, _) = store();

        let got = posts.get(PostId::new(42)).await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn list_posts_in_id_order() {
        let (posts, _) = store();

        posts.insert(new_post("first", "a")).await.unwrap();
        posts.insert(new_post("second", "b")).await.unwrap();
        posts.insert(new_post("third", "c")).await.unwrap();

        let all = posts.list().await.unwrap();
        let titles: Vec<&str> = all.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let (posts, _) = store();
        let post = posts.insert(new_post("before", "body")).await.unwrap();

        let updated = posts
            .update(
                post.id,
                PostPatch {
                    title: Some("after".to_string()),
                    content: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "after");
        assert_eq!(updated.content, "body");
        assert_eq!(updated.created_at, post.created_at);
    }

    #[tokio::test]
    async fn update_nonexistent_post_returns_none() {
        let (posts, _) = store();

        let updated = posts
            .update(PostId::new(42), PostPatch::default())
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn delete_post_then_get_returns_none() {
        let (posts, _) = store();
        let post = posts.insert(new_post("gone", "soon")).await.unwrap();

        assert!(posts.delete(post.id).await.unwrap());
        assert!(posts.get(post.id).await.unwrap().is_none());
        assert!(!posts.delete(post.id).await.unwrap());
    }

    #[tokio::test]
    async fn comment_insert_requires_existing_post() {
        let (_, comments) = store();

        let err = comments
            .insert(PostId::new(42), new_comment("orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::ForeignKey(_)));
    }

    #[tokio::test]
    async fn comment_roundtrip_scoped_by_post() {
        let (posts, comments) = store();
        let post = posts.insert(new_post("parent", "body")).await.unwrap();

        let comment = comments
            .insert(post.id, new_comment("This is a test comment"))
            .await
            .unwrap();

        let got = comments.get(post.id, comment.id).await.unwrap().unwrap();
        assert_eq!(got.content, "This is a test comment");

        // A mismatched parent id does not resolve.
        let other = posts.insert(new_post("other", "body")).await.unwrap();
        let got = comments.get(other.id, comment.id).await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn comment_update_and_delete_respect_scope() {
        let (posts, comments) = store();
        let post = posts.insert(new_post("parent", "body")).await.unwrap();
        let other = posts.insert(new_post("other", "body")).await.unwrap();
        let comment = comments
            .insert(post.id, new_comment("original"))
            .await
            .unwrap();

        let updated = comments
            .update(
                other.id,
                comment.id,
                CommentPatch {
                    content: Some("hijacked".to_string()),
                },
            )
            .await
            .unwrap();
        assert!(updated.is_none());

        assert!(!comments.delete(other.id, comment.id).await.unwrap());
        assert!(comments.delete(post.id, comment.id).await.unwrap());
    }

    #[tokio::test]
    async fn deleting_post_cascades_to_comments() {
        let (posts, comments) = store();
        let post = posts.insert(new_post("parent", "body")).await.unwrap();
        let comment = comments.insert(post.id, new_comment("child")).await.unwrap();

        posts.delete(post.id).await.unwrap();

        assert!(comments.list_for_post(post.id).await.unwrap().is_empty());
        let got = comments.get(post.id, comment.id).await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn list_comments_for_unknown_post_is_empty() {
        let (_, comments) = store();

        let got = comments.list_for_post(PostId::new(42)).await.unwrap();
        assert!(got.is_empty());
    }

    #[tokio::test]
    async fn ids_are_unique_and_increasing() {
        let (posts, _) = store();

        let a = posts.insert(new_post("a", "a")).await.unwrap();
        let b = posts.insert(new_post("b", "b")).await.unwrap();

        assert!(a.id < b.id);
    }
}

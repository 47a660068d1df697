use async_trait::async_trait;
use jiff::Timestamp;
use quill_core::error::{Result, StorageError};
use quill_core::repository::{CommentPatch, NewComment, NewPost, PostPatch};
use quill_core::{Comment, CommentId, CommentRepository, Post, PostId, PostRepository};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

/// MySQL implementation of the repository contracts.
///
/// Timestamps are stored as whole unix seconds. Comment rows carry a
/// `FOREIGN KEY (post_id) ... ON DELETE CASCADE`, so deleting a post removes
/// its comments at the store level.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn now_unix_seconds() -> i64 {
    Timestamp::now().as_second()
}

fn parse_timestamp(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds)
        .map_err(|e| StorageError::InvalidData(format!("invalid timestamp '{}': {e}", seconds)))
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_foreign_key_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn post_from_row(row: &MySqlRow) -> Result<Post> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let title: String = row.try_get("title").map_err(map_sqlx_error)?;
    let content: String = row.try_get("content").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
    let updated_at: i64 = row.try_get("updated_at").map_err(map_sqlx_error)?;

    Ok(Post {
        id: PostId::new(id),
        title,
        content,
        created_at: parse_timestamp(created_at)?,
        updated_at: parse_timestamp(updated_at)?,
    })
}

fn comment_from_row(row: &MySqlRow) -> Result<Comment> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let post_id: i64 = row.try_get("post_id").map_err(map_sqlx_error)?;
    let content: String = row.try_get("content").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(Comment {
        id: CommentId::new(id),
        post_id: PostId::new(post_id),
        content,
        created_at: parse_timestamp(created_at)?,
    })
}

#[async_trait]
impl PostRepository for MySqlRepository {
    async fn list(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, created_at, updated_at
            FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(post_from_row).collect()
    }

    async fn get(&self, id: PostId) -> Result<Option<Post>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, content, created_at, updated_at
            FROM posts
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(post_from_row).transpose()
    }

    async fn insert(&self, new: NewPost) -> Result<Post> {
        let now = now_unix_seconds();

        let result = sqlx::query(
            r#"
            INSERT INTO posts (title, content, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&new.title)
        .bind(&new.content)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let created_at = parse_timestamp(now)?;
        Ok(Post {
            id: PostId::new(result.last_insert_id() as i64),
            title: new.title,
            content: new.content,
            created_at,
            updated_at: created_at,
        })
    }

    async fn update(&self, id: PostId, patch: PostPatch) -> Result<Option<Post>> {
        let now = now_unix_seconds();

        sqlx::query(
            r#"
            UPDATE posts
            SET title = COALESCE(?, title),
                content = COALESCE(?, content),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(patch.title)
        .bind(patch.content)
        .bind(now)
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        PostRepository::get(self, id).await
    }

    async fn delete(&self, id: PostId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CommentRepository for MySqlRepository {
    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, post_id, content, created_at
            FROM comments
            WHERE post_id = ?
            ORDER BY id
            "#,
        )
        .bind(post_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(comment_from_row).collect()
    }

    async fn get(&self, post_id: PostId, id: CommentId) -> Result<Option<Comment>> {
        let row = sqlx::query(
            r#"
            SELECT id, post_id, content, created_at
            FROM comments
            WHERE id = ? AND post_id = ?
            "#,
        )
        .bind(id.as_i64())
        .bind(post_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(comment_from_row).transpose()
    }

    async fn insert(&self, post_id: PostId, new: NewComment) -> Result<Comment> {
        let now = now_unix_seconds();

        let result = sqlx::query(
            r#"
            INSERT INTO comments (post_id, content, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(post_id.as_i64())
        .bind(&new.content)
        .bind(now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(result) => Ok(Comment {
                id: CommentId::new(result.last_insert_id() as i64),
                post_id,
                content: new.content,
                created_at: parse_timestamp(now)?,
            }),
            Err(err) if is_foreign_key_violation(&err) => {
                Err(StorageError::ForeignKey(post_id.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn update(
        &self,
        post_id: PostId,
        id: CommentId,
        patch: CommentPatch,
    ) -> Result<Option<Comment>> {
        sqlx::query(
            r#"
            UPDATE comments
            SET content = COALESCE(?, content)
            WHERE id = ? AND post_id = ?
            "#,
        )
        .bind(patch.content)
        .bind(id.as_i64())
        .bind(post_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        CommentRepository::get(self, post_id, id).await
    }

    async fn delete(&self, post_id: PostId, id: CommentId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ? AND post_id = ?")
            .bind(id.as_i64())
            .bind(post_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

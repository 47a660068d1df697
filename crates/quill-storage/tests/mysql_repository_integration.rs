use std::sync::Arc;
use std::time::Duration;

use quill_core::repository::{NewComment, NewPost, PostPatch};
use quill_core::PostId;
use quill_storage::{CommentRepository, MySqlRepository, PostRepository, StorageError};
use quill_test_infra::mysql::{MySqlServer, MysqlConfig};
use sqlx::mysql::MySqlPoolOptions;

struct Fixture {
    _mysql: MySqlServer,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl Fixture {
    async fn start() -> Self {
        let mysql = MySqlServer::new(MysqlConfig::builder().build())
            .await
            .expect("start mysql");
        let url = mysql.database_url().await.expect("mysql url");
        let pool = connect_with_retry(&url).await;

        sqlx::query(include_str!("../ddl/mysql/posts.sql"))
            .execute(&pool)
            .await
            .expect("create posts schema");
        sqlx::query(include_str!("../ddl/mysql/comments.sql"))
            .execute(&pool)
            .await
            .expect("create comments schema");

        let repo = Arc::new(MySqlRepository::new(pool));
        Self {
            _mysql: mysql,
            posts: repo.clone(),
            comments: repo,
        }
    }
}

async fn connect_with_retry(url: &str) -> sqlx::MySqlPool {
    let mut last_error = None;

    for _ in 0..20 {
        match MySqlPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
        {
            Ok(pool) => return pool,
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }

    panic!("failed to connect mysql: {last_error:?}");
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
async fn insert_and_read_back_post() {
    let fixture = Fixture::start().await;

    let post = fixture
        .posts
        .insert(new_post("Test Post", "This is a test post"))
        .await
        .unwrap();

    let got = fixture.posts.get(post.id).await.unwrap().unwrap();
    assert_eq!(got, post);

    let all = fixture.posts.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Test Post");
}

#[tokio::test]
async fn get_unknown_post_returns_none() {
    let fixture = Fixture::start().await;

    let got = fixture.posts.get(PostId::new(4242)).await.unwrap();
    assert!(got.is_none());
}

#[tokio::test]
async fn update_applies_partial_patch_and_refreshes_updated_at() {
    let fixture = Fixture::start().await;
    let post = fixture
        .posts
        .insert(new_post("before", "body"))
        .await
        .unwrap();

    let updated = fixture
        .posts
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
    assert!(updated.updated_at >= post.updated_at);
}

#[tokio::test]
async fn update_unknown_post_returns_none() {
    let fixture = Fixture::start().await;

    let updated = fixture
        .posts
        .update(PostId::new(4242), PostPatch::default())
        .await
        .unwrap();
    assert!(updated.is_none());
}

#[tokio::test]
async fn delete_post_removes_row_once() {
    let fixture = Fixture::start().await;
    let post = fixture.posts.insert(new_post("gone", "soon")).await.unwrap();

    assert!(fixture.posts.delete(post.id).await.unwrap());
    assert!(fixture.posts.get(post.id).await.unwrap().is_none());
    assert!(!fixture.posts.delete(post.id).await.unwrap());
}

#[tokio::test]
async fn orphan_comment_insert_is_a_foreign_key_error() {
    let fixture = Fixture::start().await;

    let err = fixture
        .comments
        .insert(PostId::new(4242), new_comment("orphan"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ForeignKey(_)));
}

#[tokio::test]
async fn comment_lifecycle_scoped_by_post() {
    let fixture = Fixture::start().await;
    let post = fixture
        .posts
        .insert(new_post("parent", "body"))
        .await
        .unwrap();
    let other = fixture
        .posts
        .insert(new_post("other", "body"))
        .await
        .unwrap();

    let comment = fixture
        .comments
        .insert(post.id, new_comment("This is a test comment"))
        .await
        .unwrap();

    let listed = fixture.comments.list_for_post(post.id).await.unwrap();
    assert_eq!(listed, vec![comment.clone()]);

    // The pair must match for the comment to be addressable.
    assert!(fixture
        .comments
        .get(other.id, comment.id)
        .await
        .unwrap()
        .is_none());
    assert!(!fixture
        .comments
        .delete(other.id, comment.id)
        .await
        .unwrap());

    assert!(fixture.comments.delete(post.id, comment.id).await.unwrap());
    assert!(fixture
        .comments
        .get(post.id, comment.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn deleting_post_cascades_to_its_comments() {
    let fixture = Fixture::start().await;
    let post = fixture
        .posts
        .insert(new_post("parent", "body"))
        .await
        .unwrap();
    fixture
        .comments
        .insert(post.id, new_comment("child"))
        .await
        .unwrap();

    fixture.posts.delete(post.id).await.unwrap();

    let listed = fixture.comments.list_for_post(post.id).await.unwrap();
    assert!(listed.is_empty());
}

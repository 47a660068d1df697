use super::{parse_id, render, Result};
use crate::state::AppState;
use askama::Template;
use axum::extract::{Path, State};
use axum::response::Html;
use quill_core::{Post, PostId};

#[derive(Template)]
#[template(path = "posts/post_list.html")]
struct PostListPage {
    posts: Vec<Post>,
}

pub async fn post_list_page(State(state): State<AppState>) -> Result<Html<String>> {
    let posts = state.posts().list().await?;
    render(&PostListPage { posts })
}

#[derive(Template)]
#[template(path = "posts/post_detail.html")]
struct PostDetailPage {
    post: Post,
}

pub async fn post_detail_page(
    Path(post_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let id = PostId::new(parse_id(&post_id)?);
    let post = state.posts().get(id).await?;
    render(&PostDetailPage { post })
}

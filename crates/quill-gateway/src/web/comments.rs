use super::{parse_id, render, Result};
use crate::state::AppState;
use askama::Template;
use axum::extract::{Path, State};
use axum::response::Html;
use quill_core::{Comment, CommentId, PostId};

#[derive(Template)]
#[template(path = "comments/comment_list.html")]
struct CommentListPage {
    post_id: PostId,
    comments: Vec<Comment>,
}

pub async fn comment_list_page(
    Path(post_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let post_id = PostId::new(parse_id(&post_id)?);
    let comments = state.comments().list(post_id).await?;
    render(&CommentListPage { post_id, comments })
}

#[derive(Template)]
#[template(path = "comments/comment_detail.html")]
struct CommentDetailPage {
    comment: Comment,
}

pub async fn comment_detail_page(
    Path((post_id, comment_id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let post_id = PostId::new(parse_id(&post_id)?);
    let comment_id = CommentId::new(parse_id(&comment_id)?);
    let comment = state.comments().get(post_id, comment_id).await?;
    render(&CommentDetailPage { comment })
}

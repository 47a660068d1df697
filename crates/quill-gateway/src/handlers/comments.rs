use crate::error::Result;
use crate::model::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use quill_core::{CommentId, PostId};

pub async fn list_comments_handler(
    Path(post_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<CommentResponse>>> {
    let comments = state.comments().list(PostId::new(post_id)).await?;
    Ok(Json(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}

pub async fn create_comment_handler(
    Path(post_id): Path<i64>,
    State(state): State<AppState>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>)> {
    let comment = state
        .comments()
        .create(PostId::new(post_id), request.into_draft())
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

pub async fn get_comment_handler(
    Path((post_id, comment_id)): Path<(i64, i64)>,
    State(state): State<AppState>,
) -> Result<Json<CommentResponse>> {
    let comment = state
        .comments()
        .get(PostId::new(post_id), CommentId::new(comment_id))
        .await?;
    Ok(Json(comment.into()))
}

pub async fn update_comment_handler(
    Path((post_id, comment_id)): Path<(i64, i64)>,
    State(state): State<AppState>,
    Json(request): Json<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>> {
    let comment = state
        .comments()
        .update(
            PostId::new(post_id),
            CommentId::new(comment_id),
            request.into_patch(),
        )
        .await?;
    Ok(Json(comment.into()))
}

pub async fn delete_comment_handler(
    Path((post_id, comment_id)): Path<(i64, i64)>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    state
        .comments()
        .delete(PostId::new(post_id), CommentId::new(comment_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

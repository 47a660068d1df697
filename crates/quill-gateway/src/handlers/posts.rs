use crate::error::Result;
use crate::model::{CreatePostRequest, PostResponse, UpdatePostRequest};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use quill_core::PostId;

pub async fn list_posts_handler(State(state): State<AppState>) -> Result<Json<Vec<PostResponse>>> {
    let posts = state.posts().list().await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

pub async fn create_post_handler(
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>)> {
    let post = state.posts().create(request.into_draft()).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

pub async fn get_post_handler(
    Path(post_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<PostResponse>> {
    let post = state.posts().get(PostId::new(post_id)).await?;
    Ok(Json(post.into()))
}

pub async fn update_post_handler(
    Path(post_id): Path<i64>,
    State(state): State<AppState>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>> {
    let post = state
        .posts()
        .update(PostId::new(post_id), request.into_patch())
        .await?;
    Ok(Json(post.into()))
}

pub async fn delete_post_handler(
    Path(post_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    state.posts().delete(PostId::new(post_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

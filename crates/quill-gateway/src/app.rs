use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_comment_handler, create_post_handler, delete_comment_handler, delete_post_handler,
    get_comment_handler, get_post_handler, health_handler, list_comments_handler,
    list_posts_handler, update_comment_handler, update_post_handler,
};
use crate::state::AppState;
use crate::web;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest("/api/posts", Self::api_routes())
            .nest("/posts", Self::page_routes())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    fn api_routes() -> Router<AppState> {
        Router::new()
            .route("/", get(list_posts_handler).post(create_post_handler))
            .route(
                "/{post_id}",
                get(get_post_handler)
                    .put(update_post_handler)
                    .patch(update_post_handler)
                    .delete(delete_post_handler),
            )
            .route(
                "/{post_id}/comments",
                get(list_comments_handler).post(create_comment_handler),
            )
            .route(
                "/{post_id}/comments/{comment_id}",
                get(get_comment_handler)
                    .put(update_comment_handler)
                    .patch(update_comment_handler)
                    .delete(delete_comment_handler),
            )
    }

    fn page_routes() -> Router<AppState> {
        Router::new()
            .route("/", get(web::post_list_page))
            .route("/{post_id}", get(web::post_detail_page))
            .route("/{post_id}/comments", get(web::comment_list_page))
            .route(
                "/{post_id}/comments/{comment_id}",
                get(web::comment_detail_page),
            )
    }
}

pub mod comments;
pub mod posts;

pub use comments::{comment_detail_page, comment_list_page};
pub use posts::{post_detail_page, post_list_page};

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use quill_service::ServiceError;
use tracing::error;

pub type Result<T> = std::result::Result<T, PageError>;

const NOT_FOUND_BODY: &str =
    "<!doctype html><html><body><h1>404 Not Found</h1></body></html>";
const INTERNAL_BODY: &str =
    "<!doctype html><html><body><h1>500 Internal Server Error</h1></body></html>";

/// Error surface of the HTML pages.
///
/// Lookup failures and malformed path identifiers both render the 404 page;
/// anything else is a plain 500.
pub enum PageError {
    NotFound,
    Internal(String),
}

impl From<ServiceError> for PageError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::PostNotFound(_) | ServiceError::CommentNotFound { .. } => Self::NotFound,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<askama::Error> for PageError {
    fn from(err: askama::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => (StatusCode::NOT_FOUND, Html(NOT_FOUND_BODY)).into_response(),
            PageError::Internal(fault) => {
                error!(fault = %fault, "failed to render page");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(INTERNAL_BODY)).into_response()
            }
        }
    }
}

pub(crate) fn render<T: Template>(template: &T) -> Result<Html<String>> {
    Ok(Html(template.render()?))
}

/// Path segments are parsed by hand so a malformed id renders the 404 page
/// instead of a bare 400.
pub(crate) fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>().map_err(|_| PageError::NotFound)
}

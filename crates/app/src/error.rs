use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};

use crate::web::templates::ErrorTemplate;

/// Errors that escape a request handler.
///
/// Store failures inside the create handlers never get here; those are
/// reported to the user as a flash message on the home page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, page) = match &self {
            AppError::NotFound(what) => {
                debug!("{what} not found");
                (StatusCode::NOT_FOUND, ErrorTemplate::not_found())
            }
            AppError::Internal(e) => {
                error!("Request failed: {e:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorTemplate::server_error())
            }
            AppError::Render(e) => {
                error!("Template rendering failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorTemplate::server_error())
            }
        };

        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(_) => (status, status.canonical_reason().unwrap_or("error")).into_response(),
        }
    }
}

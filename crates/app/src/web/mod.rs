use axum::Router;
use axum::response::Html;
use axum::routing::{get, post};
use chrono::{Local, NaiveDateTime};
use sqlx::SqlitePool;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::{AppError, AppResult};
use templates::{HomeTemplate, render};

mod artists;
mod shows;
pub mod templates;
mod venues;

/// Builds the site router. The pool is the only shared state.
pub fn router(pool: SqlitePool, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/venues", get(venues::list))
        .route("/venues/search", post(venues::search))
        .route("/venues/create", get(venues::create_form).post(venues::create))
        .route("/venues/{id}", get(venues::detail).delete(venues::delete))
        .route("/venues/{id}/edit", get(venues::edit_form).post(venues::edit))
        .route("/artists", get(artists::list))
        .route("/artists/search", post(artists::search))
        .route("/artists/create", get(artists::create_form).post(artists::create))
        .route("/artists/{id}", get(artists::detail))
        .route("/artists/{id}/edit", get(artists::edit_form).post(artists::edit))
        .route("/shows", get(shows::list))
        .route("/shows/create", get(shows::create_form).post(shows::create))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(pool)
}

async fn home() -> AppResult<Html<String>> {
    render(&HomeTemplate { message: None })
}

async fn not_found() -> AppError {
    AppError::NotFound("page".to_string())
}

/// The instant shows are classified against. Taken fresh per request.
fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Path ids that are not integers are treated as missing pages.
fn parse_id(raw: &str, kind: &str) -> AppResult<i64> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("{kind} {raw:?}")))
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    pub async fn test_app() -> (Router, SqlitePool) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .unwrap();
        gigbook_db::migrate(&pool).await.unwrap();
        (super::router(pool.clone(), "static"), pool)
    }

    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        let (status, _, body) = send(app, request).await;
        (status, body)
    }

    pub async fn post_form(
        app: &Router,
        uri: &str,
        body: &str,
    ) -> (StatusCode, axum::http::HeaderMap, String) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }
}

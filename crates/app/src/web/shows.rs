use anyhow::Context;
use axum::extract::{Form, State};
use axum::response::Html;
use gigbook_models::{Show, ShowForm, parse_start_time};
use sqlx::SqlitePool;
use tracing::error;

use super::now;
use super::templates::{HomeTemplate, ShowFormTemplate, ShowsTemplate, render};
use crate::error::AppResult;

pub async fn list(State(pool): State<SqlitePool>) -> AppResult<Html<String>> {
    let shows = gigbook_db::list_shows(&pool).await?;
    render(&ShowsTemplate { shows })
}

pub async fn create_form() -> AppResult<Html<String>> {
    let default_start = now().format("%Y-%m-%d %H:%M").to_string();
    render(&ShowFormTemplate { default_start })
}

pub async fn create(
    State(pool): State<SqlitePool>,
    Form(form): Form<ShowForm>,
) -> AppResult<Html<String>> {
    let message = match insert_show(&pool, &form).await {
        Ok(_) => "Show was successfully listed!",
        Err(e) => {
            error!("Failed to create show {form:?}: {e:#}");
            "ERROR - Show was not listed!"
        }
    };
    render(&HomeTemplate::flash(message))
}

async fn insert_show(pool: &SqlitePool, form: &ShowForm) -> anyhow::Result<Show> {
    let artist_id: i64 = form.artist_id.trim().parse().context("invalid artist_id")?;
    let venue_id: i64 = form.venue_id.trim().parse().context("invalid venue_id")?;
    let start_time = parse_start_time(&form.start_time)?;
    gigbook_db::create_show(pool, venue_id, artist_id, start_time).await
}

use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use gigbook_models::{SearchForm, VenueForm, group_by_location};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;

use super::templates::{
    HomeTemplate, SearchVenuesTemplate, VenueFormTemplate, VenueTemplate, VenuesTemplate, render,
};
use super::{now, parse_id};
use crate::error::{AppError, AppResult};

pub async fn list(State(pool): State<SqlitePool>) -> AppResult<Html<String>> {
    let venues = gigbook_db::list_venues(&pool, now()).await?;
    render(&VenuesTemplate { areas: group_by_location(venues) })
}

pub async fn search(
    State(pool): State<SqlitePool>,
    Form(form): Form<SearchForm>,
) -> AppResult<Html<String>> {
    let results = gigbook_db::search_venues(&pool, &form.search_term, now()).await?;
    render(&SearchVenuesTemplate { search_term: form.search_term, results })
}

pub async fn detail(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "venue")?;
    let detail = gigbook_db::venue_detail(&pool, id, now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("venue {id}")))?;
    let genres = detail.venue.genre_list();
    render(&VenueTemplate { venue: detail.venue, genres, shows: detail.shows })
}

pub async fn create_form() -> AppResult<Html<String>> {
    render(&VenueFormTemplate {
        heading: "List a new venue".to_string(),
        action: "/venues/create".to_string(),
        editing: false,
        form: VenueForm::default(),
    })
}

pub async fn create(
    State(pool): State<SqlitePool>,
    Form(form): Form<VenueForm>,
) -> AppResult<Html<String>> {
    let message = match gigbook_db::create_venue(&pool, &form).await {
        Ok(venue) => format!("Venue {} was successfully listed!", venue.name),
        Err(e) => {
            error!("Failed to create venue {:?}: {e:#}", form.name);
            format!("Venue {} experienced problems", form.name)
        }
    };
    render(&HomeTemplate::flash(message))
}

pub async fn delete(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let id = parse_id(&id, "venue")?;
    if gigbook_db::delete_venue(&pool, id).await? {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::NotFound(format!("venue {id}")))
    }
}

pub async fn edit_form(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "venue")?;
    let venue = gigbook_db::get_venue(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("venue {id}")))?;
    render(&VenueFormTemplate {
        heading: format!("Edit venue {}", venue.name),
        action: format!("/venues/{id}/edit"),
        editing: true,
        form: VenueForm::from(&venue),
    })
}

pub async fn edit(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    Form(form): Form<VenueForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "venue")?;
    match gigbook_db::update_venue(&pool, id, &form).await {
        Ok(true) => Ok(Redirect::to(&format!("/venues/{id}")).into_response()),
        Ok(false) => Err(AppError::NotFound(format!("venue {id}"))),
        Err(e) => {
            error!("Failed to update venue {id}: {e:#}");
            let page = HomeTemplate::flash(format!("Venue {} could not be updated", form.name));
            Ok(render(&page)?.into_response())
        }
    }
}

use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use gigbook_models::{ArtistForm, SearchForm};
use sqlx::SqlitePool;
use tracing::error;

use super::templates::{
    ArtistFormTemplate, ArtistTemplate, ArtistsTemplate, HomeTemplate, SearchArtistsTemplate,
    render,
};
use super::{now, parse_id};
use crate::error::{AppError, AppResult};

pub async fn list(State(pool): State<SqlitePool>) -> AppResult<Html<String>> {
    let artists = gigbook_db::list_artists(&pool, now()).await?;
    render(&ArtistsTemplate { artists })
}

pub async fn search(
    State(pool): State<SqlitePool>,
    Form(form): Form<SearchForm>,
) -> AppResult<Html<String>> {
    let results = gigbook_db::search_artists(&pool, &form.search_term, now()).await?;
    render(&SearchArtistsTemplate { search_term: form.search_term, results })
}

pub async fn detail(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "artist")?;
    let detail = gigbook_db::artist_detail(&pool, id, now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artist {id}")))?;
    let genres = detail.artist.genre_list();
    render(&ArtistTemplate { artist: detail.artist, genres, shows: detail.shows })
}

pub async fn create_form() -> AppResult<Html<String>> {
    render(&ArtistFormTemplate {
        heading: "List a new artist".to_string(),
        action: "/artists/create".to_string(),
        editing: false,
        form: ArtistForm::default(),
    })
}

pub async fn create(
    State(pool): State<SqlitePool>,
    Form(form): Form<ArtistForm>,
) -> AppResult<Html<String>> {
    let message = match gigbook_db::create_artist(&pool, &form).await {
        Ok(artist) => format!("Artist {} was successfully listed!", artist.name),
        Err(e) => {
            error!("Failed to create artist {:?}: {e:#}", form.name);
            format!("ERROR: Artist {} not listed", form.name)
        }
    };
    render(&HomeTemplate::flash(message))
}

pub async fn edit_form(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "artist")?;
    let artist = gigbook_db::get_artist(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artist {id}")))?;
    render(&ArtistFormTemplate {
        heading: format!("Edit artist {}", artist.name),
        action: format!("/artists/{id}/edit"),
        editing: true,
        form: ArtistForm::from(&artist),
    })
}

pub async fn edit(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    Form(form): Form<ArtistForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "artist")?;
    match gigbook_db::update_artist(&pool, id, &form).await {
        Ok(true) => Ok(Redirect::to(&format!("/artists/{id}")).into_response()),
        Ok(false) => Err(AppError::NotFound(format!("artist {id}"))),
        Err(e) => {
            error!("Failed to update artist {id}: {e:#}");
            let page = HomeTemplate::flash(format!("ERROR: Artist {} not updated", form.name));
            Ok(render(&page)?.into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{get, post_form, test_app};
    use axum::http::{StatusCode, header};

    #[tokio::test]
    async fn create_search_and_list() {
        let (app, _) = test_app().await;
        for name in ["Guns+N+Petals", "Matt+Quevedo", "The+Wild+Sax+Band"] {
            let (status, _, body) =
                post_form(&app, "/artists/create", &format!("name={name}&phone=326-123-5000")).await;
            assert_eq!(status, StatusCode::OK);
            assert!(body.contains("was successfully listed!"));
        }

        let (_, body) = get(&app, "/artists").await;
        assert!(body.contains("Guns N Petals"));
        assert!(body.contains("Matt Quevedo"));

        let (status, _, body) = post_form(&app, "/artists/search", "search_term=band").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("The Wild Sax Band"));
        assert!(!body.contains("Guns N Petals"));
        assert!(body.contains(": 1</h3>"));
    }

    #[tokio::test]
    async fn duplicate_names_both_listed() {
        let (app, _) = test_app().await;
        post_form(&app, "/artists/create", "name=Echo&phone=1").await;
        let (_, _, body) = post_form(&app, "/artists/create", "name=Echo&phone=1").await;
        assert!(body.contains("Artist Echo was successfully listed!"));

        let (_, _, body) = post_form(&app, "/artists/search", "search_term=echo").await;
        assert!(body.contains(": 2</h3>"));
    }

    #[tokio::test]
    async fn search_matches_non_ascii_names() {
        let (app, _) = test_app().await;
        post_form(&app, "/artists/create", "name=Sigur+R%C3%B3s&phone=1").await;
        post_form(&app, "/artists/create", "name=Matt+Quevedo&phone=1").await;

        let (status, _, body) = post_form(&app, "/artists/search", "search_term=R%C3%93S").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Sigur Rós"));
        assert!(!body.contains("Matt Quevedo"));
        assert!(body.contains(": 1</h3>"));
    }

    #[tokio::test]
    async fn missing_artist_is_404() {
        let (app, _) = test_app().await;
        assert_eq!(get(&app, "/artists/3").await.0, StatusCode::NOT_FOUND);
        assert_eq!(get(&app, "/artists/3/edit").await.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn edit_updates_and_redirects() {
        let (app, _) = test_app().await;
        post_form(&app, "/artists/create", "name=Solo&phone=1&city=Austin&state=TX").await;

        let (status, body) = get(&app, "/artists/1/edit").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("value=\"Austin\""));

        let (status, headers, _) = post_form(
            &app,
            "/artists/1/edit",
            "name=Solo+Act&phone=2&city=Austin&state=TX&seeking_venue=y",
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/artists/1");

        let (_, body) = get(&app, "/artists/1").await;
        assert!(body.contains("Solo Act"));
        assert!(body.contains("Currently seeking performance venues"));
        assert!(body.contains("Not looking for a new venue"));
    }
}

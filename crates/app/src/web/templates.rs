use askama::Template;
use axum::response::Html;
use gigbook_models::{
    Area, Artist, ArtistForm, ArtistShow, ArtistSummary, ShowListing, ShowSplit, Venue, VenueForm,
    VenueShow, VenueSummary,
};

use crate::error::AppResult;

pub fn render(template: &impl Template) -> AppResult<Html<String>> {
    Ok(Html(template.render()?))
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub message: Option<String>,
}

impl HomeTemplate {
    pub fn flash(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()) }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub code: u16,
    pub title: &'static str,
    pub detail: &'static str,
}

impl ErrorTemplate {
    pub fn not_found() -> Self {
        Self {
            code: 404,
            title: "Not Found",
            detail: "The page you are looking for does not exist.",
        }
    }

    pub fn server_error() -> Self {
        Self {
            code: 500,
            title: "Server Error",
            detail: "Something went wrong on our end. Please try again.",
        }
    }
}

// --- Venues ---

#[derive(Template)]
#[template(path = "venues.html")]
pub struct VenuesTemplate {
    pub areas: Vec<Area>,
}

#[derive(Template)]
#[template(path = "search_venues.html")]
pub struct SearchVenuesTemplate {
    pub search_term: String,
    pub results: Vec<VenueSummary>,
}

#[derive(Template)]
#[template(path = "show_venue.html")]
pub struct VenueTemplate {
    pub venue: Venue,
    pub genres: Vec<String>,
    pub shows: ShowSplit<VenueShow>,
}

/// Create and edit share one page; `action` is where the form posts.
#[derive(Template)]
#[template(path = "venue_form.html")]
pub struct VenueFormTemplate {
    pub heading: String,
    pub action: String,
    pub editing: bool,
    pub form: VenueForm,
}

// --- Artists ---

#[derive(Template)]
#[template(path = "artists.html")]
pub struct ArtistsTemplate {
    pub artists: Vec<ArtistSummary>,
}

#[derive(Template)]
#[template(path = "search_artists.html")]
pub struct SearchArtistsTemplate {
    pub search_term: String,
    pub results: Vec<ArtistSummary>,
}

#[derive(Template)]
#[template(path = "show_artist.html")]
pub struct ArtistTemplate {
    pub artist: Artist,
    pub genres: Vec<String>,
    pub shows: ShowSplit<ArtistShow>,
}

#[derive(Template)]
#[template(path = "artist_form.html")]
pub struct ArtistFormTemplate {
    pub heading: String,
    pub action: String,
    pub editing: bool,
    pub form: ArtistForm,
}

// --- Shows ---

#[derive(Template)]
#[template(path = "shows.html")]
pub struct ShowsTemplate {
    pub shows: Vec<ShowListing>,
}

/// `default_start` pre-fills the start time input.
#[derive(Template)]
#[template(path = "new_show.html")]
pub struct ShowFormTemplate {
    pub default_start: String,
}

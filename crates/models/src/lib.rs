use serde::{Deserialize, Serialize};
use sqlx::FromRow;

mod datetime;
mod listing;

pub use datetime::{DateFormat, StartTimeError, format_datetime, parse_start_time};
pub use listing::{
    Area, ArtistDetail, ArtistShow, ArtistSummary, ShowListing, ShowSplit, VenueDetail, VenueShow,
    VenueSummary, group_by_location,
};

pub const VENUE_SEEKING_DEFAULT: &str = "Not looking for talent";
pub const ARTIST_SEEKING_DEFAULT: &str = "Not looking for a new venue";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
}

impl Venue {
    pub fn genre_list(&self) -> Vec<String> {
        split_genres(self.genres.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: String,
    pub genres: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
}

impl Artist {
    pub fn genre_list(&self) -> Vec<String> {
        split_genres(self.genres.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub id: i64,
    pub start_time: chrono::NaiveDateTime,
    pub venue_id: i64,
    pub artist_id: i64,
}

/// Genres are stored as one comma separated string.
fn split_genres(genres: Option<&str>) -> Vec<String> {
    genres
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

// --- Form payloads ---

/// Venue form body, shared by the create and edit pages.
///
/// Text fields default to empty strings when missing. Checkboxes are
/// submitted only when ticked, so `seeking_talent` is `Some(_)` iff checked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: String,
    pub facebook_link: String,
    pub image_link: String,
    pub website: String,
    pub seeking_talent: Option<String>,
    pub seeking_description: String,
}

impl From<&Venue> for VenueForm {
    fn from(v: &Venue) -> Self {
        Self {
            name: v.name.clone(),
            city: v.city.clone(),
            state: v.state.clone(),
            address: v.address.clone(),
            phone: v.phone.clone(),
            genres: v.genres.clone().unwrap_or_default(),
            facebook_link: v.facebook_link.clone().unwrap_or_default(),
            image_link: v.image_link.clone().unwrap_or_default(),
            website: v.website.clone().unwrap_or_default(),
            seeking_talent: v.seeking_talent.then(|| "y".to_string()),
            seeking_description: v.seeking_description.clone().unwrap_or_default(),
        }
    }
}

/// Artist form body, shared by the create and edit pages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: String,
    pub facebook_link: String,
    pub image_link: String,
    pub website: String,
    pub seeking_venue: Option<String>,
    pub seeking_description: String,
}

impl From<&Artist> for ArtistForm {
    fn from(a: &Artist) -> Self {
        Self {
            name: a.name.clone(),
            city: a.city.clone().unwrap_or_default(),
            state: a.state.clone().unwrap_or_default(),
            phone: a.phone.clone(),
            genres: a.genres.clone().unwrap_or_default(),
            facebook_link: a.facebook_link.clone().unwrap_or_default(),
            image_link: a.image_link.clone().unwrap_or_default(),
            website: a.website.clone().unwrap_or_default(),
            seeking_venue: a.seeking_venue.then(|| "y".to_string()),
            seeking_description: a.seeking_description.clone().unwrap_or_default(),
        }
    }
}

/// Show form body. Ids arrive as text and are parsed by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

/// Maps an empty form value to `None` for nullable columns.
pub fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::datetime::{DateFormat, format_datetime};
use crate::{Artist, Venue};

/// One row of the venues page or venue search results.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Venues sharing a (city, state).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Groups venues by (city, state).
///
/// Areas come out in order of first appearance and venues keep their input
/// order inside each area. Input does not need to be sorted: a key seen
/// again later joins its existing area instead of opening a new one.
pub fn group_by_location(venues: Vec<VenueSummary>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for venue in venues {
        let key = (venue.city.clone(), venue.state.clone());
        match index.get(&key) {
            Some(&i) => areas[i].venues.push(venue),
            None => {
                index.insert(key, areas.len());
                areas.push(Area {
                    city: venue.city.clone(),
                    state: venue.state.clone(),
                    venues: vec![venue],
                });
            }
        }
    }
    areas
}

/// A show seen from its venue's page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

impl VenueShow {
    pub fn start_time_display(&self) -> String {
        format_datetime(&self.start_time, DateFormat::Compact)
    }
}

/// A show seen from its artist's page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

impl ArtistShow {
    pub fn start_time_display(&self) -> String {
        format_datetime(&self.start_time, DateFormat::Compact)
    }
}

/// One row of the global shows page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShowListing {
    pub id: i64,
    pub start_time: NaiveDateTime,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

impl ShowListing {
    pub fn start_time_display(&self) -> String {
        format_datetime(&self.start_time, DateFormat::Medium)
    }
}

/// Shows split around an instant: `past` started before it, `upcoming` at or after.
#[derive(Debug, Clone, Serialize)]
pub struct ShowSplit<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> ShowSplit<T> {
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }
}

/// Everything the venue page shows.
#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    pub venue: Venue,
    pub shows: ShowSplit<VenueShow>,
}

/// Everything the artist page shows.
#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub shows: ShowSplit<ArtistShow>,
}

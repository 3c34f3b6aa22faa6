use std::str::FromStr;

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use tracing::info;

mod artists;
mod shows;
mod venues;

pub use artists::{
    artist_detail, create_artist, get_artist, list_artists, search_artists, update_artist,
};
pub use shows::{artist_shows, create_show, list_shows, venue_shows};
pub use venues::{
    create_venue, delete_venue, get_venue, list_venues, search_venues, update_venue, venue_detail,
};

pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(options).await?;
    info!("Connected to database: {database_url}");
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Migrations applied");
    Ok(())
}

/// Case-insensitive substring test used by the search pages.
///
/// Matching runs here rather than in SQL because SQLite's LIKE and NOCASE
/// only fold ASCII. `term` is taken literally, so `%` and `_` match themselves.
fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, Local, NaiveDateTime};
    use gigbook_models::{ArtistForm, VenueForm};
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory database with the schema applied. One connection so every
    /// query sees the same database.
    pub async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .unwrap();
        crate::migrate(&pool).await.unwrap();
        pool
    }

    pub fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    pub fn hours(h: i64) -> Duration {
        Duration::hours(h)
    }

    pub fn venue_form(name: &str, city: &str, state: &str) -> VenueForm {
        VenueForm {
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            genres: "Jazz, Swing".to_string(),
            facebook_link: "https://www.facebook.com/venue".to_string(),
            ..Default::default()
        }
    }

    pub fn artist_form(name: &str) -> ArtistForm {
        ArtistForm {
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "326-123-5000".to_string(),
            genres: "Rock n Roll".to_string(),
            facebook_link: "https://www.facebook.com/artist".to_string(),
            ..Default::default()
        }
    }
}

use anyhow::Result;
use chrono::NaiveDateTime;
use gigbook_models::{
    ARTIST_SEEKING_DEFAULT, Artist, ArtistDetail, ArtistForm, ArtistSummary, non_empty,
};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::name_matches;
use crate::shows::artist_shows;

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, genres, seeking_venue, \
    seeking_description, image_link, website, facebook_link";

const SUMMARY_SELECT: &str = "SELECT a.id, a.name, \
    (SELECT COUNT(*) FROM shows s WHERE s.artist_id = a.id AND s.start_time >= ?) AS num_upcoming_shows \
    FROM artist a";

pub async fn create_artist(pool: &SqlitePool, form: &ArtistForm) -> Result<Artist> {
    let mut tx = pool.begin().await?;
    let sql = format!(
        "INSERT INTO artist (name, city, state, phone, genres, facebook_link, \
            seeking_venue, seeking_description) \
         VALUES (?, ?, ?, ?, ?, ?, 0, ?) \
         RETURNING {ARTIST_COLUMNS}"
    );
    let artist = sqlx::query_as::<_, Artist>(&sql)
        .bind(&form.name)
        .bind(non_empty(&form.city))
        .bind(non_empty(&form.state))
        .bind(&form.phone)
        .bind(non_empty(&form.genres))
        .bind(non_empty(&form.facebook_link))
        .bind(ARTIST_SEEKING_DEFAULT)
        .fetch_one(&mut *tx)
        .await?;
    tx.commit().await?;
    info!("Artist {} created (id={})", artist.name, artist.id);
    Ok(artist)
}

pub async fn get_artist(pool: &SqlitePool, artist_id: i64) -> Result<Option<Artist>> {
    let sql = format!("SELECT {ARTIST_COLUMNS} FROM artist WHERE id = ?");
    let artist = sqlx::query_as::<_, Artist>(&sql)
        .bind(artist_id)
        .fetch_optional(pool)
        .await?;
    Ok(artist)
}

pub async fn list_artists(pool: &SqlitePool, now: NaiveDateTime) -> Result<Vec<ArtistSummary>> {
    let sql = format!("{SUMMARY_SELECT} ORDER BY a.id");
    let artists = sqlx::query_as::<_, ArtistSummary>(&sql)
        .bind(now)
        .fetch_all(pool)
        .await?;
    Ok(artists)
}

/// Artists whose name contains `term`, case-insensitively, ordered by name.
pub async fn search_artists(
    pool: &SqlitePool,
    term: &str,
    now: NaiveDateTime,
) -> Result<Vec<ArtistSummary>> {
    let sql = format!("{SUMMARY_SELECT} ORDER BY a.name COLLATE NOCASE, a.id");
    let artists: Vec<ArtistSummary> = sqlx::query_as::<_, ArtistSummary>(&sql)
        .bind(now)
        .fetch_all(pool)
        .await?
        .into_iter()
        .filter(|row| name_matches(&row.name, term))
        .collect();
    debug!("Artist search {term:?} matched {}", artists.len());
    Ok(artists)
}

pub async fn artist_detail(
    pool: &SqlitePool,
    artist_id: i64,
    now: NaiveDateTime,
) -> Result<Option<ArtistDetail>> {
    let Some(artist) = get_artist(pool, artist_id).await? else {
        return Ok(None);
    };
    let shows = artist_shows(pool, artist_id, now).await?;
    Ok(Some(ArtistDetail { artist, shows }))
}

/// Overwrites every editable field. Returns `false` if the artist does not exist.
pub async fn update_artist(pool: &SqlitePool, artist_id: i64, form: &ArtistForm) -> Result<bool> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        "UPDATE artist SET name = ?, city = ?, state = ?, phone = ?, genres = ?, \
            seeking_venue = ?, seeking_description = ?, image_link = ?, website = ?, \
            facebook_link = ? \
         WHERE id = ?",
    )
    .bind(&form.name)
    .bind(non_empty(&form.city))
    .bind(non_empty(&form.state))
    .bind(&form.phone)
    .bind(non_empty(&form.genres))
    .bind(form.seeking_venue.is_some())
    .bind(non_empty(&form.seeking_description).unwrap_or(ARTIST_SEEKING_DEFAULT))
    .bind(non_empty(&form.image_link))
    .bind(non_empty(&form.website))
    .bind(non_empty(&form.facebook_link))
    .bind(artist_id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    let updated = result.rows_affected() > 0;
    if updated {
        info!("Artist {artist_id} updated");
    }
    Ok(updated)
}

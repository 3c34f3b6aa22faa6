use anyhow::Result;
use chrono::NaiveDateTime;
use gigbook_models::{
    VENUE_SEEKING_DEFAULT, Venue, VenueDetail, VenueForm, VenueSummary, non_empty,
};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::name_matches;
use crate::shows::venue_shows;

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, genres, image_link, \
    seeking_talent, seeking_description, facebook_link, website";

const SUMMARY_SELECT: &str = "SELECT v.id, v.name, v.city, v.state, \
    (SELECT COUNT(*) FROM shows s WHERE s.venue_id = v.id AND s.start_time >= ?) AS num_upcoming_shows \
    FROM venue v";

/// Inserts a venue from the create form.
///
/// New venues are not seeking talent, carry the default seeking description
/// and use the facebook link as their website.
pub async fn create_venue(pool: &SqlitePool, form: &VenueForm) -> Result<Venue> {
    let mut tx = pool.begin().await?;
    let sql = format!(
        "INSERT INTO venue (name, city, state, address, phone, genres, facebook_link, \
            seeking_talent, seeking_description, website) \
         VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?, ?) \
         RETURNING {VENUE_COLUMNS}"
    );
    let venue = sqlx::query_as::<_, Venue>(&sql)
        .bind(&form.name)
        .bind(&form.city)
        .bind(&form.state)
        .bind(&form.address)
        .bind(&form.phone)
        .bind(non_empty(&form.genres))
        .bind(non_empty(&form.facebook_link))
        .bind(VENUE_SEEKING_DEFAULT)
        .bind(non_empty(&form.facebook_link))
        .fetch_one(&mut *tx)
        .await?;
    tx.commit().await?;
    info!("Venue {} created (id={})", venue.name, venue.id);
    Ok(venue)
}

pub async fn get_venue(pool: &SqlitePool, venue_id: i64) -> Result<Option<Venue>> {
    let sql = format!("SELECT {VENUE_COLUMNS} FROM venue WHERE id = ?");
    let venue = sqlx::query_as::<_, Venue>(&sql)
        .bind(venue_id)
        .fetch_optional(pool)
        .await?;
    Ok(venue)
}

/// All venues ordered by city then state, with their upcoming show counts as of `now`.
pub async fn list_venues(pool: &SqlitePool, now: NaiveDateTime) -> Result<Vec<VenueSummary>> {
    let sql = format!("{SUMMARY_SELECT} ORDER BY v.city, v.state, v.id");
    let venues = sqlx::query_as::<_, VenueSummary>(&sql)
        .bind(now)
        .fetch_all(pool)
        .await?;
    Ok(venues)
}

/// Venues whose name contains `term`, case-insensitively, ordered by name.
pub async fn search_venues(
    pool: &SqlitePool,
    term: &str,
    now: NaiveDateTime,
) -> Result<Vec<VenueSummary>> {
    let sql = format!("{SUMMARY_SELECT} ORDER BY v.name COLLATE NOCASE, v.id");
    let venues: Vec<VenueSummary> = sqlx::query_as::<_, VenueSummary>(&sql)
        .bind(now)
        .fetch_all(pool)
        .await?
        .into_iter()
        .filter(|row| name_matches(&row.name, term))
        .collect();
    debug!("Venue search {term:?} matched {}", venues.len());
    Ok(venues)
}

/// Venue with its shows split around `now`.
pub async fn venue_detail(
    pool: &SqlitePool,
    venue_id: i64,
    now: NaiveDateTime,
) -> Result<Option<VenueDetail>> {
    let Some(venue) = get_venue(pool, venue_id).await? else {
        return Ok(None);
    };
    let shows = venue_shows(pool, venue_id, now).await?;
    Ok(Some(VenueDetail { venue, shows }))
}

/// Overwrites every editable field. Returns `false` if the venue does not exist.
pub async fn update_venue(pool: &SqlitePool, venue_id: i64, form: &VenueForm) -> Result<bool> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        "UPDATE venue SET name = ?, city = ?, state = ?, address = ?, phone = ?, genres = ?, \
            image_link = ?, seeking_talent = ?, seeking_description = ?, facebook_link = ?, \
            website = ? \
         WHERE id = ?",
    )
    .bind(&form.name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.address)
    .bind(&form.phone)
    .bind(non_empty(&form.genres))
    .bind(non_empty(&form.image_link))
    .bind(form.seeking_talent.is_some())
    .bind(non_empty(&form.seeking_description).unwrap_or(VENUE_SEEKING_DEFAULT))
    .bind(non_empty(&form.facebook_link))
    .bind(non_empty(&form.website))
    .bind(venue_id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    let updated = result.rows_affected() > 0;
    if updated {
        info!("Venue {venue_id} updated");
    }
    Ok(updated)
}

/// Deletes a venue together with its shows. Returns `false` if the venue does not exist.
pub async fn delete_venue(pool: &SqlitePool, venue_id: i64) -> Result<bool> {
    let mut tx = pool.begin().await?;
    let shows = sqlx::query("DELETE FROM shows WHERE venue_id = ?")
        .bind(venue_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let venues = sqlx::query("DELETE FROM venue WHERE id = ?")
        .bind(venue_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if venues == 0 {
        tx.rollback().await?;
        return Ok(false);
    }
    tx.commit().await?;
    info!("Venue {venue_id} deleted with {shows} show(s)");
    Ok(true)
}

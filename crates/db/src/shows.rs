use anyhow::Result;
use chrono::NaiveDateTime;
use gigbook_models::{ArtistShow, Show, ShowListing, ShowSplit, VenueShow};
use sqlx::SqlitePool;
use tracing::info;

/// Books `artist_id` at `venue_id`. Unknown ids fail on the foreign keys.
pub async fn create_show(
    pool: &SqlitePool,
    venue_id: i64,
    artist_id: i64,
    start_time: NaiveDateTime,
) -> Result<Show> {
    let mut tx = pool.begin().await?;
    let show = sqlx::query_as::<_, Show>(
        "INSERT INTO shows (start_time, venue_id, artist_id) VALUES (?, ?, ?) \
         RETURNING id, start_time, venue_id, artist_id",
    )
    .bind(start_time)
    .bind(venue_id)
    .bind(artist_id)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    info!("Show {} created: artist {artist_id} at venue {venue_id}", show.id);
    Ok(show)
}

const VENUE_SHOWS: &str = "SELECT a.id AS artist_id, a.name AS artist_name, \
    a.image_link AS artist_image_link, s.start_time \
    FROM shows s JOIN artist a ON s.artist_id = a.id \
    WHERE s.venue_id = ?";

const ARTIST_SHOWS: &str = "SELECT v.id AS venue_id, v.name AS venue_name, \
    v.image_link AS venue_image_link, s.start_time \
    FROM shows s JOIN venue v ON s.venue_id = v.id \
    WHERE s.artist_id = ?";

/// Shows at a venue, split into past (before `now`) and upcoming.
pub async fn venue_shows(
    pool: &SqlitePool,
    venue_id: i64,
    now: NaiveDateTime,
) -> Result<ShowSplit<VenueShow>> {
    let upcoming = sqlx::query_as::<_, VenueShow>(&format!(
        "{VENUE_SHOWS} AND s.start_time >= ? ORDER BY s.start_time"
    ))
    .bind(venue_id)
    .bind(now)
    .fetch_all(pool)
    .await?;
    let past = sqlx::query_as::<_, VenueShow>(&format!(
        "{VENUE_SHOWS} AND s.start_time < ? ORDER BY s.start_time"
    ))
    .bind(venue_id)
    .bind(now)
    .fetch_all(pool)
    .await?;
    Ok(ShowSplit { past, upcoming })
}

/// Shows by an artist, split into past (before `now`) and upcoming.
pub async fn artist_shows(
    pool: &SqlitePool,
    artist_id: i64,
    now: NaiveDateTime,
) -> Result<ShowSplit<ArtistShow>> {
    let upcoming = sqlx::query_as::<_, ArtistShow>(&format!(
        "{ARTIST_SHOWS} AND s.start_time >= ? ORDER BY s.start_time"
    ))
    .bind(artist_id)
    .bind(now)
    .fetch_all(pool)
    .await?;
    let past = sqlx::query_as::<_, ArtistShow>(&format!(
        "{ARTIST_SHOWS} AND s.start_time < ? ORDER BY s.start_time"
    ))
    .bind(artist_id)
    .bind(now)
    .fetch_all(pool)
    .await?;
    Ok(ShowSplit { past, upcoming })
}

pub async fn list_shows(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let shows = sqlx::query_as::<_, ShowListing>(
        "SELECT s.id, s.start_time, v.id AS venue_id, v.name AS venue_name, \
            a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link \
         FROM shows s \
         JOIN venue v ON s.venue_id = v.id \
         JOIN artist a ON s.artist_id = a.id \
         ORDER BY s.start_time, s.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(shows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{artist_form, hours, now, setup_test_db, venue_form};
    use crate::{create_artist, create_venue, venue_detail};

    #[tokio::test]
    async fn create_links_venue_and_artist() {
        let db = setup_test_db().await;
        let venue = create_venue(&db, &venue_form("The Dueling Pianos Bar", "New York", "NY"))
            .await
            .unwrap();
        let artist = create_artist(&db, &artist_form("Guns N Petals")).await.unwrap();
        let start = now() + hours(24);

        let show = create_show(&db, venue.id, artist.id, start).await.unwrap();
        assert_eq!(show.venue_id, venue.id);
        assert_eq!(show.artist_id, artist.id);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn create_rejects_unknown_ids() {
        let db = setup_test_db().await;
        let artist = create_artist(&db, &artist_form("Orphan")).await.unwrap();
        assert!(create_show(&db, 404, artist.id, now()).await.is_err());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn venue_detail_counts_past_and_upcoming() {
        let db = setup_test_db().await;
        let venue = create_venue(&db, &venue_form("Park Square Live", "NYC", "NY")).await.unwrap();
        let artist = create_artist(&db, &artist_form("The Wild Sax Band")).await.unwrap();
        let t = now();
        create_show(&db, venue.id, artist.id, t - hours(1)).await.unwrap();
        create_show(&db, venue.id, artist.id, t + hours(1)).await.unwrap();

        let detail = venue_detail(&db, venue.id, t).await.unwrap().unwrap();
        assert_eq!(detail.shows.past_count(), 1);
        assert_eq!(detail.shows.upcoming_count(), 1);
        assert_eq!(detail.shows.past[0].artist_name, "The Wild Sax Band");
    }

    #[tokio::test]
    async fn show_at_now_is_upcoming() {
        let db = setup_test_db().await;
        let venue = create_venue(&db, &venue_form("Edge", "NYC", "NY")).await.unwrap();
        let artist = create_artist(&db, &artist_form("Edgy")).await.unwrap();
        let t = now();
        create_show(&db, venue.id, artist.id, t).await.unwrap();

        let split = venue_shows(&db, venue.id, t).await.unwrap();
        assert_eq!(split.upcoming_count(), 1);
        assert_eq!(split.past_count(), 0);
    }

    #[tokio::test]
    async fn every_show_lands_in_exactly_one_bucket() {
        let db = setup_test_db().await;
        let venue = create_venue(&db, &venue_form("Hall", "LA", "CA")).await.unwrap();
        let artist = create_artist(&db, &artist_form("Band")).await.unwrap();
        let t = now();
        for offset in [-72, -3, -1, 1, 2, 96] {
            create_show(&db, venue.id, artist.id, t + hours(offset)).await.unwrap();
        }

        let by_venue = venue_shows(&db, venue.id, t).await.unwrap();
        let by_artist = artist_shows(&db, artist.id, t).await.unwrap();
        assert_eq!(by_venue.past_count() + by_venue.upcoming_count(), 6);
        assert_eq!(by_venue.past_count(), 3);
        assert_eq!(by_artist.past_count(), by_venue.past_count());
        assert_eq!(by_artist.upcoming_count(), by_venue.upcoming_count());
        assert!(by_venue.past.iter().all(|s| s.start_time < t));
        assert!(by_venue.upcoming.iter().all(|s| s.start_time >= t));
    }

    #[tokio::test]
    async fn listing_resolves_names() {
        let db = setup_test_db().await;
        let venue = create_venue(&db, &venue_form("The Musical Hop", "SF", "CA")).await.unwrap();
        let artist = create_artist(&db, &artist_form("Guns N Petals")).await.unwrap();
        let t = now();
        create_show(&db, venue.id, artist.id, t + hours(2)).await.unwrap();
        create_show(&db, venue.id, artist.id, t - hours(2)).await.unwrap();

        let shows = list_shows(&db).await.unwrap();
        assert_eq!(shows.len(), 2);
        assert!(shows[0].start_time < shows[1].start_time);
        assert_eq!(shows[0].venue_name, "The Musical Hop");
        assert_eq!(shows[0].artist_name, "Guns N Petals");
        assert_eq!(shows[0].artist_id, artist.id);
    }
}

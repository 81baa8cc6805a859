//! Dataset-level summaries for the admin tooling. These never feed the HTTP
//! API; they exist so an operator can sanity-check a dataset file before
//! pointing the server at it.

use serde::Serialize;
use sqlx::FromRow;

use crate::db::DbPool;
use crate::error::Result;
use crate::types::{Measurement, Station};

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub station_count: i64,
    pub measurement_count: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

/// Per-station measurement counts for the activity ranking.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StationActivity {
    pub station: String,
    pub name: String,
    pub measurement_count: i64,
}

/// Row counts and observation date coverage.
pub async fn dataset_summary(pool: &DbPool) -> Result<DatasetSummary> {
    let mut conn = pool.acquire().await?;

    let station_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM station")
        .fetch_one(&mut *conn)
        .await?;

    let measurement_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM measurement")
        .fetch_one(&mut *conn)
        .await?;

    let (first_date, last_date): (Option<String>, Option<String>) =
        sqlx::query_as("SELECT MIN(date), MAX(date) FROM measurement")
            .fetch_one(&mut *conn)
            .await?;

    Ok(DatasetSummary {
        station_count,
        measurement_count,
        first_date,
        last_date,
    })
}

/// Stations ranked by measurement count, most active first. Ties break on the
/// station identifier so output is stable run to run.
pub async fn station_activity(pool: &DbPool) -> Result<Vec<StationActivity>> {
    let mut conn = pool.acquire().await?;

    let ranking: Vec<StationActivity> = sqlx::query_as(
        r#"
        SELECT m.station AS station, s.name AS name, COUNT(*) AS measurement_count
        FROM measurement m
        JOIN station s ON s.station = m.station
        GROUP BY m.station, s.name
        ORDER BY measurement_count DESC, m.station ASC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(ranking)
}

/// Full station inventory, in table order.
pub async fn stations(pool: &DbPool) -> Result<Vec<Station>> {
    let mut conn = pool.acquire().await?;

    let rows: Vec<Station> = sqlx::query_as(
        "SELECT id, station, name, latitude, longitude, elevation FROM station",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows)
}

/// Most recent measurement row, or `None` on an empty dataset. Useful for
/// checking which vintage of the dataset file a deployment is serving.
pub async fn latest_measurement(pool: &DbPool) -> Result<Option<Measurement>> {
    let mut conn = pool.acquire().await?;

    let row: Option<Measurement> = sqlx::query_as(
        r#"
        SELECT id, station, date, prcp, tobs
        FROM measurement
        ORDER BY date DESC, id DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row)
}

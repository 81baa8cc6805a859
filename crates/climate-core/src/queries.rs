//! Read-only queries over the measurement and station tables.
//!
//! Every function checks a connection out of the pool, runs exactly one
//! statement, and releases the connection when it returns. Date filters bind
//! ISO-8601 text, which compares chronologically in SQLite.

use chrono::NaiveDate;

use crate::db::DbPool;
use crate::error::Result;
use crate::types::{
    DailyPrecipitation, DailyTemperature, TemperatureStats, MOST_ACTIVE_STATION, PRIOR_YEAR_CUTOFF,
};

/// Precipitation readings from the dataset's final year, oldest first. Rows
/// dated on or before the cutoff are excluded. Same-date rows from different
/// stations are all returned; collapsing them is the report layer's job.
pub async fn recent_precipitation(pool: &DbPool) -> Result<Vec<DailyPrecipitation>> {
    let mut conn = pool.acquire().await?;

    let rows: Vec<DailyPrecipitation> = sqlx::query_as(
        r#"
        SELECT date, prcp
        FROM measurement
        WHERE date > ?1
        ORDER BY date ASC
        "#,
    )
    .bind(PRIOR_YEAR_CUTOFF)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows)
}

/// Names of every station, in table order.
pub async fn station_names(pool: &DbPool) -> Result<Vec<String>> {
    let mut conn = pool.acquire().await?;

    let names: Vec<String> = sqlx::query_scalar("SELECT name FROM station")
        .fetch_all(&mut *conn)
        .await?;

    Ok(names)
}

/// Temperature observations from the most active station over the dataset's
/// final year, in table order.
pub async fn recent_temperatures(pool: &DbPool) -> Result<Vec<DailyTemperature>> {
    let mut conn = pool.acquire().await?;

    let rows: Vec<DailyTemperature> = sqlx::query_as(
        r#"
        SELECT date, tobs
        FROM measurement
        WHERE station = ?1 AND date > ?2
        "#,
    )
    .bind(MOST_ACTIVE_STATION)
    .bind(PRIOR_YEAR_CUTOFF)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows)
}

/// Min/max/average observed temperature across all stations from `start`
/// (inclusive) onward. An aggregate over zero rows yields `None` fields.
pub async fn temperature_stats(pool: &DbPool, start: NaiveDate) -> Result<TemperatureStats> {
    let mut conn = pool.acquire().await?;

    let stats: TemperatureStats = sqlx::query_as(
        r#"
        SELECT MIN(tobs) AS min_temp, MAX(tobs) AS max_temp, AVG(tobs) AS avg_temp
        FROM measurement
        WHERE date >= ?1
        "#,
    )
    .bind(start)
    .fetch_one(&mut *conn)
    .await?;

    Ok(stats)
}

/// Min/max/average observed temperature across all stations between `start`
/// and `end`, both inclusive. A reversed window matches no rows and yields
/// `None` fields rather than an error.
pub async fn temperature_stats_range(
    pool: &DbPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<TemperatureStats> {
    let mut conn = pool.acquire().await?;

    let stats: TemperatureStats = sqlx::query_as(
        r#"
        SELECT MIN(tobs) AS min_temp, MAX(tobs) AS max_temp, AVG(tobs) AS avg_temp
        FROM measurement
        WHERE date >= ?1 AND date <= ?2
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_one(&mut *conn)
    .await?;

    Ok(stats)
}

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::error::{ClimateError, Result};

pub type DbPool = Pool<Sqlite>;

/// Tables the rest of the crate assumes exist. Checked once at startup so a
/// mispointed DATABASE_URL fails loudly instead of answering empty reports.
const REQUIRED_TABLES: [&str; 2] = ["measurement", "station"];

/// Open a read-only pool onto the climate dataset. The dataset file is fixed
/// reference data, so nothing in this crate ever needs write access.
pub async fn connect(database_url: &str) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Confirm the measurement and station tables are present.
pub async fn verify_schema(pool: &DbPool) -> Result<()> {
    let mut conn = pool.acquire().await?;

    for table in REQUIRED_TABLES {
        let found: Option<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1")
                .bind(table)
                .fetch_optional(&mut *conn)
                .await?;

        if found.is_none() {
            return Err(ClimateError::MissingTable(table.to_string()));
        }
    }

    Ok(())
}

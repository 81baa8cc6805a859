//! Route table and handlers for the climate analysis API.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use climate_core::types::TemperatureStats;
use climate_core::{dates, queries, reports};

use crate::error::ApiError;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/temp/{start}", get(temp_from_start))
        .route("/api/v1.0/temp/{start}/{end}", get(temp_for_range))
        .with_state(state)
}

async fn welcome() -> &'static str {
    "Welcome to the Honolulu, Hawaii climate API!\n\
     Available routes:\n\
     /api/v1.0/precipitation\n\
     /api/v1.0/stations\n\
     /api/v1.0/tobs\n\
     /api/v1.0/temp/{start}\n\
     /api/v1.0/temp/{start}/{end}\n\
     Dates take the form YYYY-MM-DD, e.g. /api/v1.0/temp/2017-01-01\n"
}

/// Final-year precipitation as a date -> prcp object. Days where several
/// stations reported collapse to the last row the store returns for that
/// date.
async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, ApiError> {
    let rows = queries::recent_precipitation(&state.pool).await?;
    Ok(Json(reports::precipitation_by_date(rows)))
}

async fn stations(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let names = queries::station_names(&state.pool).await?;
    Ok(Json(names))
}

/// Final-year temperature observations from the most active station.
async fn tobs(State(state): State<AppState>) -> Result<Json<BTreeMap<String, f64>>, ApiError> {
    let rows = queries::recent_temperatures(&state.pool).await?;
    Ok(Json(reports::temperature_by_date(rows)))
}

async fn temp_from_start(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureStats>>, ApiError> {
    let start = dates::parse_iso_date(&start)?;
    let stats = queries::temperature_stats(&state.pool, start).await?;
    Ok(Json(vec![stats]))
}

async fn temp_for_range(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStats>>, ApiError> {
    let start = dates::parse_iso_date(&start)?;
    let end = dates::parse_iso_date(&end)?;
    let stats = queries::temperature_stats_range(&state.pool, start, end).await?;
    Ok(Json(vec![stats]))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use axum::body::{Body, Bytes};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    use super::*;

    /// In-memory stand-in for the production dataset file. One row sits on
    /// each side of every boundary the handlers filter on.
    async fn seeded_state() -> Result<AppState> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        sqlx::query(
            "CREATE TABLE station (
                id INTEGER PRIMARY KEY,
                station TEXT NOT NULL,
                name TEXT NOT NULL,
                latitude FLOAT,
                longitude FLOAT,
                elevation FLOAT
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE measurement (
                id INTEGER PRIMARY KEY,
                station TEXT NOT NULL,
                date TEXT NOT NULL,
                prcp FLOAT,
                tobs FLOAT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        for (station, name) in [
            ("USC00519397", "WAIKIKI 717.2, HI US"),
            ("USC00516128", "MANOA LYON ARBO 785.2, HI US"),
            ("USC00519281", "WAIHEE 837.5, HI US"),
        ] {
            sqlx::query("INSERT INTO station (station, name) VALUES (?1, ?2)")
                .bind(station)
                .bind(name)
                .execute(&pool)
                .await?;
        }

        let rows: [(&str, &str, Option<f64>, f64); 8] = [
            ("USC00519397", "2016-08-20", Some(0.31), 79.0),
            ("USC00519281", "2016-08-22", Some(2.15), 80.0),
            ("USC00519281", "2016-08-23", Some(1.79), 77.0),
            ("USC00519281", "2016-08-24", None, 78.0),
            ("USC00519397", "2016-09-01", Some(0.05), 81.0),
            ("USC00519281", "2017-01-01", Some(0.29), 68.0),
            ("USC00516128", "2017-03-09", Some(2.4), 70.0),
            ("USC00519281", "2017-03-10", Some(0.0), 72.0),
        ];
        for (station, date, prcp, tobs) in rows {
            sqlx::query(
                "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(station)
            .bind(date)
            .bind(prcp)
            .bind(tobs)
            .execute(&pool)
            .await?;
        }

        Ok(AppState { pool })
    }

    async fn send(router: Router, uri: &str) -> Result<Response> {
        let request = Request::builder().uri(uri).body(Body::empty())?;
        Ok(router.oneshot(request).await?)
    }

    async fn body_bytes(response: Response) -> Result<Bytes> {
        Ok(axum::body::to_bytes(response.into_body(), 1024 * 1024).await?)
    }

    #[tokio::test]
    async fn welcome_lists_every_route_as_plain_text() -> Result<()> {
        let router = app(seeded_state().await?);

        let response = send(router, "/").await?;
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .expect("content-type is set")
            .to_str()?;
        assert!(content_type.starts_with("text/plain"));

        let body = String::from_utf8(body_bytes(response).await?.to_vec())?;
        for route in [
            "/api/v1.0/precipitation",
            "/api/v1.0/stations",
            "/api/v1.0/tobs",
            "/api/v1.0/temp/{start}",
            "/api/v1.0/temp/{start}/{end}",
        ] {
            assert!(body.contains(route), "welcome text is missing {route}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn precipitation_maps_final_year_dates_in_order() -> Result<()> {
        let router = app(seeded_state().await?);

        let response = send(router, "/api/v1.0/precipitation").await?;
        assert_eq!(response.status(), StatusCode::OK);

        // 2016-08-20 and 2016-08-22 sit on or before the cutoff; the
        // missing reading on 2016-08-24 stays null.
        assert_eq!(
            body_bytes(response).await?,
            r#"{"2016-08-23":1.79,"2016-08-24":null,"2016-09-01":0.05,"2017-01-01":0.29,"2017-03-09":2.4,"2017-03-10":0.0}"#.as_bytes()
        );
        Ok(())
    }

    #[tokio::test]
    async fn stations_returns_names_in_table_order() -> Result<()> {
        let router = app(seeded_state().await?);

        let response = send(router, "/api/v1.0/stations").await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_bytes(response).await?,
            r#"["WAIKIKI 717.2, HI US","MANOA LYON ARBO 785.2, HI US","WAIHEE 837.5, HI US"]"#
                .as_bytes()
        );
        Ok(())
    }

    #[tokio::test]
    async fn tobs_reports_only_the_most_active_station() -> Result<()> {
        let router = app(seeded_state().await?);

        let response = send(router, "/api/v1.0/tobs").await?;
        assert_eq!(response.status(), StatusCode::OK);

        // Readings from the other stations (79.0, 81.0, 70.0) never appear,
        // and neither does the cutoff-day reading (80.0).
        assert_eq!(
            body_bytes(response).await?,
            r#"{"2016-08-23":77.0,"2016-08-24":78.0,"2017-01-01":68.0,"2017-03-10":72.0}"#
                .as_bytes()
        );
        Ok(())
    }

    #[tokio::test]
    async fn temp_from_start_aggregates_across_stations() -> Result<()> {
        let router = app(seeded_state().await?);

        let response = send(router, "/api/v1.0/temp/2017-01-01").await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_bytes(response).await?,
            r#"[{"min_temp":68.0,"max_temp":72.0,"avg_temp":70.0}]"#.as_bytes()
        );
        Ok(())
    }

    #[tokio::test]
    async fn temp_range_handles_a_single_day() -> Result<()> {
        let router = app(seeded_state().await?);

        let response = send(router, "/api/v1.0/temp/2017-03-09/2017-03-09").await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_bytes(response).await?,
            r#"[{"min_temp":70.0,"max_temp":70.0,"avg_temp":70.0}]"#.as_bytes()
        );
        Ok(())
    }

    #[tokio::test]
    async fn temp_range_with_no_rows_reports_nulls() -> Result<()> {
        let router = app(seeded_state().await?);

        let response = send(router, "/api/v1.0/temp/2015-06-01/2015-06-02").await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_bytes(response).await?,
            r#"[{"min_temp":null,"max_temp":null,"avg_temp":null}]"#.as_bytes()
        );
        Ok(())
    }

    #[tokio::test]
    async fn malformed_dates_are_rejected_with_bad_request() -> Result<()> {
        let state = seeded_state().await?;

        for uri in [
            "/api/v1.0/temp/not-a-date",
            "/api/v1.0/temp/2017%2F01%2F01",
            "/api/v1.0/temp/2017-01-01/garbage",
            "/api/v1.0/temp/2017-13-01",
        ] {
            let response = send(app(state.clone()), uri).await?;
            assert_eq!(
                response.status(),
                StatusCode::BAD_REQUEST,
                "expected 400 for {uri}"
            );

            let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await?)?;
            assert_eq!(body["code"], 400);
            assert!(body["error"]
                .as_str()
                .expect("error field is a string")
                .contains("invalid date"));
        }
        Ok(())
    }

    #[tokio::test]
    async fn store_failures_surface_as_server_errors() -> Result<()> {
        let state = seeded_state().await?;
        // A closed pool fails every acquire, standing in for a lost or
        // unreadable dataset file.
        state.pool.close().await;

        let response = send(app(state), "/api/v1.0/stations").await?;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await?)?;
        assert_eq!(body["code"], 500);
        assert!(body["error"]
            .as_str()
            .expect("error field is a string")
            .contains("database query failed"));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_fall_through_to_not_found() -> Result<()> {
        let router = app(seeded_state().await?);

        let response = send(router, "/api/v2.0/precipitation").await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn repeated_requests_serialize_identically() -> Result<()> {
        let state = seeded_state().await?;

        let first = body_bytes(send(app(state.clone()), "/api/v1.0/precipitation").await?).await?;
        let second = body_bytes(send(app(state.clone()), "/api/v1.0/precipitation").await?).await?;
        assert_eq!(first, second);

        let first = body_bytes(send(app(state.clone()), "/api/v1.0/tobs").await?).await?;
        let second = body_bytes(send(app(state), "/api/v1.0/tobs").await?).await?;
        assert_eq!(first, second);
        Ok(())
    }
}

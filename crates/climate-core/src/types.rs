use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Station with the most measurement rows in the dataset (WAIHEE 837.5, HI US).
/// The `/api/v1.0/tobs` endpoint reports this station only.
pub const MOST_ACTIVE_STATION: &str = "USC00519281";

/// The dataset's final observation lands on 2017-08-23, so rows dated strictly
/// after this boundary cover its last twelve months.
pub const PRIOR_YEAR_CUTOFF: &str = "2016-08-22";

/// One row of the `measurement` table. Dates are stored as ISO-8601 text, so
/// lexicographic comparison matches chronological comparison.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Measurement {
    pub id: i64,
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

/// One row of the `station` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    pub station: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Date/precipitation projection used by the precipitation report.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DailyPrecipitation {
    pub date: String,
    pub prcp: Option<f64>,
}

/// Date/temperature projection used by the observed-temperature report.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DailyTemperature {
    pub date: String,
    pub tobs: f64,
}

/// Aggregate temperature summary for a date window. The aggregates are `None`
/// when the window holds no rows, which serializes as JSON `null`. Endpoints
/// emit this as a single-element array, and field declaration order here fixes
/// the JSON key order.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TemperatureStats {
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub avg_temp: Option<f64>,
}

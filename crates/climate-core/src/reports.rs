//! Shapes query rows into the structures the API serializes.

use std::collections::BTreeMap;

use crate::types::{DailyPrecipitation, DailyTemperature};

/// Collapse (date, value) rows into a date-keyed map. When several rows share
/// a date the last one in iteration order is kept. Keys iterate in ascending
/// date order, so serialization is deterministic for a given row sequence.
pub fn collapse_by_date<V>(rows: impl IntoIterator<Item = (String, V)>) -> BTreeMap<String, V> {
    let mut by_date = BTreeMap::new();
    for (date, value) in rows {
        by_date.insert(date, value);
    }
    by_date
}

/// Precipitation report body: date -> prcp, with missing readings kept as
/// `None` so they serialize as JSON `null`.
pub fn precipitation_by_date(rows: Vec<DailyPrecipitation>) -> BTreeMap<String, Option<f64>> {
    collapse_by_date(rows.into_iter().map(|row| (row.date, row.prcp)))
}

/// Observed-temperature report body: date -> tobs.
pub fn temperature_by_date(rows: Vec<DailyTemperature>) -> BTreeMap<String, f64> {
    collapse_by_date(rows.into_iter().map(|row| (row.date, row.tobs)))
}

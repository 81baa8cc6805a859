use chrono::NaiveDate;

use crate::error::{ClimateError, Result};

/// Request-parameter date format. Matches the textual form used by the
/// `measurement.date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` request parameter. Anything else, including a partial
/// parse with trailing input, is rejected.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| ClimateError::InvalidDate {
        input: input.to_string(),
    })
}

//! Date format conversions between the caller, the service, and the
//! day-bucket filter key.
//!
//! Callers supply dates in ISO year-month-day form. The service's query
//! string wants month-day-year, while the day buckets in its responses are
//! keyed day-month-year. Both conversions happen exactly once per fetch.

use crate::error::AgentError;
use chrono::NaiveDate;

/// Input format accepted from callers (`2024-03-01`).
const INPUT_FORMAT: &str = "%Y-%m-%d";
/// Query-string format required by the service (`03-01-2024`).
const QUERY_FORMAT: &str = "%m-%d-%Y";
/// Filter-key format used by day buckets in responses (`01-03-2024`).
const FILTER_FORMAT: &str = "%d-%m-%Y";

/// Convert a caller-supplied `YYYY-MM-DD` date to the service's
/// `MM-DD-YYYY` query format.
///
/// # Errors
///
/// Returns [`AgentError::Date`] if the input is not a valid
/// year-month-day date.
pub fn query_date(date: &str) -> Result<String, AgentError> {
    Ok(parse(date)?.format(QUERY_FORMAT).to_string())
}

/// Convert a caller-supplied `YYYY-MM-DD` date to the `DD-MM-YYYY` key
/// used to select the matching day bucket out of a day-list payload.
///
/// # Errors
///
/// Returns [`AgentError::Date`] if the input is not a valid
/// year-month-day date.
pub fn filter_key(date: &str) -> Result<String, AgentError> {
    Ok(parse(date)?.format(FILTER_FORMAT).to_string())
}

/// Today's date in the caller input format, for default-date UIs.
pub fn today() -> String {
    chrono::Local::now().date_naive().format(INPUT_FORMAT).to_string()
}

fn parse(date: &str) -> Result<NaiveDate, AgentError> {
    NaiveDate::parse_from_str(date, INPUT_FORMAT)
        .map_err(|_| AgentError::Date(date.to_string()))
}

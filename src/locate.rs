//! Lookups over a normalized entry sequence.
//!
//! Three independent modes: exact first-match by CRM lead id, and
//! last-match by status or sub-status. The last-match policy is deliberate:
//! the service returns entries in chronological order, so the latest slot
//! carrying a status is the one the operator means.

use crate::error::AgentError;
use crate::types::ScheduleEntry;
use url::Url;

/// Extract a lead identifier from operator input.
///
/// The CRM UI produces URLs whose path contains a `details` segment
/// followed by the lead id, e.g. `https://crm.example/lead/details/12345/`.
/// Pasting such a URL yields `12345`; anything without a `details` path
/// segment (including a bare identifier) passes through unchanged.
pub fn extract_lead_id(input: &str) -> String {
    let Ok(parsed) = Url::parse(input) else {
        return input.to_string();
    };
    let Some(mut segments) = parsed.path_segments() else {
        return input.to_string();
    };

    while let Some(segment) = segments.next() {
        if segment == "details" {
            if let Some(id) = segments.next().filter(|s| !s.is_empty()) {
                return id.to_string();
            }
        }
    }
    input.to_string()
}

/// First entry whose `lead_id` exactly equals `key`.
///
/// # Errors
///
/// Returns [`AgentError::NotFound`] when no entry matches.
pub fn find_by_lead_id<'a>(
    entries: &'a [ScheduleEntry],
    key: &str,
) -> Result<&'a ScheduleEntry, AgentError> {
    entries
        .iter()
        .find(|entry| entry.lead_id == key)
        .ok_or_else(|| AgentError::NotFound(format!("no entry with lead id {key}")))
}

/// Last entry (in fetch order) whose `status` equals `value`.
///
/// # Errors
///
/// Returns [`AgentError::NotFound`] when no entry matches.
pub fn last_by_status<'a>(
    entries: &'a [ScheduleEntry],
    value: &str,
) -> Result<&'a ScheduleEntry, AgentError> {
    entries
        .iter()
        .rev()
        .find(|entry| entry.status == value)
        .ok_or_else(|| AgentError::NotFound(format!("no entry with status {value:?}")))
}

/// Last entry (in fetch order) whose `sub_status` equals `value`.
///
/// # Errors
///
/// Returns [`AgentError::NotFound`] when no entry matches.
pub fn last_by_sub_status<'a>(
    entries: &'a [ScheduleEntry],
    value: &str,
) -> Result<&'a ScheduleEntry, AgentError> {
    entries
        .iter()
        .rev()
        .find(|entry| entry.sub_status == value)
        .ok_or_else(|| AgentError::NotFound(format!("no entry with sub-status {value:?}")))
}

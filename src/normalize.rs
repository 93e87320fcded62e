//! Payload normalization: two response shapes, one canonical sequence.
//!
//! This is the only place that branches on the [`RawPayload`] variant.
//! Day-list payloads are reduced to the single day matching the filter key;
//! team pages are flattened across items. Ordering always matches the
//! service's ordering, and nothing is deduplicated.

use crate::types::{RawPayload, ScheduleEntry};

/// Normalize a raw payload into the entry sequence for the target date.
///
/// - Day list: entries of the day whose `date` equals `filter_key`; a
///   missing day yields an empty vec, not an error.
/// - Team page: every item's entries concatenated in item order, the date
///   ignored entirely (the service filters team responses server-side).
pub fn normalize(payload: RawPayload, filter_key: &str) -> Vec<ScheduleEntry> {
    let entries = match payload {
        RawPayload::Days(days) => days
            .into_iter()
            .find(|day| day.date == filter_key)
            .map(|day| day.schedulers)
            .unwrap_or_default(),
        RawPayload::Team(page) => page
            .items
            .into_iter()
            .flat_map(|item| item.schedulers)
            .collect(),
    };

    tracing::debug!(count = entries.len(), filter_key, "payload normalized");
    entries
}

//! Conjunctive substring filter over a normalized entry sequence.
//!
//! A separate read path from the locator: the filter narrows the browsed
//! view, while lookups pick a single entry. Matching is case-sensitive
//! substring containment, and criteria left empty always match.

use crate::types::ScheduleEntry;

/// Substring criteria; all supplied criteria must hold (logical AND).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Substring of the CRM lead identifier.
    pub lead_id: Option<String>,
    /// Substring of the slot status label.
    pub status: Option<String>,
    /// Substring of the lead's sub-status.
    pub sub_status: Option<String>,
}

impl FilterCriteria {
    /// True when no criterion is supplied; such a filter keeps everything.
    pub fn is_empty(&self) -> bool {
        is_blank(self.lead_id.as_deref())
            && is_blank(self.status.as_deref())
            && is_blank(self.sub_status.as_deref())
    }

    /// Whether every supplied criterion is a substring of its field.
    pub fn matches(&self, entry: &ScheduleEntry) -> bool {
        satisfied(self.lead_id.as_deref(), &entry.lead_id)
            && satisfied(self.status.as_deref(), &entry.status)
            && satisfied(self.sub_status.as_deref(), &entry.sub_status)
    }
}

/// Entries satisfying every supplied criterion, in original order.
pub fn filter_entries<'a>(
    entries: &'a [ScheduleEntry],
    criteria: &FilterCriteria,
) -> Vec<&'a ScheduleEntry> {
    entries
        .iter()
        .filter(|entry| criteria.matches(entry))
        .collect()
}

fn is_blank(needle: Option<&str>) -> bool {
    matches!(needle, None | Some(""))
}

fn satisfied(needle: Option<&str>, field: &str) -> bool {
    match needle {
        None | Some("") => true,
        Some(needle) => field.contains(needle),
    }
}

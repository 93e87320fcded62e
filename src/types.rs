//! Core types for schedule payloads, populations, scopes, and status codes.
//!
//! Wire field names (`statusLead`, `leadId`, `dayOfWeek`, `schedulers`)
//! follow the scheduling service's JSON and are mapped to Rust naming via
//! serde renames.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Slot status label for a free slot, as returned by the service.
pub const STATUS_FREE: &str = "Free";
/// Slot status label for a slot with an assigned lesson.
pub const STATUS_ASSIGNED: &str = "Assigned lesson";
/// Slot status label for a confirmed slot.
pub const STATUS_CONFIRMED: &str = "Confirmed";

/// One bookable time slot with a status and an associated CRM lead.
///
/// Entries are immutable after creation: a changed entry only exists after
/// the next full refetch produces a new entry with the same `id` and
/// updated fields. Ids are unique within one fetch result but carry no
/// cross-fetch identity guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Slot identifier, unique within a single fetch result.
    pub id: i64,
    /// Display time string, passed through untouched.
    pub time: String,
    /// Free-form slot status label (see the `STATUS_*` constants).
    pub status: String,
    /// The lead's own status, distinct from the slot status.
    #[serde(rename = "statusLead", default)]
    pub sub_status: String,
    /// External CRM lead identifier; empty when no lead is attached.
    #[serde(rename = "leadId", default)]
    pub lead_id: String,
}

/// An anomalous field combination on a [`ScheduleEntry`].
///
/// These are the combinations the operator UI highlights as suspicious;
/// the detection itself lives here so it can be tested without a UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    /// Status says confirmed but the lead carries no sub-status.
    ConfirmedWithoutSubStatus,
    /// Status says free but a sub-status is still attached.
    FreeWithSubStatus,
    /// A lesson is assigned but no CRM lead id is present.
    AssignedWithoutLead,
}

impl ScheduleEntry {
    /// Report anomalous field combinations on this entry.
    ///
    /// Returns an empty vec for consistent entries. The checks are
    /// independent; an entry can in principle trip more than one.
    pub fn inconsistencies(&self) -> Vec<Inconsistency> {
        let mut found = Vec::new();
        if self.status == STATUS_CONFIRMED && self.sub_status.is_empty() {
            found.push(Inconsistency::ConfirmedWithoutSubStatus);
        }
        if self.status == STATUS_FREE && !self.sub_status.is_empty() {
            found.push(Inconsistency::FreeWithSubStatus);
        }
        if self.status == STATUS_ASSIGNED && self.lead_id.is_empty() {
            found.push(Inconsistency::AssignedWithoutLead);
        }
        found
    }
}

/// One day bucket of a day-list response.
///
/// Also used for the items of a team-scope page, which carry the same
/// shape; the non-essential fields default when the service omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDay {
    #[serde(default)]
    pub id: i64,
    /// Day-first formatted date (`DD-MM-YYYY`), the filter key.
    #[serde(default)]
    pub date: String,
    #[serde(rename = "dayOfWeek", default)]
    pub day_of_week: String,
    /// Slots in service order; never reordered by this crate.
    pub schedulers: Vec<ScheduleEntry>,
}

/// Paginated wrapper of a team-scope response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPage {
    #[serde(rename = "pageNumber", default)]
    pub page_number: u32,
    #[serde(rename = "pageSize", default)]
    pub page_size: u32,
    #[serde(rename = "totalCount", default)]
    pub total_count: u32,
    /// Per-expert items, each carrying its own slot sequence.
    pub items: Vec<ScheduleDay>,
}

/// Raw service payload, one of the two known response shapes.
///
/// The expert/self-scope endpoint returns a JSON array of days; the
/// team-scope endpoint returns a paginated object. The normalizer is the
/// only component that branches on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawPayload {
    /// Expert/self-scope response: an ordered list of day buckets.
    Days(Vec<ScheduleDay>),
    /// Team-scope response: a paginated wrapper.
    Team(TeamPage),
}

/// Which underlying service tenant to query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Population {
    /// The default adult program.
    #[default]
    General,
    /// The kids program, served by a separate host.
    Kids,
}

impl Population {
    /// Returns the human-readable name of this population.
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Kids => "kids",
        }
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a query covers one expert or the whole team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// The operator's own schedule, queried under their identity.
    #[default]
    Expert,
    /// The whole team, queried under the fixed privileged identity.
    Team,
}

impl Scope {
    /// Returns the human-readable name of this scope.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Expert => "expert",
            Self::Team => "team",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target status codes accepted by the status-update endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotStatus {
    /// Release the slot back to the free pool.
    Release,
    /// Mark the slot as busy.
    Busy,
    /// Reject the lead.
    Reject,
    /// Confirm the lesson.
    Confirm,
}

impl SlotStatus {
    /// The integer code sent in the mutation body.
    pub fn code(&self) -> u8 {
        match self {
            Self::Release => 0,
            Self::Busy => 1,
            Self::Reject => 3,
            Self::Confirm => 4,
        }
    }

    /// Returns the human-readable action name, used in confirmation prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Busy => "mark busy",
            Self::Reject => "reject",
            Self::Confirm => "confirm",
        }
    }

    /// Returns all status codes the service accepts.
    pub fn all() -> &'static [SlotStatus] {
        &[Self::Release, Self::Busy, Self::Reject, Self::Confirm]
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

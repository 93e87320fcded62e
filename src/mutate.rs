//! Confirm-then-mutate protocol types.
//!
//! A status change is gated behind an explicit [`Decision`] obtained from a
//! [`ConfirmPrompt`] before any network traffic happens. The protocol is
//! split from the UI so the gating is testable: the agent asks the prompt,
//! and only an approved action reaches the service.

use crate::types::{Population, SlotStatus};
use std::fmt;

/// A status change the operator is about to apply to one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationAction {
    /// Slot identifier from the current dataset.
    pub id: i64,
    /// Target status code to submit.
    pub status: SlotStatus,
    /// Which tenant's status-update endpoint receives the change.
    pub population: Population,
}

impl MutationAction {
    pub fn new(id: i64, status: SlotStatus, population: Population) -> Self {
        Self {
            id,
            status,
            population,
        }
    }

    /// Human-readable description of the action, used in the confirmation
    /// prompt ("release slot 17", "confirm slot 3").
    pub fn describe(&self) -> String {
        format!("{} slot {}", self.status.label(), self.id)
    }
}

impl fmt::Display for MutationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// The operator's answer to a confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Declined,
}

/// Source of explicit operator confirmations.
///
/// Implementations range from a real prompt in a UI shell to a canned
/// answer in tests. The agent calls [`ConfirmPrompt::request`] exactly once
/// per attempted mutation, before any network call.
pub trait ConfirmPrompt {
    /// Ask the operator to approve or decline the named action.
    fn request(&self, action: &MutationAction) -> Decision;
}

/// A prompt that approves everything. Useful for scripted runs where the
/// operator has already made the decision upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysApprove;

impl ConfirmPrompt for AlwaysApprove {
    fn request(&self, _action: &MutationAction) -> Decision {
        Decision::Approved
    }
}

/// Result of a mutation attempt, as seen by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The operator declined; no network call was made.
    Declined,
    /// The change was submitted; the service's textual acknowledgment is
    /// carried verbatim. The text is the only success signal the service
    /// provides, so it is never parsed.
    Submitted(String),
}

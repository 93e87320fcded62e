//! # sched-agent
//!
//! Client-side agent for the expert scheduling service. Fetches one day's
//! schedule (or, in manager mode, a whole team's), normalizes the two
//! response shapes the service produces into one canonical entry sequence,
//! and lets an operator locate, filter, and mutate individual lead slots.
//!
//! ## Design
//!
//! - One [`Agent`] controller owns the whole application state; the dataset
//!   is replaced atomically on every successful fetch, never patched
//! - Two response shapes (expert day list, paginated team page) normalize
//!   into one ordered entry sequence; only the normalizer branches on shape
//! - Lookups (exact by lead id, last-match by status/sub-status) and the
//!   conjunctive substring filter are separate read paths over the dataset
//! - Status changes are gated behind an explicit confirmation and always
//!   followed by exactly one refetch — the server is the source of truth
//! - A countdown poller refetches on a fixed cadence; overlapping fetches
//!   are not serialized, the last applied response wins
//!
//! ## Security
//!
//! - No credentials are handled; the service is addressed by username only
//! - No network listeners — this is a client library, not a server
//! - Operator identities appear in logs at trace level only

pub mod agent;
pub mod config;
pub mod dates;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod http;
pub mod locate;
pub mod mutate;
pub mod normalize;
pub mod poll;
pub mod service;
pub mod types;

pub use agent::{Agent, AgentState};
pub use config::AgentConfig;
pub use error::{AgentError, Result};
pub use fetch::FetchRequest;
pub use filter::{filter_entries, FilterCriteria};
pub use mutate::{ConfirmPrompt, Decision, MutationAction, MutationOutcome};
pub use poll::{Poller, PollerState};
pub use service::{HttpScheduleService, ScheduleService};
pub use types::{
    Inconsistency, Population, RawPayload, ScheduleDay, ScheduleEntry, Scope, SlotStatus, TeamPage,
    STATUS_ASSIGNED, STATUS_CONFIRMED, STATUS_FREE,
};

/// Fetch and normalize one schedule without constructing an [`Agent`].
///
/// Validates the config, issues a single request against the endpoint
/// selected by `population` and `scope`, and returns the normalized entry
/// sequence for `date` (supplied in `YYYY-MM-DD` form).
///
/// # Errors
///
/// Returns [`AgentError::Config`] for invalid configuration,
/// [`AgentError::Date`] for a malformed date, and [`AgentError::Fetch`] for
/// transport failures or non-2xx responses.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> sched_agent::Result<()> {
/// let config = sched_agent::AgentConfig::default();
/// let entries = sched_agent::fetch_schedule(
///     "ivanov",
///     "2024-03-01",
///     sched_agent::Population::General,
///     sched_agent::Scope::Expert,
///     &config,
/// )
/// .await?;
/// for entry in &entries {
///     println!("{} {} {}", entry.time, entry.status, entry.lead_id);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_schedule(
    identity: &str,
    date: &str,
    population: Population,
    scope: Scope,
    config: &AgentConfig,
) -> Result<Vec<ScheduleEntry>> {
    config.validate()?;
    let request = FetchRequest::new(identity, date, population, scope, config)?;
    let service = HttpScheduleService::new(config.clone())?;
    let payload = service.fetch(&request).await?;
    Ok(normalize::normalize(payload, &request.filter_key))
}

/// Fetch an expert's own general-population schedule with default config.
///
/// Convenience wrapper around [`fetch_schedule`].
///
/// # Errors
///
/// Same as [`fetch_schedule`].
pub async fn fetch_schedule_default(identity: &str, date: &str) -> Result<Vec<ScheduleEntry>> {
    fetch_schedule(
        identity,
        date,
        Population::General,
        Scope::Expert,
        &AgentConfig::default(),
    )
    .await
}

//! Agent controller: owns the application state and drives the
//! fetch → normalize → store cycle, lookups, mutations, and polling.
//!
//! The dataset has exactly one writer path (a completed fetch) and is
//! replaced wholesale; readers work against whatever snapshot is currently
//! held. Lookup results are cloned out of the snapshot, so a later replace
//! does not invalidate them.

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::fetch::FetchRequest;
use crate::filter::{filter_entries, FilterCriteria};
use crate::locate;
use crate::mutate::{ConfirmPrompt, Decision, MutationAction, MutationOutcome};
use crate::normalize::normalize;
use crate::poll::{Poller, PollerState};
use crate::service::ScheduleService;
use crate::types::{Population, Scope, ScheduleEntry, SlotStatus};
use std::time::Duration;

/// Process-wide state the UI renders from.
///
/// Replaced-not-patched: a successful fetch swaps `entries` atomically and
/// clears the error; a failed fetch clears `entries` and retains the
/// message for display.
#[derive(Debug, Clone, Default)]
pub struct AgentState {
    /// Normalized entries of the current dataset, in fetch order.
    pub entries: Vec<ScheduleEntry>,
    /// Day-first key the current dataset was filtered with.
    pub filter_key: String,
    /// Display message of the last failed fetch, if the dataset is gone.
    pub last_error: Option<String>,
    /// Result of the most recent lookup; a later lookup overwrites it.
    pub found: Option<ScheduleEntry>,
}

/// The scheduling agent: one controller owning [`AgentState`], generic over
/// the [`ScheduleService`] backend.
#[derive(Debug)]
pub struct Agent<S: ScheduleService> {
    config: AgentConfig,
    service: S,
    poller: Poller,
    state: AgentState,
    /// Parameters of the most recent fetch, reused by poll-driven and
    /// post-mutation refetches.
    last_request: Option<FetchRequest>,
}

impl<S: ScheduleService> Agent<S> {
    /// Create an agent over a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Config`] if the configuration is invalid.
    pub fn new(config: AgentConfig, service: S) -> Result<Self, AgentError> {
        config.validate()?;
        let poller = Poller::new(config.poll_interval_ticks);
        Ok(Self {
            config,
            service,
            poller,
            state: AgentState::default(),
            last_request: None,
        })
    }

    /// Current application state.
    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// Entries of the current dataset, in fetch order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.state.entries
    }

    /// Result of the most recent lookup.
    pub fn found(&self) -> Option<&ScheduleEntry> {
        self.state.found.as_ref()
    }

    /// Display message of the last failed fetch.
    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }

    /// Fetch and normalize a schedule, replacing the dataset.
    ///
    /// On success the whole dataset is swapped and any previous error is
    /// cleared. On failure the dataset is cleared and the error message is
    /// retained for display; the error is also returned.
    ///
    /// # Errors
    ///
    /// [`AgentError::Date`]/[`AgentError::Config`] for bad inputs before
    /// any network traffic, [`AgentError::Fetch`] for failed requests.
    pub async fn refresh(
        &mut self,
        identity: &str,
        date: &str,
        population: Population,
        scope: Scope,
    ) -> Result<(), AgentError> {
        let request = FetchRequest::new(identity, date, population, scope, &self.config)?;
        self.last_request = Some(request.clone());
        self.execute(&request).await
    }

    /// Re-run the most recent fetch, if there was one.
    ///
    /// # Errors
    ///
    /// Same as [`Agent::refresh`]; additionally [`AgentError::Fetch`] with
    /// a descriptive message when nothing has been fetched yet.
    pub async fn refetch(&mut self) -> Result<(), AgentError> {
        let Some(request) = self.last_request.clone() else {
            return Err(AgentError::Fetch {
                status: None,
                message: "nothing fetched yet".into(),
            });
        };
        self.execute(&request).await
    }

    async fn execute(&mut self, request: &FetchRequest) -> Result<(), AgentError> {
        match self.service.fetch(request).await {
            Ok(payload) => {
                let entries = normalize(payload, &request.filter_key);
                tracing::debug!(count = entries.len(), "dataset replaced");
                self.state.entries = entries;
                self.state.filter_key = request.filter_key.clone();
                self.state.last_error = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "fetch failed, dataset cleared");
                self.state.entries = Vec::new();
                self.state.filter_key = request.filter_key.clone();
                self.state.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Locate an entry by CRM lead id (exact, first match). The input may
    /// be a pasted CRM URL; see [`locate::extract_lead_id`].
    ///
    /// The result, found or not, overwrites the previously held one.
    ///
    /// # Errors
    ///
    /// [`AgentError::NotFound`] when no entry matches.
    pub fn locate_by_lead_id(&mut self, input: &str) -> Result<ScheduleEntry, AgentError> {
        let key = locate::extract_lead_id(input);
        let result = locate::find_by_lead_id(&self.state.entries, &key).cloned();
        self.remember(result)
    }

    /// Locate the last entry (in fetch order) with the given status.
    ///
    /// # Errors
    ///
    /// [`AgentError::NotFound`] when no entry matches.
    pub fn locate_last_by_status(&mut self, value: &str) -> Result<ScheduleEntry, AgentError> {
        let result = locate::last_by_status(&self.state.entries, value).cloned();
        self.remember(result)
    }

    /// Locate the last entry (in fetch order) with the given sub-status.
    ///
    /// # Errors
    ///
    /// [`AgentError::NotFound`] when no entry matches.
    pub fn locate_last_by_sub_status(&mut self, value: &str) -> Result<ScheduleEntry, AgentError> {
        let result = locate::last_by_sub_status(&self.state.entries, value).cloned();
        self.remember(result)
    }

    fn remember(
        &mut self,
        result: Result<ScheduleEntry, AgentError>,
    ) -> Result<ScheduleEntry, AgentError> {
        match result {
            Ok(entry) => {
                self.state.found = Some(entry.clone());
                Ok(entry)
            }
            Err(err) => {
                self.state.found = None;
                Err(err)
            }
        }
    }

    /// Entries of the current dataset satisfying the criteria, in order.
    pub fn filtered(&self, criteria: &FilterCriteria) -> Vec<&ScheduleEntry> {
        filter_entries(&self.state.entries, criteria)
    }

    /// Apply a status change to one slot: confirm, submit, resynchronize.
    ///
    /// The prompt is asked exactly once before any network call; a declined
    /// action produces [`MutationOutcome::Declined`] and zero network
    /// traffic. After an approved submission — whether it succeeded or
    /// failed on the network level — exactly one refetch runs, because the
    /// server is the only source of truth for the mutation's effect. A
    /// submission failure is logged and returned; a refetch failure only
    /// updates the held state.
    ///
    /// # Errors
    ///
    /// [`AgentError::Mutation`] when the status-update call itself failed.
    pub async fn set_status(
        &mut self,
        id: i64,
        status: SlotStatus,
        population: Population,
        prompt: &impl ConfirmPrompt,
    ) -> Result<MutationOutcome, AgentError> {
        let action = MutationAction::new(id, status, population);
        if prompt.request(&action) == Decision::Declined {
            tracing::debug!(action = %action, "mutation declined");
            return Ok(MutationOutcome::Declined);
        }

        let submitted = self.service.set_status(&action).await;
        if let Err(ref err) = submitted {
            tracing::warn!(action = %action, error = %err, "status update failed");
        }

        // Never trust the response text; re-read ground truth regardless.
        if self.last_request.is_some() {
            if let Err(err) = self.refetch().await {
                tracing::warn!(error = %err, "post-mutation refetch failed");
            }
        }

        submitted.map(MutationOutcome::Submitted)
    }

    /// Perform one fetch and enter the polling state.
    ///
    /// # Errors
    ///
    /// Same as [`Agent::refresh`]; polling starts even when the initial
    /// fetch fails, so the next tick retries.
    pub async fn fetch_and_start_polling(
        &mut self,
        identity: &str,
        date: &str,
        population: Population,
        scope: Scope,
    ) -> Result<(), AgentError> {
        let result = self.refresh(identity, date, population, scope).await;
        self.poller.start();
        result
    }

    /// Leave the polling state; a running [`Agent::run_poller`] exits on
    /// its next tick.
    pub fn stop_polling(&mut self) {
        self.poller.stop();
    }

    pub fn polling_state(&self) -> PollerState {
        self.poller.state()
    }

    /// Ticks remaining until the next automatic fetch.
    pub fn poll_countdown(&self) -> u32 {
        self.poller.countdown()
    }

    /// Advance the poller by one tick, refetching when due.
    ///
    /// Fetch failures are logged and reflected in the held state rather
    /// than returned; the loop must keep ticking through them. Returns
    /// whether a fetch was attempted.
    pub async fn poll_tick(&mut self) -> bool {
        if !self.poller.tick() {
            return false;
        }
        if let Err(err) = self.refetch().await {
            tracing::warn!(error = %err, "poll-driven fetch failed");
        }
        true
    }

    /// Drive the poller on a fixed cadence until polling stops.
    ///
    /// Runs one tick every `tick_seconds` from config. Dropping the
    /// returned future stops future ticks but does not cancel an in-flight
    /// request.
    pub async fn run_poller(&mut self) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.config.tick_seconds));
        // The first interval tick completes immediately; consume it so the
        // countdown starts one full tick after entering the loop.
        interval.tick().await;
        while self.poller.is_polling() {
            interval.tick().await;
            self.poll_tick().await;
        }
    }
}

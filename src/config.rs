//! Agent configuration with production defaults.
//!
//! [`AgentConfig`] holds the four endpoint bases, the privileged manager
//! identity used for team-scope requests, pagination sizes, the HTTP
//! timeout, and the poll cadence. The defaults point at the production
//! service; tests and staging deployments override the base URLs.

use crate::error::AgentError;

/// Configuration for the scheduling agent.
///
/// Use [`Default::default()`] for production values, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Base URL of the general-population service, no trailing slash.
    pub general_base_url: String,
    /// Base URL of the kids-population service, no trailing slash.
    pub kids_base_url: String,
    /// Fixed privileged username used for team-scope requests in place of
    /// the operator-supplied identity.
    pub team_username: String,
    /// Page size for team-scope requests against the general population.
    pub team_page_size: u32,
    /// Page size for team-scope requests against the kids population.
    pub kids_team_page_size: u32,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Number of poll ticks between automatic refetches.
    pub poll_interval_ticks: u32,
    /// Duration of one poll tick in seconds.
    pub tick_seconds: u64,
    /// Custom User-Agent string. If `None`, reqwest's default is used.
    pub user_agent: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            general_base_url: "https://urban-bot2.zudov.pro/api".into(),
            kids_base_url: "https://urban-bot-kids.zudov.pro/api".into(),
            team_username: "manager".into(),
            team_page_size: 1000,
            kids_team_page_size: 100,
            timeout_seconds: 8,
            poll_interval_ticks: 5,
            tick_seconds: 1,
            user_agent: None,
        }
    }
}

impl AgentConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - base URLs must not be empty
    /// - `team_username` must not be empty
    /// - `team_page_size` and `kids_team_page_size` must be greater than 0
    /// - `timeout_seconds`, `poll_interval_ticks`, `tick_seconds` must be
    ///   greater than 0
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.general_base_url.is_empty() {
            return Err(AgentError::Config(
                "general_base_url must not be empty".into(),
            ));
        }
        if self.kids_base_url.is_empty() {
            return Err(AgentError::Config("kids_base_url must not be empty".into()));
        }
        if self.team_username.is_empty() {
            return Err(AgentError::Config("team_username must not be empty".into()));
        }
        if self.team_page_size == 0 || self.kids_team_page_size == 0 {
            return Err(AgentError::Config(
                "team page sizes must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(AgentError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.poll_interval_ticks == 0 {
            return Err(AgentError::Config(
                "poll_interval_ticks must be greater than 0".into(),
            ));
        }
        if self.tick_seconds == 0 {
            return Err(AgentError::Config(
                "tick_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

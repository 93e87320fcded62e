//! Error types for the sched-agent crate.
//!
//! All errors use stable string messages suitable for display to operators
//! and programmatic handling. Fetch failures carry the HTTP status when one
//! was received; lookup misses are a distinct variant because they must not
//! clear the held dataset.

/// Errors that can occur while fetching, querying, or mutating a schedule.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A schedule request failed (transport error or non-2xx response).
    /// The message names the identity and date that were requested.
    #[error("fetch failed: {message}")]
    Fetch {
        /// HTTP status code, if a response was received at all.
        status: Option<u16>,
        /// Human-readable description naming the identity and date.
        message: String,
    },

    /// A lookup over the current dataset matched nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// A status-update request failed on the network level.
    #[error("mutation failed: {0}")]
    Mutation(String),

    /// Invalid agent configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A caller-supplied date was not in year-month-day form.
    #[error("invalid date: {0}")]
    Date(String),
}

/// Convenience type alias for sched-agent results.
pub type Result<T> = std::result::Result<T, AgentError>;

//! Shared HTTP client construction for scheduling service requests.
//!
//! Provides a configured [`reqwest::Client`] with the timeout and optional
//! User-Agent from [`AgentConfig`]. The timeout is the only cancellation
//! mechanism in the crate; individual fetches are never aborted by callers.

use crate::config::AgentConfig;
use crate::error::AgentError;
use std::time::Duration;

/// Build a [`reqwest::Client`] for talking to the scheduling service.
///
/// The client has:
/// - Timeout from config
/// - Optional custom User-Agent
/// - Gzip decompression
///
/// # Errors
///
/// Returns [`AgentError::Fetch`] if the client cannot be constructed.
pub fn build_client(config: &AgentConfig) -> Result<reqwest::Client, AgentError> {
    let mut builder = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(ref ua) = config.user_agent {
        builder = builder.user_agent(ua.clone());
    }

    builder.build().map_err(|e| AgentError::Fetch {
        status: None,
        message: format!("failed to build HTTP client: {e}"),
    })
}

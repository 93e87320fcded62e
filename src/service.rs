//! Trait seam for the scheduling service, plus the production HTTP
//! implementation.
//!
//! [`ScheduleService`] is the only boundary the agent talks to the network
//! through, which keeps the fetch/mutate flows testable with a mock
//! implementation. All implementations must be `Send + Sync`.

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::fetch::{self, FetchRequest};
use crate::http;
use crate::mutate::MutationAction;
use crate::types::RawPayload;

/// A backend that can serve schedule fetches and status updates.
pub trait ScheduleService: Send + Sync {
    /// Execute a prepared schedule request and return the raw payload.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Fetch`] for transport failures, non-2xx
    /// responses, and unreadable bodies. The error message names the
    /// identity and date from the request.
    fn fetch(
        &self,
        request: &FetchRequest,
    ) -> impl std::future::Future<Output = Result<RawPayload, AgentError>> + Send;

    /// Submit a status change and return the service's response body as
    /// text, verbatim. The body is opaque; even a non-2xx response's text
    /// is returned rather than treated as an error, because the service
    /// gives no structured success signal.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Mutation`] only for network-level failures.
    fn set_status(
        &self,
        action: &MutationAction,
    ) -> impl std::future::Future<Output = Result<String, AgentError>> + Send;
}

/// Production implementation backed by [`reqwest`].
#[derive(Debug, Clone)]
pub struct HttpScheduleService {
    client: reqwest::Client,
    config: AgentConfig,
}

impl HttpScheduleService {
    /// Build the service from config.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Fetch`] if the HTTP client cannot be built.
    pub fn new(config: AgentConfig) -> Result<Self, AgentError> {
        let client = http::build_client(&config)?;
        Ok(Self { client, config })
    }
}

impl ScheduleService for HttpScheduleService {
    async fn fetch(&self, request: &FetchRequest) -> Result<RawPayload, AgentError> {
        tracing::trace!(
            url = %request.url,
            population = %request.population,
            scope = %request.scope,
            "schedule request"
        );

        let response = self
            .client
            .get(request.url.clone())
            .send()
            .await
            .map_err(|e| AgentError::Fetch {
                status: e.status().map(|s| s.as_u16()),
                message: request.failure_message(&e.to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::Fetch {
                status: Some(status.as_u16()),
                message: request.failure_message(&format!("HTTP {status}")),
            });
        }

        let payload = response
            .json::<RawPayload>()
            .await
            .map_err(|e| AgentError::Fetch {
                status: Some(status.as_u16()),
                message: request.failure_message(&format!("unreadable response body: {e}")),
            })?;

        tracing::trace!("schedule response received");
        Ok(payload)
    }

    async fn set_status(&self, action: &MutationAction) -> Result<String, AgentError> {
        let url = fetch::mutation_url(&self.config, action.population)?;
        let body = serde_json::json!({ "id": action.id, "status": action.status.code() });

        tracing::trace!(%url, slot = action.id, status = %action.status, "status update");

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::Mutation(format!("{}: {e}", action.describe())))?;

        response
            .text()
            .await
            .map_err(|e| AgentError::Mutation(format!("{}: unreadable response: {e}", action.describe())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_service_builds_from_default_config() {
        assert!(HttpScheduleService::new(AgentConfig::default()).is_ok());
    }

    #[test]
    fn http_service_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpScheduleService>();
    }

    #[test]
    fn mutation_body_shape() {
        let body = serde_json::json!({ "id": 17_i64, "status": 4_u8 });
        assert_eq!(body.to_string(), r#"{"id":17,"status":4}"#);
    }
}

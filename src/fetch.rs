//! Fetch request construction: endpoint selection and date conversion.
//!
//! The population and scope flags select one of four endpoint templates,
//! each with its own base URL and query shape. Both date conversions (query
//! format and filter key) happen here, exactly once per fetch, so that the
//! filter key is never re-derived from the dataset.

use crate::config::AgentConfig;
use crate::dates;
use crate::error::AgentError;
use crate::types::{Population, Scope};
use url::Url;

/// A fully prepared schedule request.
///
/// Construction performs endpoint selection and all date conversions;
/// afterwards the request is immutable. The original identity and date are
/// retained for error messages.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Operator-supplied identity as given (team scope substitutes the
    /// privileged username in the URL but keeps this for messages).
    pub identity: String,
    /// Caller-supplied date in `YYYY-MM-DD` form, kept for messages.
    pub date: String,
    pub population: Population,
    pub scope: Scope,
    /// Day-first key used to select the day bucket after fetching.
    pub filter_key: String,
    /// Complete endpoint URL including query parameters.
    pub url: Url,
}

impl FetchRequest {
    /// Prepare a request for the given identity, date, population, and scope.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Date`] for a malformed date and
    /// [`AgentError::Config`] if the configured base URL cannot be parsed.
    pub fn new(
        identity: &str,
        date: &str,
        population: Population,
        scope: Scope,
        config: &AgentConfig,
    ) -> Result<Self, AgentError> {
        let query_date = dates::query_date(date)?;
        let filter_key = dates::filter_key(date)?;

        let base = base_url(config, population);
        let mut url = match scope {
            Scope::Expert => parse_endpoint(base, "expert/getScheduler")?,
            Scope::Team => parse_endpoint(base, "manager/getTeamScheduler")?,
        };

        match scope {
            Scope::Expert => {
                url.query_pairs_mut()
                    .append_pair("username", identity)
                    .append_pair("dateStart", &query_date);
            }
            Scope::Team => {
                let page_size = match population {
                    Population::General => config.team_page_size,
                    Population::Kids => config.kids_team_page_size,
                };
                url.query_pairs_mut()
                    .append_pair("username", &config.team_username)
                    .append_pair("date", &query_date)
                    .append_pair("pageNumber", "1")
                    .append_pair("pageSize", &page_size.to_string());
            }
        }

        Ok(Self {
            identity: identity.to_string(),
            date: date.to_string(),
            population,
            scope,
            filter_key,
            url,
        })
    }

    /// Message describing a failed attempt at this request, naming the
    /// identity and date as operators expect to see them.
    pub fn failure_message(&self, detail: &str) -> String {
        format!(
            "schedule request for {} on {} failed: {detail}",
            self.identity, self.date
        )
    }
}

/// URL of the status-update endpoint for the given population.
///
/// # Errors
///
/// Returns [`AgentError::Config`] if the configured base URL is unparsable.
pub fn mutation_url(config: &AgentConfig, population: Population) -> Result<Url, AgentError> {
    parse_endpoint(base_url(config, population), "expert/setStatusScheduler")
}

fn base_url(config: &AgentConfig, population: Population) -> &str {
    match population {
        Population::General => &config.general_base_url,
        Population::Kids => &config.kids_base_url,
    }
}

fn parse_endpoint(base: &str, path: &str) -> Result<Url, AgentError> {
    let joined = format!("{}/{path}", base.trim_end_matches('/'));
    Url::parse(&joined).map_err(|e| AgentError::Config(format!("bad base URL {base:?}: {e}")))
}

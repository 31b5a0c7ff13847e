//! Public client surface + builder.

use std::time::Duration;

use url::Url;

use crate::core::TelraamError;

const DEFAULT_BASE_URL: &str = "https://telraam-api.net/v1/";
const USER_AGENT: &str = concat!("telraam-rs/", env!("CARGO_PKG_VERSION"));

/// Name of the header carrying the API token on every request.
pub(crate) const API_KEY_HEADER: &str = "X-Api-Key";

/// Longest time window (in days) the reports endpoint accepts per request.
pub(crate) const MAX_CHUNK_DAYS: i64 = 90;

/// A configured handle to the Telraam API.
///
/// Cheap to clone; holds the HTTP connection pool, the base URL, and the API
/// token. The token is treated as an opaque header value — this crate never
/// reads it from the environment itself (the CLI binary does that at the
/// edge, via clap).
#[derive(Debug, Clone)]
pub struct TelraamClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    max_chunk_days: i64,
}

impl TelraamClient {
    /// Create a new builder.
    pub fn builder() -> TelraamClientBuilder {
        TelraamClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self, TelraamError> {
        Self::builder().api_key(api_key).build()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn max_chunk_days(&self) -> i64 {
        self.max_chunk_days
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct TelraamClientBuilder {
    api_key: Option<String>,
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    max_chunk_days: Option<i64>,
}

impl TelraamClientBuilder {
    /// Set the API token sent in the `X-Api-Key` header. Required.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the API base URL (e.g. for tests against a mock server).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Override the maximum sub-interval width used when chunking long date
    /// ranges. Default: 90 days, the provider's limit. Mostly useful to make
    /// tests chunk small ranges.
    #[must_use]
    pub fn max_chunk_days(mut self, days: i64) -> Self {
        self.max_chunk_days = Some(days);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`TelraamError::MissingApiKey`] when no API key was set,
    /// [`TelraamError::InvalidParams`] for a non-positive `max_chunk_days`,
    /// or an error from the underlying HTTP client construction.
    pub fn build(self) -> Result<TelraamClient, TelraamError> {
        let api_key = self.api_key.ok_or(TelraamError::MissingApiKey)?;
        let max_chunk_days = self.max_chunk_days.unwrap_or(MAX_CHUNK_DAYS);
        if max_chunk_days <= 0 {
            return Err(TelraamError::InvalidParams(format!(
                "max_chunk_days must be positive, got {max_chunk_days}"
            )));
        }
        let base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));
        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }
        let http = httpb.build()?;

        Ok(TelraamClient {
            http,
            base_url,
            api_key,
            max_chunk_days,
        })
    }
}

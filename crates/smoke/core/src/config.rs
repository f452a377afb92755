//! Run configuration shared by the probe layer and every check.

use std::time::Duration;

use crate::error::{SmokeError, SmokeResult};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Target node and credentials, built once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeConfig {
    base_url: String,
    chain: String,
    auth_token: Option<String>,
    timeout: Duration,
}

impl SmokeConfig {
    /// Create a configuration for `base_url` and chain identifier `chain`.
    pub fn new(base_url: &str, chain: &str) -> SmokeResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(SmokeError::InvalidConfig("base URL is empty".into()));
        }

        let chain = chain.trim();
        if chain.is_empty() {
            return Err(SmokeError::InvalidConfig("chain identifier is empty".into()));
        }

        Ok(Self {
            base_url: base_url.to_string(),
            chain: chain.to_string(),
            auth_token: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Attach an auth token. An empty token counts as none.
    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.filter(|t| !t.is_empty());
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chain identifier substituted into endpoint paths.
    pub fn chain(&self) -> &str {
        &self.chain
    }

    /// Auth token, if any.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full request URL for an endpoint path.
    ///
    /// The token goes into an `auth` query parameter, joined with `&` when
    /// the path already has a query string.
    pub fn url_for(&self, path: &str) -> String {
        match &self.auth_token {
            Some(token) => {
                let sep = if path.contains('?') { '&' } else { '?' };
                format!("{}{}{}auth={}", self.base_url, path, sep, token)
            }
            None => format!("{}{}", self.base_url, path),
        }
    }
}

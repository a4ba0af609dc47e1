//! Fetch and provider configuration.

use crate::statement::PeriodType;
use std::time::Duration;

/// Yahoo Finance query host.
pub const YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// Number of periods requested by default.
pub const DEFAULT_LIMIT: usize = 5;

/// Browser user agent; Yahoo rejects requests without one.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";

/// Per-request options for fetching an income statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    /// Reporting frequency.
    pub period_type: PeriodType,
    /// Maximum number of periods returned, most recent first.
    pub limit: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            period_type: PeriodType::Annual,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl FetchConfig {
    /// Create a configuration for the given frequency and limit.
    pub const fn new(period_type: PeriodType, limit: usize) -> Self {
        Self { period_type, limit }
    }
}

/// Connection settings for a remote statement provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the provider, without trailing slash.
    pub base_url: String,
    /// Minimum interval between two requests.
    pub rate_limit: Duration,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent header.
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: YAHOO_BASE_URL.to_string(),
            rate_limit: Duration::from_millis(1000),
            timeout: Duration::from_secs(30),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the minimum interval between requests.
    pub const fn with_rate_limit(mut self, rate_limit: Duration) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Override the request timeout.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let fetch = FetchConfig::default();
        assert_eq!(fetch.period_type, PeriodType::Annual);
        assert_eq!(fetch.limit, 5);

        let provider = ProviderConfig::default();
        assert_eq!(provider.base_url, YAHOO_BASE_URL);
        assert_eq!(provider.rate_limit, Duration::from_secs(1));
        assert_eq!(provider.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let provider = ProviderConfig::default().with_base_url("http://localhost:8080/");
        assert_eq!(provider.base_url, "http://localhost:8080");
    }
}

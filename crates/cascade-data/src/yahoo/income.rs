//! Income statement fetching from Yahoo Finance.

use super::timeseries::parse_timeseries;
use crate::config::{FetchConfig, ProviderConfig};
use crate::error::{DataError, Result};
use crate::source::{IncomeStatementSource, normalize_symbol, order_periods};
use crate::statement::{LineItem, PeriodFinancials, PeriodType};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

/// Earliest period requested; Yahoo only holds a few years regardless.
const PERIOD_START: i64 = 493_590_046;

/// Spaces consecutive requests by a minimum interval.
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            last_request: now.checked_sub(min_interval).unwrap_or(now),
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// Yahoo Finance income statement provider.
pub struct YahooIncomeStatementProvider {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    base_url: String,
}

impl std::fmt::Debug for YahooIncomeStatementProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooIncomeStatementProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl YahooIncomeStatementProvider {
    /// Create a provider with default settings (1 req/sec, 30s timeout).
    pub fn new() -> Result<Self> {
        Self::with_config(&ProviderConfig::default())
    }

    /// Create a provider with custom connection settings.
    ///
    /// # Example
    /// ```no_run
    /// use cascade_data::ProviderConfig;
    /// use cascade_data::yahoo::YahooIncomeStatementProvider;
    /// use std::time::Duration;
    ///
    /// # fn example() -> cascade_data::Result<()> {
    /// let config = ProviderConfig::default().with_rate_limit(Duration::from_millis(250));
    /// let provider = YahooIncomeStatementProvider::with_config(&config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_config(config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.rate_limit))),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the time series URL for a symbol.
    ///
    /// `period2` is the upper bound of the requested window as a Unix
    /// timestamp.
    pub fn timeseries_url(&self, symbol: &str, period_type: PeriodType, period2: i64) -> String {
        let types = LineItem::ALL
            .iter()
            .map(|item| item.yahoo_series(period_type))
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "{}/ws/fundamentals-timeseries/v1/finance/timeseries/{}?symbol={}&type={}&period1={}&period2={}",
            self.base_url, symbol, symbol, types, PERIOD_START, period2
        )
    }

    /// Fetch the income statement of a symbol.
    ///
    /// # Arguments
    /// * `symbol` - Ticker symbol (e.g., "AAPL"); case-insensitive
    /// * `config` - Frequency and number of periods
    ///
    /// # Returns
    /// Periods most recent first. An empty vector when Yahoo has no
    /// statement for the symbol.
    ///
    /// # Errors
    /// * [`DataError::InvalidSymbol`] for an empty symbol
    /// * [`DataError::Http`] for a non-success status
    /// * [`DataError::YahooApi`] when the payload carries an error
    pub async fn fetch_income_statement(
        &self,
        symbol: &str,
        config: &FetchConfig,
    ) -> Result<Vec<PeriodFinancials>> {
        let symbol = normalize_symbol(symbol)?;
        let url = self.timeseries_url(&symbol, config.period_type, Utc::now().timestamp());

        self.rate_limiter.lock().await.wait().await;

        debug!(symbol = %symbol, url = %url, "requesting fundamentals time series");
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "Failed to fetch income statement for {}: HTTP {}",
                symbol,
                response.status()
            )));
        }

        let body = response.text().await?;
        let periods = parse_timeseries(&symbol, &body, config.period_type)?;
        let periods = order_periods(periods, config.limit);

        info!(
            symbol = %symbol,
            period_type = %config.period_type,
            periods = periods.len(),
            "fetched income statement"
        );

        Ok(periods)
    }
}

impl IncomeStatementSource for YahooIncomeStatementProvider {
    async fn fetch_income_statement(
        &self,
        symbol: &str,
        config: &FetchConfig,
    ) -> Result<Vec<PeriodFinancials>> {
        Self::fetch_income_statement(self, symbol, config).await
    }
}

//! Sources of income statement periods.

use crate::config::FetchConfig;
use crate::error::{DataError, Result};
use crate::statement::PeriodFinancials;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Anything that can supply the income statement of a symbol.
///
/// Implementations return periods most recent first, at most
/// [`FetchConfig::limit`] of them. An empty vector means the source has no
/// data for the symbol; it is not an error.
pub trait IncomeStatementSource {
    /// Fetch the income statement periods of `symbol`.
    fn fetch_income_statement(
        &self,
        symbol: &str,
        config: &FetchConfig,
    ) -> impl Future<Output = Result<Vec<PeriodFinancials>>> + Send;
}

/// Trim and upper-case a ticker symbol, rejecting empty input.
pub fn normalize_symbol(symbol: &str) -> Result<String> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(DataError::InvalidSymbol(trimmed.to_string()));
    }
    Ok(trimmed.to_uppercase())
}

/// Sort periods most recent first and keep at most `limit` of them.
pub fn order_periods(mut periods: Vec<PeriodFinancials>, limit: usize) -> Vec<PeriodFinancials> {
    periods.sort_by(|a, b| b.period_ending.cmp(&a.period_ending));
    periods.truncate(limit);
    periods
}

/// Reads statements from a JSON file holding an array of [`PeriodFinancials`].
///
/// The file is not keyed by symbol: whatever symbol is requested, the file's
/// periods are returned.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source reading from `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse statements from a JSON string.
    pub fn parse(json: &str) -> Result<Vec<PeriodFinancials>> {
        let periods: Vec<PeriodFinancials> = serde_json::from_str(json)?;
        Ok(periods)
    }
}

impl IncomeStatementSource for JsonFileSource {
    async fn fetch_income_statement(
        &self,
        symbol: &str,
        config: &FetchConfig,
    ) -> Result<Vec<PeriodFinancials>> {
        let symbol = normalize_symbol(symbol)?;
        let content = tokio::fs::read_to_string(&self.path).await?;
        let periods = Self::parse(&content)?;

        debug!(
            symbol = %symbol,
            path = %self.path.display(),
            periods = periods.len(),
            "loaded income statement from file"
        );

        Ok(order_periods(periods, config.limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn period(year: i32) -> PeriodFinancials {
        PeriodFinancials::new(NaiveDate::from_ymd_opt(year, 12, 31).unwrap())
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol(" aapl ").unwrap(), "AAPL");
        assert_eq!(normalize_symbol("brk-b").unwrap(), "BRK-B");
        assert!(matches!(
            normalize_symbol("   "),
            Err(DataError::InvalidSymbol(_))
        ));
        assert!(matches!(
            normalize_symbol("AA PL"),
            Err(DataError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn test_order_periods() {
        let ordered = order_periods(vec![period(2020), period(2023), period(2021)], 2);
        let years: Vec<_> = ordered.iter().map(PeriodFinancials::fiscal_year).collect();
        assert_eq!(years, vec![2023, 2021]);
    }

    #[tokio::test]
    async fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"period_ending":"2021-12-31","total_revenue":800.0}},
                {{"period_ending":"2022-12-31","total_revenue":900.0,"currency":"USD"}}
            ]"#
        )
        .unwrap();

        let source = JsonFileSource::new(file.path());
        let periods = source
            .fetch_income_statement("test", &FetchConfig::default())
            .await
            .unwrap();

        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].fiscal_year(), 2022);
        assert_eq!(periods[0].currency.as_deref(), Some("USD"));
        assert_eq!(periods[1].total_revenue, Some(800.0));
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let source = JsonFileSource::new("/nonexistent/cascade/statements.json");
        let result = source
            .fetch_income_statement("AAPL", &FetchConfig::default())
            .await;
        assert!(matches!(result, Err(DataError::Io(_))));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            JsonFileSource::parse("not json"),
            Err(DataError::Serialization(_))
        ));
    }
}

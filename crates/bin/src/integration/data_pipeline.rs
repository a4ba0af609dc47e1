//! Data pipeline for fetching income statements.
//!
//! Statements come either from Yahoo Finance or from a local JSON file; both
//! are wrapped in [`StatementSource`] so the commands stay source-agnostic.

use cascade::data::yahoo::YahooIncomeStatementProvider;
use cascade::output::{ChartError, ExportError, ReportError};
use cascade::{FetchConfig, IncomeStatementSource, PeriodFinancials, StatementReport, analyze};
use cascade_data::{DataError, JsonFileSource};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Error type for CLI operations.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    /// Fetching or parsing statements failed.
    #[error("{0}")]
    Data(#[from] DataError),
    /// Writing an export failed.
    #[error("{0}")]
    Export(#[from] ExportError),
    /// Drawing a chart failed.
    #[error("{0}")]
    Chart(#[from] ChartError),
    /// Building the JSON report failed.
    #[error("{0}")]
    Report(#[from] ReportError),
    /// Terminal or file IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where statements are read from.
#[derive(Debug)]
pub(crate) enum StatementSource {
    /// Live Yahoo Finance fundamentals.
    Yahoo(YahooIncomeStatementProvider),
    /// A JSON file of periods.
    File(JsonFileSource),
}

impl StatementSource {
    /// Use the file when one is given, Yahoo Finance otherwise.
    pub(crate) fn from_args(from_file: Option<PathBuf>) -> Result<Self, CliError> {
        from_file.map_or_else(
            || Ok(Self::Yahoo(YahooIncomeStatementProvider::new()?)),
            |path| Ok(Self::File(JsonFileSource::new(path))),
        )
    }
}

impl IncomeStatementSource for StatementSource {
    async fn fetch_income_statement(
        &self,
        symbol: &str,
        config: &FetchConfig,
    ) -> cascade_data::Result<Vec<PeriodFinancials>> {
        match self {
            Self::Yahoo(provider) => provider.fetch_income_statement(symbol, config).await,
            Self::File(source) => source.fetch_income_statement(symbol, config).await,
        }
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Fetch the statement of `symbol` and compute its waterfalls, showing a
/// spinner on stderr while the request is in flight.
pub(crate) async fn fetch_report<S: IncomeStatementSource>(
    source: &S,
    symbol: &str,
    config: &FetchConfig,
) -> Result<StatementReport, CliError> {
    let pb = spinner(format!(
        "Fetching {} income statement for {}...",
        config.period_type,
        symbol.trim().to_uppercase()
    ));
    let result = analyze(source, symbol, config).await;
    pb.finish_and_clear();
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade::PeriodType;
    use std::io::Write;

    #[test]
    fn test_source_from_args() {
        let file = StatementSource::from_args(Some(PathBuf::from("statements.json"))).unwrap();
        assert!(matches!(file, StatementSource::File(_)));

        let yahoo = StatementSource::from_args(None).unwrap();
        assert!(matches!(yahoo, StatementSource::Yahoo(_)));
    }

    #[tokio::test]
    async fn test_fetch_report_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"period_ending":"2023-06-30","total_revenue":200.0,"net_income":20.0}}]"#
        )
        .unwrap();

        let source = StatementSource::from_args(Some(file.path().to_path_buf())).unwrap();
        let config = FetchConfig::new(PeriodType::Annual, 5);
        let report = fetch_report(&source, "abc", &config).await.unwrap();

        assert_eq!(report.symbol, "ABC");
        assert_eq!(report.periods.len(), 1);
        let waterfall = report.waterfalls[0].waterfall.as_ref().unwrap();
        assert_eq!(waterfall.final_level(), 10.0);
    }

    #[tokio::test]
    async fn test_fetch_report_missing_file() {
        let source =
            StatementSource::from_args(Some(PathBuf::from("/nonexistent/cascade.json"))).unwrap();
        let result = fetch_report(&source, "ABC", &FetchConfig::default()).await;
        assert!(matches!(result, Err(CliError::Data(DataError::Io(_)))));
    }
}

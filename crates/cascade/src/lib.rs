#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cascade/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export main types from sub-crates
pub use cascade_data as data;
pub use cascade_output as output;
pub use cascade_waterfall as waterfall;

pub use cascade_data::{FetchConfig, IncomeStatementSource, PeriodFinancials, PeriodType};
pub use cascade_output::{IncomeTable, PeriodWaterfall, StatementReport};
pub use cascade_waterfall::{StepLabel, Waterfall, WaterfallStep, compute_steps};

use tracing::info;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fetch the statement of `symbol` from `source` and compute its waterfalls.
///
/// The report's symbol is the normalized (upper-case) ticker. An empty
/// report means the source had nothing for the symbol.
///
/// # Errors
/// Propagates the source's error: invalid symbol, network or parse failure.
pub async fn analyze<S: IncomeStatementSource>(
    source: &S,
    symbol: &str,
    config: &FetchConfig,
) -> data::Result<StatementReport> {
    let symbol = data::source::normalize_symbol(symbol)?;
    let periods = source.fetch_income_statement(&symbol, config).await?;

    let report = StatementReport::new(symbol, config.period_type, periods);
    info!(
        symbol = %report.symbol,
        periods = report.periods.len(),
        charted = report.waterfalls.iter().filter(|w| w.waterfall.is_some()).count(),
        "analyzed income statement"
    );
    Ok(report)
}

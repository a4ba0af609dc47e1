//! Yahoo Finance data providers.

pub mod income;
pub mod timeseries;

pub use income::YahooIncomeStatementProvider;
pub use timeseries::parse_timeseries;

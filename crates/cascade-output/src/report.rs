//! Combined statement and waterfall reports.

use crate::chart::{PeriodWaterfall, period_waterfalls};
use cascade_data::{PeriodFinancials, PeriodType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required builder field was not set.
    #[error("Missing report field: {0}")]
    Missing(&'static str),
}

/// Income statement of one symbol together with its waterfalls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementReport {
    /// Symbol being reported.
    pub symbol: String,

    /// Report generation timestamp.
    pub generated_at: DateTime<Utc>,

    /// Reporting frequency of the periods.
    pub period_type: PeriodType,

    /// Periods, most recent first.
    pub periods: Vec<PeriodFinancials>,

    /// One waterfall per period, same order as `periods`.
    pub waterfalls: Vec<PeriodWaterfall>,
}

impl StatementReport {
    /// Create a report, computing the waterfalls of `periods`.
    pub fn new(symbol: String, period_type: PeriodType, periods: Vec<PeriodFinancials>) -> Self {
        let waterfalls = period_waterfalls(&periods);
        Self {
            symbol,
            generated_at: Utc::now(),
            period_type,
            periods,
            waterfalls,
        }
    }

    /// Whether the report has no periods.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    symbol: Option<String>,
    period_type: PeriodType,
    periods: Vec<PeriodFinancials>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the symbol.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Set the reporting frequency.
    pub const fn period_type(mut self, period_type: PeriodType) -> Self {
        self.period_type = period_type;
        self
    }

    /// Set the periods.
    pub fn periods(mut self, periods: Vec<PeriodFinancials>) -> Self {
        self.periods = periods;
        self
    }

    /// Build the report.
    pub fn build(self) -> Result<StatementReport, ReportError> {
        let symbol = self.symbol.ok_or(ReportError::Missing("symbol"))?;
        Ok(StatementReport::new(symbol, self.period_type, self.periods))
    }
}

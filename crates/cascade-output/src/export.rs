//! Export functionality for income statements and waterfalls.
//!
//! Statements export one CSV row per period; waterfalls are flattened to one
//! row per bar so a spreadsheet can rebuild the chart.

use crate::chart::PeriodWaterfall;
use cascade_data::PeriodFinancials;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer produced invalid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Comma-separated values format.
    #[default]
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        debug!(path = %path.display(), format = format.extension(), "exported");
        Ok(())
    }
}

/// Serialize CSV records into a string.
fn write_csv<T: Serialize>(records: impl IntoIterator<Item = T>) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Income statement periods of one symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatementExport {
    /// Security symbol.
    pub symbol: String,

    /// Periods, most recent first.
    pub periods: Vec<PeriodFinancials>,
}

impl StatementExport {
    /// Create a new statement export.
    pub const fn new(symbol: String, periods: Vec<PeriodFinancials>) -> Self {
        Self { symbol, periods }
    }
}

/// One CSV row of a statement export.
#[derive(Debug, Serialize)]
struct StatementRow<'a> {
    symbol: &'a str,
    period_ending: NaiveDate,
    currency: Option<&'a str>,
    total_revenue: Option<f64>,
    gross_profit: Option<f64>,
    ebitda: Option<f64>,
    ebit: Option<f64>,
    total_pre_tax_income: Option<f64>,
    net_income: Option<f64>,
}

impl Exporter for StatementExport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_csv(self.periods.iter().map(|p| StatementRow {
                symbol: &self.symbol,
                period_ending: p.period_ending,
                currency: p.currency.as_deref(),
                total_revenue: p.total_revenue,
                gross_profit: p.gross_profit,
                ebitda: p.ebitda,
                ebit: p.ebit,
                total_pre_tax_income: p.total_pre_tax_income,
                net_income: p.net_income,
            })),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// Waterfalls of one symbol, one per period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterfallExport {
    /// Security symbol.
    pub symbol: String,

    /// Waterfalls in period order; uncharted periods carry `None`.
    pub waterfalls: Vec<PeriodWaterfall>,
}

impl WaterfallExport {
    /// Create a new waterfall export.
    pub const fn new(symbol: String, waterfalls: Vec<PeriodWaterfall>) -> Self {
        Self { symbol, waterfalls }
    }

    /// Number of periods that produced a waterfall.
    pub fn charted(&self) -> usize {
        self.waterfalls
            .iter()
            .filter(|w| w.waterfall.is_some())
            .count()
    }

    fn to_flat_records(&self) -> Vec<WaterfallRow<'_>> {
        self.waterfalls
            .iter()
            .filter_map(|pw| pw.waterfall.as_ref().map(|w| (pw.period_ending, w)))
            .flat_map(|(period_ending, waterfall)| {
                waterfall.iter().map(move |step| WaterfallRow {
                    symbol: &self.symbol,
                    period_ending,
                    label: step.label.as_str(),
                    delta: step.delta,
                    offset: step.offset,
                })
            })
            .collect()
    }
}

/// Flattened waterfall bar for CSV export.
#[derive(Debug, Serialize)]
struct WaterfallRow<'a> {
    symbol: &'a str,
    period_ending: NaiveDate,
    label: &'static str,
    delta: f64,
    offset: f64,
}

impl Exporter for WaterfallExport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_csv(self.to_flat_records()),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

//! Parsing of Yahoo Finance fundamentals time series responses.
//!
//! The endpoint returns one result per requested series:
//!
//! ```json
//! {"timeseries": {"result": [
//!     {"meta": {"symbol": ["AAPL"], "type": ["annualTotalRevenue"]},
//!      "timestamp": [1632960000],
//!      "annualTotalRevenue": [
//!         {"asOfDate": "2021-09-30", "currencyCode": "USD",
//!          "reportedValue": {"raw": 365817000000.0, "fmt": "365.82B"}}
//!      ]}
//! ], "error": null}}
//! ```
//!
//! Series are merged by `asOfDate` into [`PeriodFinancials`].

use crate::error::{DataError, Result};
use crate::statement::{LineItem, PeriodFinancials, PeriodType};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct TimeseriesEnvelope {
    timeseries: TimeseriesBody,
}

#[derive(Debug, Deserialize)]
struct TimeseriesBody {
    #[serde(default)]
    result: Option<Vec<SeriesResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SeriesResult {
    meta: SeriesMeta,
    /// Holds `timestamp` plus the series itself, keyed by its type name
    #[serde(flatten)]
    fields: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SeriesMeta {
    #[serde(rename = "type", default)]
    kind: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportedPoint {
    as_of_date: String,
    #[serde(default)]
    currency_code: Option<String>,
    #[serde(default)]
    reported_value: Option<ReportedValue>,
}

#[derive(Debug, Deserialize)]
struct ReportedValue {
    #[serde(default)]
    raw: Option<f64>,
}

/// Parse a fundamentals time series body into income statement periods.
///
/// Periods come back oldest first, one per distinct `asOfDate`. Series that do
/// not name one of the six [`LineItem`]s are ignored, as are `null` points.
///
/// # Errors
/// * [`DataError::Serialization`] if the body is not the expected JSON shape
/// * [`DataError::YahooApi`] if the payload carries an error object
/// * [`DataError::TimeConversion`] if an `asOfDate` is not an ISO date
pub fn parse_timeseries(
    symbol: &str,
    body: &str,
    period_type: PeriodType,
) -> Result<Vec<PeriodFinancials>> {
    let envelope: TimeseriesEnvelope = serde_json::from_str(body)?;

    if let Some(error) = envelope.timeseries.error.filter(|e| !e.is_null()) {
        let description = error
            .get("description")
            .and_then(|d| d.as_str())
            .map_or_else(|| error.to_string(), str::to_string);
        return Err(DataError::YahooApi(format!("{}: {}", symbol, description)));
    }

    let mut periods: BTreeMap<NaiveDate, PeriodFinancials> = BTreeMap::new();

    for mut result in envelope.timeseries.result.unwrap_or_default() {
        let Some(series) = result.meta.kind.first() else {
            continue;
        };
        let Some(item) = LineItem::from_yahoo_series(series, period_type) else {
            debug!(symbol, series = %series, "skipping unrequested series");
            continue;
        };
        let Some(points) = result.fields.remove(series.as_str()) else {
            continue;
        };

        let points: Vec<Option<ReportedPoint>> = serde_json::from_value(points)?;
        for point in points.into_iter().flatten() {
            let period_ending = NaiveDate::parse_from_str(&point.as_of_date, "%Y-%m-%d")
                .map_err(|e| {
                    DataError::TimeConversion(format!("asOfDate {}: {}", point.as_of_date, e))
                })?;

            let period = periods
                .entry(period_ending)
                .or_insert_with(|| PeriodFinancials::new(period_ending));

            if period.currency.is_none() {
                period.currency = point.currency_code;
            }
            period.set_value(item, point.reported_value.and_then(|v| v.raw));
        }
    }

    debug!(symbol, periods = periods.len(), "parsed fundamentals time series");

    Ok(periods.into_values().collect())
}

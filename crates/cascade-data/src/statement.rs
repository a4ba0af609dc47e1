//! Income statement records.
//!
//! A [`PeriodFinancials`] holds the six headline lines of one reported fiscal
//! period. The lines are addressed through [`LineItem`], an explicit ordered
//! table rather than lookups by field name.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reporting frequency of a statement.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// Fiscal year (10-K)
    #[default]
    Annual,
    /// Fiscal quarter (10-Q)
    Quarterly,
}

impl PeriodType {
    /// Prefix used by Yahoo Finance for time series of this frequency.
    pub const fn yahoo_prefix(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        }
    }

    /// Lowercase name of the frequency.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "annual" | "a" | "yearly" => Ok(Self::Annual),
            "quarterly" | "q" | "quarter" => Ok(Self::Quarterly),
            _ => Err(format!("Unknown period type: {}", s)),
        }
    }
}

/// One of the six income statement lines, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineItem {
    /// Total revenue
    TotalRevenue,
    /// Gross profit
    GrossProfit,
    /// Earnings before interest, taxes, depreciation and amortization
    Ebitda,
    /// Earnings before interest and taxes
    Ebit,
    /// Income before tax
    PreTaxIncome,
    /// Net income
    NetIncome,
}

impl LineItem {
    /// All line items, top of the statement first.
    pub const ALL: [Self; 6] = [
        Self::TotalRevenue,
        Self::GrossProfit,
        Self::Ebitda,
        Self::Ebit,
        Self::PreTaxIncome,
        Self::NetIncome,
    ];

    /// Row label shown in statement tables.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TotalRevenue => "Total Revenue",
            Self::GrossProfit => "Gross Profit",
            Self::Ebitda => "EBITDA",
            Self::Ebit => "EBIT",
            Self::PreTaxIncome => "Pre-Tax Income",
            Self::NetIncome => "Net Income",
        }
    }

    /// Snake-case field name, used for column headers in exports.
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::TotalRevenue => "total_revenue",
            Self::GrossProfit => "gross_profit",
            Self::Ebitda => "ebitda",
            Self::Ebit => "ebit",
            Self::PreTaxIncome => "total_pre_tax_income",
            Self::NetIncome => "net_income",
        }
    }

    /// Yahoo Finance time series name without the frequency prefix.
    pub const fn yahoo_suffix(&self) -> &'static str {
        match self {
            Self::TotalRevenue => "TotalRevenue",
            Self::GrossProfit => "GrossProfit",
            Self::Ebitda => "EBITDA",
            Self::Ebit => "EBIT",
            Self::PreTaxIncome => "PretaxIncome",
            Self::NetIncome => "NetIncome",
        }
    }

    /// Full Yahoo Finance time series name, e.g. `annualTotalRevenue`.
    pub fn yahoo_series(&self, period_type: PeriodType) -> String {
        format!("{}{}", period_type.yahoo_prefix(), self.yahoo_suffix())
    }

    /// Resolve a Yahoo Finance series name back to a line item.
    pub fn from_yahoo_series(series: &str, period_type: PeriodType) -> Option<Self> {
        let suffix = series.strip_prefix(period_type.yahoo_prefix())?;
        Self::ALL
            .into_iter()
            .find(|item| item.yahoo_suffix() == suffix)
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reported income statement figures for one fiscal period.
///
/// Every figure is optional: providers routinely omit lines for some
/// companies or years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodFinancials {
    /// Period end date
    pub period_ending: NaiveDate,
    /// Reporting currency (ISO code)
    #[serde(default)]
    pub currency: Option<String>,
    /// Total revenue
    #[serde(default)]
    pub total_revenue: Option<f64>,
    /// Gross profit
    #[serde(default)]
    pub gross_profit: Option<f64>,
    /// EBITDA
    #[serde(default)]
    pub ebitda: Option<f64>,
    /// EBIT
    #[serde(default)]
    pub ebit: Option<f64>,
    /// Income before tax
    #[serde(default)]
    pub total_pre_tax_income: Option<f64>,
    /// Net income
    #[serde(default)]
    pub net_income: Option<f64>,
}

impl PeriodFinancials {
    /// Create an empty period ending on `period_ending`.
    pub const fn new(period_ending: NaiveDate) -> Self {
        Self {
            period_ending,
            currency: None,
            total_revenue: None,
            gross_profit: None,
            ebitda: None,
            ebit: None,
            total_pre_tax_income: None,
            net_income: None,
        }
    }

    /// Fiscal year of the period end date.
    pub fn fiscal_year(&self) -> i32 {
        self.period_ending.year()
    }

    /// Reported value of a line item.
    pub const fn value(&self, item: LineItem) -> Option<f64> {
        match item {
            LineItem::TotalRevenue => self.total_revenue,
            LineItem::GrossProfit => self.gross_profit,
            LineItem::Ebitda => self.ebitda,
            LineItem::Ebit => self.ebit,
            LineItem::PreTaxIncome => self.total_pre_tax_income,
            LineItem::NetIncome => self.net_income,
        }
    }

    /// Set the value of a line item.
    pub const fn set_value(&mut self, item: LineItem, value: Option<f64>) {
        match item {
            LineItem::TotalRevenue => self.total_revenue = value,
            LineItem::GrossProfit => self.gross_profit = value,
            LineItem::Ebitda => self.ebitda = value,
            LineItem::Ebit => self.ebit = value,
            LineItem::PreTaxIncome => self.total_pre_tax_income = value,
            LineItem::NetIncome => self.net_income = value,
        }
    }

    /// Values of all six lines in [`LineItem::ALL`] order.
    pub fn values(&self) -> [Option<f64>; 6] {
        LineItem::ALL.map(|item| self.value(item))
    }

    /// Whether no line item was reported at all.
    pub fn is_empty(&self) -> bool {
        self.values().iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_line_item_order_and_labels() {
        let labels: Vec<_> = LineItem::ALL.iter().map(LineItem::label).collect();
        assert_eq!(
            labels,
            vec![
                "Total Revenue",
                "Gross Profit",
                "EBITDA",
                "EBIT",
                "Pre-Tax Income",
                "Net Income"
            ]
        );
    }

    #[test]
    fn test_yahoo_series_round_trip() {
        for item in LineItem::ALL {
            let annual = item.yahoo_series(PeriodType::Annual);
            assert!(annual.starts_with("annual"));
            assert_eq!(
                LineItem::from_yahoo_series(&annual, PeriodType::Annual),
                Some(item)
            );
        }

        assert_eq!(
            LineItem::from_yahoo_series("quarterlyEBIT", PeriodType::Quarterly),
            Some(LineItem::Ebit)
        );
        // EBIT must not swallow EBITDA
        assert_eq!(
            LineItem::from_yahoo_series("annualEBITDA", PeriodType::Annual),
            Some(LineItem::Ebitda)
        );
        assert_eq!(
            LineItem::from_yahoo_series("quarterlyEBIT", PeriodType::Annual),
            None
        );
        assert_eq!(
            LineItem::from_yahoo_series("annualBasicEPS", PeriodType::Annual),
            None
        );
    }

    #[test]
    fn test_value_accessors() {
        let mut period = PeriodFinancials::new(date(2023, 9, 30));
        assert!(period.is_empty());

        period.set_value(LineItem::TotalRevenue, Some(1000.0));
        period.set_value(LineItem::PreTaxIncome, Some(-50.0));

        assert_eq!(period.total_revenue, Some(1000.0));
        assert_eq!(period.value(LineItem::PreTaxIncome), Some(-50.0));
        assert_eq!(period.value(LineItem::NetIncome), None);
        assert_eq!(period.fiscal_year(), 2023);
        assert!(!period.is_empty());
    }

    #[test]
    fn test_period_type_parse() {
        assert_eq!("annual".parse::<PeriodType>(), Ok(PeriodType::Annual));
        assert_eq!("Quarterly".parse::<PeriodType>(), Ok(PeriodType::Quarterly));
        assert!("monthly".parse::<PeriodType>().is_err());
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let json = r#"{"period_ending":"2022-12-31","total_revenue":500.0,"net_income":null}"#;
        let period: PeriodFinancials = serde_json::from_str(json).unwrap();
        assert_eq!(period.total_revenue, Some(500.0));
        assert_eq!(period.gross_profit, None);
        assert_eq!(period.net_income, None);
        assert_eq!(period.currency, None);
    }
}

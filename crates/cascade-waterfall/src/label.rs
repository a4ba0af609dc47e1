//! Bar labels of the income statement waterfall.

use cascade_data::LineItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of one waterfall bar.
///
/// Each bar closes the gap between two consecutive subtotals; the line item
/// it ends at is given by [`StepLabel::closes_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepLabel {
    /// Revenue itself, always 100%
    #[serde(rename = "Revenue")]
    Revenue,
    /// Revenue to gross profit
    #[serde(rename = "Cost of Revenue")]
    CostOfRevenue,
    /// Gross profit to EBITDA
    #[serde(rename = "Operational Expenses")]
    OperationalExpenses,
    /// EBITDA to EBIT
    #[serde(rename = "Depreciation & Amortization")]
    DepreciationAmortization,
    /// EBIT to pre-tax income
    #[serde(rename = "Financial expenses")]
    FinancialExpenses,
    /// Pre-tax income to net income
    #[serde(rename = "Tax")]
    Tax,
}

impl StepLabel {
    /// All labels in bar order.
    pub const ALL: [Self; 6] = [
        Self::Revenue,
        Self::CostOfRevenue,
        Self::OperationalExpenses,
        Self::DepreciationAmortization,
        Self::FinancialExpenses,
        Self::Tax,
    ];

    /// Display text of the bar.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::CostOfRevenue => "Cost of Revenue",
            Self::OperationalExpenses => "Operational Expenses",
            Self::DepreciationAmortization => "Depreciation & Amortization",
            Self::FinancialExpenses => "Financial expenses",
            Self::Tax => "Tax",
        }
    }

    /// Short form for chart axes.
    pub const fn axis_label(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::CostOfRevenue => "COGS",
            Self::OperationalExpenses => "OpEx",
            Self::DepreciationAmortization => "D&A",
            Self::FinancialExpenses => "Fin. exp.",
            Self::Tax => "Tax",
        }
    }

    /// Zero-based position of the bar.
    pub const fn position(&self) -> usize {
        match self {
            Self::Revenue => 0,
            Self::CostOfRevenue => 1,
            Self::OperationalExpenses => 2,
            Self::DepreciationAmortization => 3,
            Self::FinancialExpenses => 4,
            Self::Tax => 5,
        }
    }

    /// Statement line whose level the bar ends at.
    pub const fn closes_at(&self) -> LineItem {
        match self {
            Self::Revenue => LineItem::TotalRevenue,
            Self::CostOfRevenue => LineItem::GrossProfit,
            Self::OperationalExpenses => LineItem::Ebitda,
            Self::DepreciationAmortization => LineItem::Ebit,
            Self::FinancialExpenses => LineItem::PreTaxIncome,
            Self::Tax => LineItem::NetIncome,
        }
    }
}

impl fmt::Display for StepLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

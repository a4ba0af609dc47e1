//! Income statement tables.
//!
//! The table has a `Characteristic` column naming the statement line, then
//! one column per period in the order the periods were supplied.

use cascade_data::{LineItem, PeriodFinancials};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Text shown for a line the provider did not report.
const MISSING: &str = "N/A";

/// Format an amount with thousands separators and no decimals.
///
/// # Examples
///
/// ```
/// use cascade_output::format_amount;
///
/// assert_eq!(format_amount(Some(383_285_000_000.0)), "383,285,000,000");
/// assert_eq!(format_amount(Some(-1234.6)), "-1,235");
/// assert_eq!(format_amount(None), "N/A");
/// ```
pub fn format_amount(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return MISSING.to_string();
    };

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// One statement line across all periods.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableRow {
    /// Line label, e.g. "Gross Profit".
    pub label: String,
    /// Formatted amounts, one per period column.
    pub cells: Vec<String>,
}

/// Income statement laid out with one column per period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncomeTable {
    /// Symbol the statement belongs to.
    pub symbol: String,
    /// Period column headers.
    pub columns: Vec<String>,
    /// Rows in statement order.
    pub rows: Vec<TableRow>,
}

impl IncomeTable {
    /// Header of the label column.
    pub const LABEL_HEADER: &'static str = "Characteristic";

    /// Build the table for `periods`, keeping their order.
    ///
    /// Columns are headed by fiscal year; when two periods share a year
    /// (quarterly statements) the full period end date is used instead.
    pub fn new(symbol: impl Into<String>, periods: &[PeriodFinancials]) -> Self {
        let years: HashSet<i32> = periods.iter().map(PeriodFinancials::fiscal_year).collect();
        let by_year = years.len() == periods.len();

        let columns = periods
            .iter()
            .map(|p| {
                if by_year {
                    p.fiscal_year().to_string()
                } else {
                    p.period_ending.format("%Y-%m-%d").to_string()
                }
            })
            .collect();

        let rows = LineItem::ALL
            .iter()
            .map(|item| TableRow {
                label: item.label().to_string(),
                cells: periods.iter().map(|p| format_amount(p.value(*item))).collect(),
            })
            .collect();

        Self {
            symbol: symbol.into(),
            columns,
            rows,
        }
    }

    /// Whether the table has no period columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn column_widths(&self) -> (usize, Vec<usize>) {
        let label_width = self
            .rows
            .iter()
            .map(|r| r.label.len())
            .chain(std::iter::once(Self::LABEL_HEADER.len()))
            .max()
            .unwrap_or_default();

        let widths = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.cells.get(i))
                    .map(String::len)
                    .chain(std::iter::once(header.len()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        (label_width, widths)
    }

    /// Generate an ASCII table.
    pub fn to_ascii_table(&self) -> String {
        let (label_width, widths) = self.column_widths();
        let total_width = label_width + widths.iter().map(|w| w + 3).sum::<usize>();

        let mut output = String::new();
        output.push_str(&format!("\nIncome Statement: {}\n", self.symbol));
        output.push_str(&"=".repeat(total_width));
        output.push('\n');

        output.push_str(&format!("{:<label_width$}", Self::LABEL_HEADER));
        for (header, width) in self.columns.iter().zip(widths.iter().copied()) {
            output.push_str(&format!("   {:>width$}", header));
        }
        output.push('\n');
        output.push_str(&"-".repeat(total_width));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!("{:<label_width$}", row.label));
            for (cell, width) in row.cells.iter().zip(widths.iter().copied()) {
                output.push_str(&format!("   {:>width$}", cell));
            }
            output.push('\n');
        }

        output.push_str(&"=".repeat(total_width));
        output.push('\n');
        output
    }

    /// Generate a Markdown table.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Income Statement: {}\n\n", self.symbol));

        output.push_str(&format!("| {} |", Self::LABEL_HEADER));
        for header in &self.columns {
            output.push_str(&format!(" {} |", header));
        }
        output.push('\n');

        output.push_str("|---|");
        for _ in &self.columns {
            output.push_str("---:|");
        }
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!("| {} |", row.label));
            for cell in &row.cells {
                output.push_str(&format!(" {} |", cell));
            }
            output.push('\n');
        }

        output
    }
}

impl fmt::Display for IncomeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn period(date: (i32, u32, u32), revenue: Option<f64>, net: Option<f64>) -> PeriodFinancials {
        let mut p = PeriodFinancials::new(NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap());
        p.total_revenue = revenue;
        p.net_income = net;
        p
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Some(0.0)), "0");
        assert_eq!(format_amount(Some(999.0)), "999");
        assert_eq!(format_amount(Some(1000.0)), "1,000");
        assert_eq!(format_amount(Some(1_234_567.49)), "1,234,567");
        assert_eq!(format_amount(Some(-25_000.0)), "-25,000");
        assert_eq!(format_amount(Some(-0.3)), "0");
        assert_eq!(format_amount(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn test_table_layout() {
        let periods = vec![
            period((2023, 9, 30), Some(383_285_000_000.0), Some(96_995_000_000.0)),
            period((2022, 9, 30), Some(394_328_000_000.0), None),
        ];
        let table = IncomeTable::new("AAPL", &periods);

        assert_eq!(table.columns, vec!["2023", "2022"]);
        assert_eq!(table.rows.len(), 6);
        assert_eq!(table.rows[0].label, "Total Revenue");
        assert_eq!(table.rows[0].cells, vec!["383,285,000,000", "394,328,000,000"]);
        assert_eq!(table.rows[5].label, "Net Income");
        assert_eq!(table.rows[5].cells, vec!["96,995,000,000", "N/A"]);
    }

    #[test]
    fn test_quarterly_columns_use_dates() {
        let periods = vec![
            period((2023, 12, 31), Some(1.0), None),
            period((2023, 9, 30), Some(1.0), None),
        ];
        let table = IncomeTable::new("MSFT", &periods);
        assert_eq!(table.columns, vec!["2023-12-31", "2023-09-30"]);
    }

    #[test]
    fn test_ascii_and_markdown() {
        let periods = vec![period((2023, 12, 31), Some(1500.0), Some(-20.0))];
        let table = IncomeTable::new("XYZ", &periods);

        let ascii = table.to_ascii_table();
        assert!(ascii.contains("Income Statement: XYZ"));
        assert!(ascii.contains("Characteristic"));
        assert!(ascii.contains("Pre-Tax Income"));
        assert!(ascii.contains("1,500"));
        assert!(ascii.contains("-20"));

        let markdown = table.to_markdown();
        assert!(markdown.contains("| Characteristic | 2023 |"));
        assert!(markdown.contains("| Gross Profit | N/A |"));
    }

    #[test]
    fn test_empty_table() {
        let table = IncomeTable::new("NONE", &[]);
        assert!(table.is_empty());
        assert_eq!(table.rows.len(), 6);
        assert!(table.rows.iter().all(|r| r.cells.is_empty()));
    }
}

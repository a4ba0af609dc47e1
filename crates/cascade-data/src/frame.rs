//! Polars conversion for income statements.

use crate::error::{DataError, Result};
use crate::statement::{LineItem, PeriodFinancials};
use polars::prelude::*;

/// Convert statements into a DataFrame with one row per period.
///
/// Columns: `period_ending` (ISO date string), `fiscal_year`, `currency`,
/// then one `f64` column per [`LineItem`] named after its field.
pub fn to_dataframe(periods: &[PeriodFinancials]) -> Result<DataFrame> {
    if periods.is_empty() {
        return Err(DataError::Parse("No income statement periods provided".to_string()));
    }

    let period_endings: Vec<String> = periods
        .iter()
        .map(|p| p.period_ending.format("%Y-%m-%d").to_string())
        .collect();
    let fiscal_years: Vec<i32> = periods.iter().map(PeriodFinancials::fiscal_year).collect();
    let currencies: Vec<Option<String>> = periods.iter().map(|p| p.currency.clone()).collect();

    let mut columns: Vec<Column> = vec![
        Series::new("period_ending".into(), period_endings).into(),
        Series::new("fiscal_year".into(), fiscal_years).into(),
        Series::new("currency".into(), currencies).into(),
    ];

    for item in LineItem::ALL {
        let values: Vec<Option<f64>> = periods.iter().map(|p| p.value(item)).collect();
        columns.push(Series::new(item.field_name().into(), values).into());
    }

    let df = DataFrame::new(columns)?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_to_dataframe() {
        let mut recent = PeriodFinancials::new(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        recent.total_revenue = Some(1000.0);
        recent.net_income = Some(200.0);
        let older = PeriodFinancials::new(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());

        let df = to_dataframe(&[recent, older]).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 9);

        let revenue = df.column("total_revenue").unwrap();
        assert_eq!(revenue.null_count(), 1);
    }

    #[test]
    fn test_to_dataframe_empty() {
        assert!(matches!(to_dataframe(&[]), Err(DataError::Parse(_))));
    }
}

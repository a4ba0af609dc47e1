//! Percentage-of-revenue transform.

use crate::step::Waterfall;
use cascade_data::PeriodFinancials;

/// The six statement levels of a period as percentages of its revenue.
///
/// Returns `None` when revenue is missing, zero or not finite. Any other
/// missing line counts as 0%.
pub fn percentages(period: &PeriodFinancials) -> Option<[f64; 6]> {
    let revenue = period
        .total_revenue
        .filter(|revenue| *revenue != 0.0 && revenue.is_finite())?;

    Some(
        period
            .values()
            .map(|value| value.map_or(0.0, |value| (value / revenue) * 100.0)),
    )
}

/// Compute the waterfall bars of one period.
///
/// `None` means the period cannot be charted (no revenue to divide by); the
/// caller skips it.
///
/// # Example
/// ```
/// use cascade_data::PeriodFinancials;
/// use cascade_waterfall::compute_steps;
/// use chrono::NaiveDate;
///
/// let mut period = PeriodFinancials::new(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
/// period.total_revenue = Some(1000.0);
/// period.gross_profit = Some(600.0);
///
/// let waterfall = compute_steps(&period).unwrap();
/// assert_eq!(waterfall.steps()[0].delta, 100.0);
/// assert_eq!(waterfall.steps()[1].delta, -40.0);
/// ```
pub fn compute_steps(period: &PeriodFinancials) -> Option<Waterfall> {
    percentages(period).map(Waterfall::from_levels)
}
